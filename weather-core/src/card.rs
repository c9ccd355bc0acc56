//! Weather card: the mapping from a [`WeatherReport`] to what the card shows.
//!
//! [`render`] is pure and infallible. Bindings (HTML, terminal) take the
//! resulting [`CardView`] together with a [`CardState`] and decide which
//! blocks are visible.

use serde::Serialize;

use crate::{
    model::{FireDangerDay, WeatherReport},
    rating::{BadgeColors, LegendEntry, badge_colors, legend},
};

pub const FIRE_BAN_TEXT: &str = "TOTAL FIRE BAN";
pub const TODAY_LINK_TEXT: &str = "Today";
pub const SEVEN_DAY_LINK_TEXT: &str = "7-day";

/// Everything a card displays, already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub location: String,
    pub description: String,
    /// e.g. "18°C"
    pub current: String,
    /// e.g. "Min 11°"
    pub min: String,
    /// e.g. "Max 24°"
    pub max: String,
    pub humidity: String,
    pub wind: String,
    pub forecast: Vec<ForecastCell>,
    pub links: [CardLink; 2],
    pub fire_ban: Option<&'static str>,
    /// `None` means no row and no help trigger.
    pub fire_danger: Option<Vec<FireDangerCell>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastCell {
    pub day: String,
    pub min: String,
    pub max: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardLink {
    pub text: &'static str,
    pub href: String,
    pub new_tab: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FireDangerCell {
    /// Positional: Today, Tomorrow, +2, +3, ...
    pub label: String,
    /// Weekday as sent by the API.
    pub day: String,
    pub badge: Badge,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub text: String,
    pub colors: BadgeColors,
}

impl CardView {
    pub fn has_fire_danger(&self) -> bool {
        self.fire_danger.is_some()
    }

    /// Legend rows when the help panel is open; the panel only exists
    /// alongside a fire danger row.
    pub fn help_panel(&self, state: &CardState) -> Option<Vec<LegendEntry>> {
        (self.has_fire_danger() && state.help_panel_open).then(legend)
    }
}

/// Per-card UI toggles. Each flag changes only through its own handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardState {
    pub body_expanded: bool,
    pub help_panel_open: bool,
}

impl Default for CardState {
    fn default() -> Self {
        Self { body_expanded: true, help_panel_open: false }
    }
}

impl CardState {
    pub fn toggle_body(&mut self) {
        self.body_expanded = !self.body_expanded;
    }

    pub fn toggle_help(&mut self) {
        self.help_panel_open = !self.help_panel_open;
    }
}

/// A rendered card together with its own toggle state.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub view: CardView,
    pub state: CardState,
}

impl Card {
    pub fn new(report: &WeatherReport) -> Self {
        Self { view: render(report), state: CardState::default() }
    }

    pub fn help_panel(&self) -> Option<Vec<LegendEntry>> {
        self.view.help_panel(&self.state)
    }
}

pub fn render(report: &WeatherReport) -> CardView {
    let forecast = report
        .forecast_7day
        .iter()
        .map(|day| ForecastCell {
            day: day.day.clone(),
            min: format_degrees(day.temp_min),
            max: format_degrees(day.temp_max),
        })
        .collect();

    let fire_danger = report.fire_danger.as_ref().map(|days| {
        days.iter()
            .enumerate()
            .map(|(position, day)| fire_danger_cell(position, day))
            .collect()
    });

    CardView {
        location: report.location.clone(),
        description: report.description.clone(),
        current: format_current(report.temperature),
        min: format_min(report.temp_min),
        max: format_max(report.temp_max),
        humidity: format!("{}%", report.humidity),
        wind: format!("{} km/h", round_display(report.wind_speed)),
        forecast,
        links: [
            CardLink {
                text: TODAY_LINK_TEXT,
                href: report.bom_today_url.clone(),
                new_tab: true,
            },
            CardLink {
                text: SEVEN_DAY_LINK_TEXT,
                href: report.bom_7day_url.clone(),
                new_tab: true,
            },
        ],
        fire_ban: report.total_fire_ban.then_some(FIRE_BAN_TEXT),
        fire_danger,
    }
}

fn fire_danger_cell(position: usize, day: &FireDangerDay) -> FireDangerCell {
    FireDangerCell {
        label: position_label(position),
        day: day.day.clone(),
        badge: Badge {
            text: badge_text(&day.rating, day.index),
            colors: badge_colors(&day.rating),
        },
    }
}

/// Column label by position, not by date.
pub fn position_label(position: usize) -> String {
    match position {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        n => format!("+{n}"),
    }
}

pub fn badge_text(rating: &str, index: Option<i64>) -> String {
    match index {
        Some(index) => format!("{rating} {index}"),
        None => rating.to_string(),
    }
}

/// Round a display value (temperature, wind) half away from zero.
/// Non-finite input maps to 0.
pub fn round_display(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    // `as` saturates on overflow.
    value.round() as i64
}

pub fn format_current(value: f64) -> String {
    format!("{}°C", round_display(value))
}

pub fn format_min(value: f64) -> String {
    format!("Min {}°", round_display(value))
}

pub fn format_max(value: f64) -> String {
    format!("Max {}°", round_display(value))
}

fn format_degrees(value: f64) -> String {
    format!("{}°", round_display(value))
}
