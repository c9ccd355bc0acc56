//! Terminal rendering of cards.

use std::fmt::{self, Write};

use crossterm::style::{Color, Stylize};
use weather_core::{BadgeColors, Card, TextTone};

/// Text block for one card, honoring its toggle state.
///
/// With `colored`, badges are painted in their rating colors using ANSI
/// escapes; otherwise only the badge text is printed.
pub fn card_text(card: &Card, colored: bool) -> Result<String, fmt::Error> {
    let view = &card.view;
    let mut out = String::new();

    let marker = if card.state.body_expanded { "-" } else { "+" };
    writeln!(out, "[{marker}] {}", view.location)?;

    if !card.state.body_expanded {
        return Ok(out);
    }

    if let Some(banner) = view.fire_ban {
        writeln!(out, "    !! {banner} !!")?;
    }

    writeln!(out, "    {}  {}", view.current, view.description)?;
    writeln!(out, "    {}  {}", view.min, view.max)?;
    writeln!(out, "    Humidity {}  Wind {}", view.humidity, view.wind)?;

    let days: Vec<String> =
        view.forecast.iter().map(|d| format!("{} {}/{}", d.day, d.min, d.max)).collect();
    writeln!(out, "    {}", days.join("  "))?;

    for link in &view.links {
        writeln!(out, "    {}: {}", link.text, link.href)?;
    }

    if let Some(cells) = &view.fire_danger {
        writeln!(out, "    Fire danger:")?;
        for cell in cells {
            writeln!(
                out,
                "      {:<9} {}",
                cell.label,
                paint(&cell.badge.text, &cell.badge.colors, colored)
            )?;
        }
    }

    if let Some(legend) = card.help_panel() {
        writeln!(out, "    Fire Behaviour Index:")?;
        for entry in legend {
            let name = format!("{:<13}", entry.rating);
            writeln!(out, "      {} {}", paint(&name, &entry.colors, colored), entry.fbi_band)?;
        }
    }

    Ok(out)
}

fn paint(text: &str, colors: &BadgeColors, colored: bool) -> String {
    let background = match hex_color(colors.background) {
        Some(color) if colored => color,
        _ => return text.to_string(),
    };

    let styled = text.on(background);
    match tone_color(colors.foreground) {
        Some(foreground) => styled.with(foreground).to_string(),
        None => styled.to_string(),
    }
}

fn tone_color(tone: TextTone) -> Option<Color> {
    match tone {
        TextTone::Fixed(hex) => hex_color(hex),
        TextTone::Dark => Some(Color::Black),
        TextTone::Light => Some(Color::White),
        TextTone::Inherit => None,
    }
}

/// Parse `#RRGGBB` into a truecolor value.
fn hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();

    Some(Color::Rgb { r: channel(0)?, g: channel(2)?, b: channel(4)? })
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_core::{DayForecast, FireDangerDay, WeatherReport};

    fn report() -> WeatherReport {
        WeatherReport {
            location: "Castlemaine".to_string(),
            temperature: 17.8,
            description: "Partly cloudy".to_string(),
            humidity: 55,
            wind_speed: 12.3,
            temp_min: 11.2,
            temp_max: 24.1,
            forecast_7day: vec![DayForecast { day: "F".to_string(), temp_min: 12.7, temp_max: 23.4 }],
            bom_today_url: "https://bom.example#today".to_string(),
            bom_7day_url: "https://bom.example#7-days".to_string(),
            total_fire_ban: true,
            fire_danger: Some(vec![FireDangerDay {
                day: "F".to_string(),
                rating: "Extreme".to_string(),
                index: Some(87),
            }]),
        }
    }

    #[test]
    fn expanded_card_shows_everything() {
        let text = card_text(&Card::new(&report()), false).expect("format");

        assert!(text.starts_with("[-] Castlemaine"));
        assert!(text.contains("TOTAL FIRE BAN"));
        assert!(text.contains("18°C  Partly cloudy"));
        assert!(text.contains("Min 11°  Max 24°"));
        assert!(text.contains("F 13°/23°"));
        assert!(text.contains("Today: https://bom.example#today"));
        assert!(text.contains("Today     Extreme 87\n"));
        assert!(!text.contains("Fire Behaviour Index"));
    }

    #[test]
    fn collapsed_card_shows_only_header() {
        let mut card = Card::new(&report());
        card.state.toggle_body();

        assert_eq!(card_text(&card, false).expect("format"), "[+] Castlemaine\n");
    }

    #[test]
    fn legend_when_help_open() {
        let mut card = Card::new(&report());
        card.state.toggle_help();
        let text = card_text(&card, false).expect("format");

        assert!(text.contains("Fire Behaviour Index:"));
        assert!(text.contains("Catastrophic  ≥ 100"));
        assert!(text.contains("No Rating     < 12"));
    }

    #[test]
    fn badge_palette_maps_to_truecolor() {
        assert_eq!(hex_color("#E87820"), Some(Color::Rgb { r: 232, g: 120, b: 32 }));
        assert_eq!(hex_color("#888888"), Some(Color::Rgb { r: 136, g: 136, b: 136 }));
        assert_eq!(hex_color("E87820"), None);
        assert_eq!(hex_color("#E878"), None);
        assert_eq!(hex_color("#GG0000"), None);

        assert_eq!(tone_color(TextTone::Dark), Some(Color::Black));
        assert_eq!(tone_color(TextTone::Light), Some(Color::White));
        assert_eq!(tone_color(TextTone::Fixed("#000000")), Some(Color::Rgb { r: 0, g: 0, b: 0 }));
        assert_eq!(tone_color(TextTone::Inherit), None);
    }

    #[test]
    fn uncolored_badges_are_plain_text() {
        let colors = BadgeColors { background: "#E87820", foreground: TextTone::Dark };
        assert_eq!(paint("Extreme 87", &colors, false), "Extreme 87");

        let bad = BadgeColors { background: "not-a-color", foreground: TextTone::Dark };
        assert_eq!(paint("Extreme 87", &bad, true), "Extreme 87");
    }
}
