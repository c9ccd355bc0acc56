//! AFDRS (Australian Fire Danger Rating System) vocabulary, badge palette and
//! Fire Behaviour Index bands.

use serde::Serialize;

/// The five published AFDRS levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FireDangerRating {
    NoRating,
    Moderate,
    High,
    Extreme,
    Catastrophic,
}

impl FireDangerRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            FireDangerRating::NoRating => "No Rating",
            FireDangerRating::Moderate => "Moderate",
            FireDangerRating::High => "High",
            FireDangerRating::Extreme => "Extreme",
            FireDangerRating::Catastrophic => "Catastrophic",
        }
    }

    /// All levels, lowest to highest.
    pub const fn all() -> &'static [FireDangerRating] {
        &[
            FireDangerRating::NoRating,
            FireDangerRating::Moderate,
            FireDangerRating::High,
            FireDangerRating::Extreme,
            FireDangerRating::Catastrophic,
        ]
    }

    /// Exact, case-sensitive match on the published label.
    pub fn parse(label: &str) -> Option<Self> {
        Self::all().iter().copied().find(|rating| rating.as_str() == label)
    }

    /// FBI range covered by this level.
    pub fn fbi_band(&self) -> &'static str {
        match self {
            FireDangerRating::NoRating => "< 12",
            FireDangerRating::Moderate => "12–23",
            FireDangerRating::High => "24–49",
            FireDangerRating::Extreme => "50–99",
            FireDangerRating::Catastrophic => "≥ 100",
        }
    }

    pub fn colors(&self) -> BadgeColors {
        let (background, foreground) = match self {
            FireDangerRating::NoRating => ("#FFFFFF", TextTone::Fixed("#000000")),
            FireDangerRating::Moderate => ("#6DB840", TextTone::Dark),
            FireDangerRating::High => ("#F7D94A", TextTone::Dark),
            FireDangerRating::Extreme => ("#E87820", TextTone::Dark),
            FireDangerRating::Catastrophic => ("#922B21", TextTone::Light),
        };
        BadgeColors { background, foreground }
    }
}

impl std::fmt::Display for FireDangerRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Foreground treatment for badge text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTone {
    Fixed(&'static str),
    Dark,
    Light,
    /// Whatever the surrounding text uses.
    Inherit,
}

impl TextTone {
    /// CSS color for the tone, `None` for `Inherit`.
    pub fn css(&self) -> Option<&'static str> {
        match self {
            TextTone::Fixed(hex) => Some(*hex),
            TextTone::Dark => Some("rgba(0, 0, 0, 0.87)"),
            TextTone::Light => Some("#FFFFFF"),
            TextTone::Inherit => None,
        }
    }
}

// Serialized as its CSS color so templates can use it directly.
impl Serialize for TextTone {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.css().serialize(serializer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BadgeColors {
    pub background: &'static str,
    pub foreground: TextTone,
}

/// Palette used for labels outside the AFDRS set.
pub const UNKNOWN_COLORS: BadgeColors = BadgeColors {
    background: "#888888",
    foreground: TextTone::Inherit,
};

/// Badge colors for any rating label; unrecognised labels get the grey fallback.
pub fn badge_colors(label: &str) -> BadgeColors {
    match FireDangerRating::parse(label) {
        Some(rating) => rating.colors(),
        None => UNKNOWN_COLORS,
    }
}

/// One row of the help legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub rating: &'static str,
    pub fbi_band: &'static str,
    pub colors: BadgeColors,
}

/// Static legend content, lowest level first.
pub fn legend() -> Vec<LegendEntry> {
    FireDangerRating::all()
        .iter()
        .map(|rating| LegendEntry {
            rating: rating.as_str(),
            fbi_band: rating.fbi_band(),
            colors: rating.colors(),
        })
        .collect()
}
