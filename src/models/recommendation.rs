use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    TapNow,
    Upcoming,
    NoWindow,
    SeasonOver,
    TooCold,
}

impl RecommendationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationKind::TapNow => "tap_now",
            RecommendationKind::Upcoming => "upcoming",
            RecommendationKind::NoWindow => "no_window",
            RecommendationKind::SeasonOver => "season_over",
            RecommendationKind::TooCold => "too_cold",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RecommendationKind::TapNow => "Tap Now",
            RecommendationKind::Upcoming => "Window Ahead",
            RecommendationKind::NoWindow => "Wait",
            RecommendationKind::SeasonOver => "Season Over",
            RecommendationKind::TooCold => "Too Cold",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            RecommendationKind::TapNow => Color::Green,
            RecommendationKind::Upcoming => Color::Cyan,
            RecommendationKind::NoWindow => Color::Yellow,
            RecommendationKind::SeasonOver => Color::Red,
            RecommendationKind::TooCold => Color::LightBlue,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            RecommendationKind::TapNow => "✔",
            RecommendationKind::Upcoming => "→",
            RecommendationKind::NoWindow => "…",
            RecommendationKind::SeasonOver => "✖",
            RecommendationKind::TooCold => "❄",
        }
    }

    /// Whether the outcome asks the user to act on a window
    pub fn is_actionable(&self) -> bool {
        matches!(
            self,
            RecommendationKind::TapNow | RecommendationKind::Upcoming
        )
    }
}

impl std::fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub message: String,
}

impl Recommendation {
    pub fn new(kind: RecommendationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
