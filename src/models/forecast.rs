use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Daily forecast data from the OpenWeatherMap One Call API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub fetched_at: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone_offset_secs: i32,
    pub current: Option<CurrentConditions>,
    pub daily: Vec<DailyForecast>, // One entry per local calendar day
}

impl WeatherForecast {
    /// Lowest forecast low across all days that report one
    pub fn min_low_c(&self) -> Option<f64> {
        self.daily
            .iter()
            .filter_map(|d| d.low_c)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Highest forecast high across all days that report one
    pub fn max_high_c(&self) -> Option<f64> {
        self.daily
            .iter()
            .filter_map(|d| d.high_c)
            .max_by(|a, b| a.total_cmp(b))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub summary: String,
    pub icon: String,
}

/// Raw per-day forecast entry before rating
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub low_c: Option<f64>,
    pub high_c: Option<f64>,
    pub summary: String,
    pub icon: String,
}

/// Qualitative sap-flow rating for a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Excellent,
    Good,
    Fair,
    Poor,
    Unknown,
}

impl Rating {
    pub fn score(&self) -> u8 {
        match self {
            Rating::Excellent => 3,
            Rating::Good => 2,
            Rating::Fair => 1,
            Rating::Poor | Rating::Unknown => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Excellent => "excellent",
            Rating::Good => "good",
            Rating::Fair => "fair",
            Rating::Poor => "poor",
            Rating::Unknown => "unknown",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Rating::Excellent => "★★★",
            Rating::Good => "★★",
            Rating::Fair => "★",
            Rating::Poor => "·",
            Rating::Unknown => "?",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            Rating::Excellent => Color::Green,
            Rating::Good => Color::LightGreen,
            Rating::Fair => Color::Yellow,
            Rating::Poor => Color::Gray,
            Rating::Unknown => Color::DarkGray,
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A rated forecast day. Rating and score are fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub low_c: Option<f64>,
    pub high_c: Option<f64>,
    pub summary: String,
    pub icon: String,
    pub rating: Rating,
    pub score: u8,
}

impl ForecastDay {
    pub fn new(
        date: NaiveDate,
        low_c: Option<f64>,
        high_c: Option<f64>,
        summary: impl Into<String>,
        icon: impl Into<String>,
        rating: Rating,
    ) -> Self {
        Self {
            date,
            low_c,
            high_c,
            summary: summary.into(),
            icon: icon.into(),
            rating,
            score: rating.score(),
        }
    }

    /// Score 2 or better, i.e. good enough to belong to a tapping window
    pub fn is_favorable(&self) -> bool {
        self.score >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_scores() {
        assert_eq!(Rating::Excellent.score(), 3);
        assert_eq!(Rating::Good.score(), 2);
        assert_eq!(Rating::Fair.score(), 1);
        assert_eq!(Rating::Poor.score(), 0);
        assert_eq!(Rating::Unknown.score(), 0);
    }

    #[test]
    fn forecast_day_carries_matching_score() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let day = ForecastDay::new(date, Some(-4.0), Some(6.0), "Clear", "01d", Rating::Excellent);
        assert_eq!(day.score, 3);
        assert!(day.is_favorable());

        let day = ForecastDay::new(date, None, None, "", "", Rating::Unknown);
        assert_eq!(day.score, 0);
        assert!(!day.is_favorable());
    }

    #[test]
    fn rating_serializes_lowercase() {
        let json = serde_json::to_string(&Rating::Excellent).unwrap();
        assert_eq!(json, "\"excellent\"");
    }

    #[test]
    fn forecast_extremes_skip_missing_values() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let forecast = WeatherForecast {
            fetched_at: Utc::now(),
            latitude: 44.0,
            longitude: -72.0,
            timezone_offset_secs: 0,
            current: None,
            daily: vec![
                DailyForecast {
                    date,
                    low_c: Some(-3.0),
                    high_c: None,
                    summary: String::new(),
                    icon: String::new(),
                },
                DailyForecast {
                    date: date.succ_opt().unwrap(),
                    low_c: Some(-8.0),
                    high_c: Some(5.0),
                    summary: String::new(),
                    icon: String::new(),
                },
            ],
        };
        assert_eq!(forecast.min_low_c(), Some(-8.0));
        assert_eq!(forecast.max_high_c(), Some(5.0));
    }
}
