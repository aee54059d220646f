use super::{CurrentConditions, ForecastDay, Recommendation, SeasonInfo, WindowSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything the front-ends render for one location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TapReport {
    pub latitude: f64,
    pub longitude: f64,
    pub generated_at: DateTime<Utc>,
    pub current: Option<CurrentConditions>,
    pub today: Option<ForecastDay>,
    pub days: Vec<ForecastDay>,
    pub best_window: Option<WindowSummary>,
    pub recommendation: Recommendation,
    pub season: SeasonInfo,
}

impl TapReport {
    pub fn favorable_days(&self) -> usize {
        self.days.iter().filter(|d| d.is_favorable()).count()
    }
}
