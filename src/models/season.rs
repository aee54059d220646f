use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Hand-curated anchor for season timing interpolation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonReferencePoint {
    pub latitude: f64,
    pub tap_by_doy: u32,
    pub season_end_doy: u32,
}

/// Typical season timing for a latitude in a given year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonInfo {
    pub tap_by_date: NaiveDate,
    pub season_end_date: NaiveDate,
    pub message: String,
}
