use crate::models::{DailyForecast, ForecastDay, Rating};
use serde::{Deserialize, Serialize};

/// Day rating thresholds (°C)
///
/// A day needs a freeze (low below `freeze_below`) and a thaw (high above
/// `thaw_above`) to rate at all. The ideal ranges are inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingThresholds {
    pub freeze_below: f64,
    pub thaw_above: f64,
    pub ideal_low_min: f64,
    pub ideal_low_max: f64,
    pub ideal_high_min: f64,
    pub ideal_high_max: f64,
}

impl Default for RatingThresholds {
    fn default() -> Self {
        Self {
            freeze_below: 0.0,
            thaw_above: 2.0,
            ideal_low_min: -7.0,
            ideal_low_max: -2.0,
            ideal_high_min: 4.0,
            ideal_high_max: 10.0,
        }
    }
}

impl RatingThresholds {
    /// Rate a day from its low/high temperature pair
    pub fn rate(&self, low_c: f64, high_c: f64) -> Rating {
        let freezes = low_c < self.freeze_below;
        let thaws = high_c > self.thaw_above;
        if !freezes || !thaws {
            return Rating::Poor;
        }

        let low_ideal = (self.ideal_low_min..=self.ideal_low_max).contains(&low_c);
        let high_ideal = (self.ideal_high_min..=self.ideal_high_max).contains(&high_c);

        match (low_ideal, high_ideal) {
            (true, true) => Rating::Excellent,
            (true, false) | (false, true) => Rating::Good,
            (false, false) => Rating::Fair,
        }
    }

    /// Rate an upstream forecast entry. Missing temperatures rate as unknown.
    pub fn rate_forecast(&self, day: &DailyForecast) -> ForecastDay {
        let rating = match (day.low_c, day.high_c) {
            (Some(low), Some(high)) => self.rate(low, high),
            _ => Rating::Unknown,
        };

        ForecastDay::new(
            day.date,
            day.low_c,
            day.high_c,
            day.summary.clone(),
            day.icon.clone(),
            rating,
        )
    }
}

/// Rate a day with the default thresholds, returning the rating and its score
pub fn score_day(low_c: f64, high_c: f64) -> (Rating, u8) {
    let rating = RatingThresholds::default().rate(low_c, high_c);
    (rating, rating.score())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn no_freeze_or_no_thaw_is_poor() {
        assert_eq!(score_day(0.0, 8.0), (Rating::Poor, 0));
        assert_eq!(score_day(3.0, 12.0), (Rating::Poor, 0));
        assert_eq!(score_day(-5.0, 2.0), (Rating::Poor, 0));
        assert_eq!(score_day(-15.0, -3.0), (Rating::Poor, 0));
    }

    #[test]
    fn both_ideal_is_excellent() {
        assert_eq!(score_day(-4.0, 6.0), (Rating::Excellent, 3));
        assert_eq!(score_day(-2.0, 4.0), (Rating::Excellent, 3));
    }

    #[test]
    fn one_ideal_is_good() {
        // Ideal low, warm high
        assert_eq!(score_day(-4.0, 14.0), (Rating::Good, 2));
        // Hard freeze, ideal high
        assert_eq!(score_day(-12.0, 6.0), (Rating::Good, 2));
        // Light freeze, ideal high
        assert_eq!(score_day(-1.0, 6.0), (Rating::Good, 2));
    }

    #[test]
    fn freeze_thaw_outside_ideal_is_fair() {
        assert_eq!(score_day(-1.0, 3.0), (Rating::Fair, 1));
        assert_eq!(score_day(-12.0, 15.0), (Rating::Fair, 1));
    }

    #[test]
    fn ideal_range_edges_are_inclusive() {
        assert_eq!(score_day(-7.0, 7.0).0, Rating::Excellent);
        assert_eq!(score_day(-7.1, 7.0).0, Rating::Good);
        assert_eq!(score_day(-5.0, 10.0).0, Rating::Excellent);
        assert_eq!(score_day(-5.0, 10.1).0, Rating::Good);
    }

    #[test]
    fn freeze_and_thaw_gates_are_strict() {
        assert_eq!(score_day(-0.1, 2.1).0, Rating::Fair);
        assert_eq!(score_day(-0.1, 2.0).0, Rating::Poor);
    }

    #[test]
    fn custom_thresholds_shift_the_gate() {
        let thresholds = RatingThresholds {
            thaw_above: 5.0,
            ..RatingThresholds::default()
        };
        assert_eq!(thresholds.rate(-4.0, 4.5), Rating::Poor);
        assert_eq!(thresholds.rate(-4.0, 6.0), Rating::Excellent);
    }

    #[test]
    fn missing_temperature_rates_unknown() {
        let day = DailyForecast {
            date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            low_c: Some(-4.0),
            high_c: None,
            summary: "Snow".into(),
            icon: "13d".into(),
        };
        let rated = RatingThresholds::default().rate_forecast(&day);
        assert_eq!(rated.rating, Rating::Unknown);
        assert_eq!(rated.score, 0);
        assert_eq!(rated.summary, "Snow");
    }
}
