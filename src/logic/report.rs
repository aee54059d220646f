use super::{find_best_window, generate_recommendation, get_season_info, RatingThresholds};
use crate::error::{Result, SapcastError};
use crate::models::{ForecastDay, TapReport, WeatherForecast};
use chrono::{Datelike, Utc};

/// Rate every forecast day and assemble the full report
pub fn build_report(forecast: &WeatherForecast, thresholds: &RatingThresholds) -> Result<TapReport> {
    if forecast.daily.is_empty() {
        return Err(SapcastError::DataSourceUnavailable(
            "forecast contained no days".into(),
        ));
    }

    let days: Vec<ForecastDay> = forecast
        .daily
        .iter()
        .map(|d| thresholds.rate_forecast(d))
        .collect();

    let window = find_best_window(&days);
    let recommendation = generate_recommendation(&days, window.as_ref(), thresholds);

    let season_year = days[0].date.year();
    let season = get_season_info(forecast.latitude, season_year)?;

    tracing::debug!(
        days = days.len(),
        window_days = window.as_ref().map(|w| w.len()).unwrap_or(0),
        lowest_c = ?forecast.min_low_c(),
        highest_c = ?forecast.max_high_c(),
        recommendation = %recommendation.kind,
        "Built tap report"
    );

    Ok(TapReport {
        latitude: forecast.latitude,
        longitude: forecast.longitude,
        generated_at: Utc::now(),
        current: forecast.current.clone(),
        today: days.first().cloned(),
        best_window: window.map(|w| w.summary()),
        days,
        recommendation,
        season,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrentConditions, DailyForecast, Rating, RecommendationKind};
    use chrono::NaiveDate;

    fn forecast(temps: &[(f64, f64)]) -> WeatherForecast {
        let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        WeatherForecast {
            fetched_at: Utc::now(),
            latitude: 44.0,
            longitude: -72.5,
            timezone_offset_secs: -14400,
            current: Some(CurrentConditions {
                temp_c: -1.5,
                summary: "light snow".into(),
                icon: "13d".into(),
            }),
            daily: temps
                .iter()
                .enumerate()
                .map(|(i, (low, high))| DailyForecast {
                    date: start + chrono::Days::new(i as u64),
                    low_c: Some(*low),
                    high_c: Some(*high),
                    summary: "Expect a day of partly cloudy skies".into(),
                    icon: "02d".into(),
                })
                .collect(),
        }
    }

    #[test]
    fn report_bundles_window_and_recommendation() {
        let forecast = forecast(&[(-4.0, 6.0), (-5.0, 8.0), (-3.0, 7.0), (2.0, 12.0)]);
        let report = build_report(&forecast, &RatingThresholds::default()).unwrap();

        assert_eq!(report.days.len(), 4);
        assert_eq!(report.today.as_ref().unwrap().rating, Rating::Excellent);
        assert_eq!(report.recommendation.kind, RecommendationKind::TapNow);

        let window = report.best_window.unwrap();
        assert_eq!(window.days, 3);
        assert_eq!(window.start_date, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert_eq!(window.end_date, NaiveDate::from_ymd_opt(2025, 3, 12).unwrap());
        assert!((window.avg_score - 3.0).abs() < 1e-9);

        assert_eq!(report.current.unwrap().summary, "light snow");
        // Latitude 44 interpolates to day 71 / 85
        assert_eq!(report.season.tap_by_date.to_string(), "2025-03-12");
        assert_eq!(report.season.season_end_date.to_string(), "2025-03-26");
    }

    #[test]
    fn report_without_window() {
        let forecast = forecast(&[(3.0, 12.0), (4.0, 15.0)]);
        let report = build_report(&forecast, &RatingThresholds::default()).unwrap();
        assert!(report.best_window.is_none());
        assert_eq!(report.recommendation.kind, RecommendationKind::SeasonOver);
        assert_eq!(report.favorable_days(), 0);
    }

    #[test]
    fn empty_forecast_is_refused() {
        let forecast = forecast(&[]);
        let err = build_report(&forecast, &RatingThresholds::default()).unwrap_err();
        assert!(matches!(err, SapcastError::DataSourceUnavailable(_)));
    }

    #[test]
    fn report_serializes_for_the_api() {
        let forecast = forecast(&[(-4.0, 6.0), (-5.0, 8.0)]);
        let report = build_report(&forecast, &RatingThresholds::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["recommendation"]["type"], "tap_now");
        assert_eq!(json["days"][0]["rating"], "excellent");
        assert_eq!(json["days"][0]["date"], "2025-03-10");
        assert_eq!(json["best_window"]["days"], 2);
    }
}
