use super::dates::format_display_date;
use super::RatingThresholds;
use crate::models::{ForecastDay, Recommendation, RecommendationKind, TapWindow};

/// Average window score at which conditions read as excellent
const EXCELLENT_AVG_SCORE: f64 = 2.5;

/// Classify the forecast into a single recommendation
///
/// Decision order:
/// - no window: season over, then too cold, then no window. The freeze and
///   thaw gates are the same ones the day rating used.
/// - a 1-day window is never actionable
/// - a window starting on the first forecast day means tap now, otherwise upcoming
///
/// An empty `days` slice yields `SeasonOver` (nothing contradicts "no freezing nights").
pub fn generate_recommendation(
    days: &[ForecastDay],
    window: Option<&TapWindow>,
    thresholds: &RatingThresholds,
) -> Recommendation {
    let window = match window {
        Some(w) if !w.is_empty() => w,
        _ => return classify_without_window(days, thresholds),
    };

    let is_today = days.first().map(|d| d.date) == Some(window.start);
    let len = window.len();

    if len == 1 {
        let message = if is_today {
            "Only a 1-day window today. A single freeze-thaw day won't yield much sap, \
             so wait for a longer stretch."
                .to_string()
        } else {
            format!(
                "Only a 1-day window coming {}. Wait for a longer stretch before tapping.",
                format_display_date(window.start)
            )
        };
        return Recommendation::new(RecommendationKind::NoWindow, message);
    }

    let quality = if window.average_score() >= EXCELLENT_AVG_SCORE {
        "excellent"
    } else {
        "good"
    };

    if is_today {
        let mut message = format!(
            "Tap now! Conditions are {} for the next {} days.",
            quality, len
        );
        if len >= 3 {
            message.push_str(" Great stretch for sap flow!");
        }
        Recommendation::new(RecommendationKind::TapNow, message)
    } else {
        let prefix = if len == 2 { "Good window" } else { "Great window" };
        let message = format!(
            "{} coming {}: {} days of {} freeze-thaw conditions. Get your taps ready.",
            prefix,
            format_display_date(window.start),
            len,
            quality
        );
        Recommendation::new(RecommendationKind::Upcoming, message)
    }
}

fn classify_without_window(days: &[ForecastDay], thresholds: &RatingThresholds) -> Recommendation {
    let no_freeze = days
        .iter()
        .filter_map(|d| d.low_c)
        .all(|low| low > thresholds.freeze_below);
    if no_freeze {
        return Recommendation::new(
            RecommendationKind::SeasonOver,
            "No freezing nights in the forecast. Sap flow has likely ended for the season.",
        );
    }

    let no_thaw = days
        .iter()
        .filter_map(|d| d.high_c)
        .all(|high| high <= thresholds.thaw_above);
    if no_thaw {
        return Recommendation::new(
            RecommendationKind::TooCold,
            format!(
                "Highs stay at or below {}°C all week. Sap won't run until daytime \
                 temperatures climb above freezing.",
                thresholds.thaw_above
            ),
        );
    }

    Recommendation::new(
        RecommendationKind::NoWindow,
        "Conditions are mixed. No run of good freeze-thaw days in the forecast yet, \
         so keep watching.",
    )
}
