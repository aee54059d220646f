use super::dates::{doy_to_date, format_display_date};
use crate::error::{Result, SapcastError};
use crate::models::{SeasonInfo, SeasonReferencePoint};

/// Typical tap-by and season-end day-of-year by latitude, ordered by latitude
pub const SEASON_REFERENCE_POINTS: [SeasonReferencePoint; 5] = [
    SeasonReferencePoint {
        latitude: 39.0,
        tap_by_doy: 45,
        season_end_doy: 59,
    },
    SeasonReferencePoint {
        latitude: 43.0,
        tap_by_doy: 65,
        season_end_doy: 79,
    },
    SeasonReferencePoint {
        latitude: 45.0,
        tap_by_doy: 76,
        season_end_doy: 90,
    },
    SeasonReferencePoint {
        latitude: 47.0,
        tap_by_doy: 94,
        season_end_doy: 108,
    },
    SeasonReferencePoint {
        latitude: 49.0,
        tap_by_doy: 104,
        season_end_doy: 118,
    },
];

/// Interpolated (tap-by, season-end) day-of-year for a latitude.
///
/// Southern latitudes mirror northern ones; anything outside the table is
/// clamped to its nearest endpoint.
pub fn season_doys(latitude: f64) -> (u32, u32) {
    let first = SEASON_REFERENCE_POINTS[0];
    let last = SEASON_REFERENCE_POINTS[SEASON_REFERENCE_POINTS.len() - 1];
    let lat = latitude.abs().clamp(first.latitude, last.latitude);

    if lat <= first.latitude {
        return (first.tap_by_doy, first.season_end_doy);
    }
    if lat >= last.latitude {
        return (last.tap_by_doy, last.season_end_doy);
    }

    for pair in SEASON_REFERENCE_POINTS.windows(2) {
        let (lower, upper) = (pair[0], pair[1]);
        if lat >= lower.latitude && lat <= upper.latitude {
            let t = (lat - lower.latitude) / (upper.latitude - lower.latitude);
            return (
                interpolate(lower.tap_by_doy, upper.tap_by_doy, t),
                interpolate(lower.season_end_doy, upper.season_end_doy, t),
            );
        }
    }

    // NaN latitude falls through every comparison
    (last.tap_by_doy, last.season_end_doy)
}

fn interpolate(lower: u32, upper: u32, t: f64) -> u32 {
    let value = lower as f64 + t * (upper as f64 - lower as f64);
    value.round() as u32
}

/// Typical season timing for a latitude in the given year
pub fn get_season_info(latitude: f64, year: i32) -> Result<SeasonInfo> {
    let (tap_by_doy, season_end_doy) = season_doys(latitude);

    let tap_by_date = doy_to_date(tap_by_doy, year)
        .ok_or_else(|| SapcastError::InvalidData(format!("Unsupported year: {}", year)))?;
    let season_end_date = doy_to_date(season_end_doy, year)
        .ok_or_else(|| SapcastError::InvalidData(format!("Unsupported year: {}", year)))?;

    let message = format!(
        "At your latitude the season typically ends around {}. If no ideal window \
         shows up, tap by {} anyway. Tapping early doesn't reduce your yield.",
        format_display_date(season_end_date),
        format_display_date(tap_by_date)
    );

    Ok(SeasonInfo {
        tap_by_date,
        season_end_date,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_endpoints_are_used_directly() {
        let info = get_season_info(39.0, 2025).unwrap();
        assert_eq!(Some(info.tap_by_date), doy_to_date(45, 2025));
        assert_eq!(Some(info.season_end_date), doy_to_date(59, 2025));

        let info = get_season_info(49.0, 2025).unwrap();
        assert_eq!(Some(info.tap_by_date), doy_to_date(104, 2025));
        assert_eq!(Some(info.season_end_date), doy_to_date(118, 2025));
    }

    #[test]
    fn interpolates_between_reference_points() {
        assert_eq!(season_doys(41.0), (55, 69));
        assert_eq!(season_doys(44.0), (71, 85)); // 70.5 and 84.5 round up
        assert_eq!(season_doys(46.0), (85, 99));
        assert_eq!(season_doys(43.0), (65, 79));
    }

    #[test]
    fn latitude_is_clamped() {
        assert_eq!(season_doys(55.0), season_doys(49.0));
        assert_eq!(season_doys(80.0), (104, 118));
        assert_eq!(season_doys(20.0), season_doys(39.0));
        assert_eq!(season_doys(0.0), (45, 59));
    }

    #[test]
    fn southern_hemisphere_mirrors_north() {
        assert_eq!(season_doys(-45.0), season_doys(45.0));
        assert_eq!(
            get_season_info(-45.0, 2025).unwrap(),
            get_season_info(45.0, 2025).unwrap()
        );
        assert_eq!(
            get_season_info(55.0, 2025).unwrap(),
            get_season_info(49.0, 2025).unwrap()
        );
    }

    #[test]
    fn leap_year_moves_dates() {
        // Day 65 lands on Mar 5 in a leap year, Mar 6 otherwise
        let leap = get_season_info(43.0, 2024).unwrap();
        let common = get_season_info(43.0, 2025).unwrap();
        assert_eq!(leap.tap_by_date.to_string(), "2024-03-05");
        assert_eq!(common.tap_by_date.to_string(), "2025-03-06");
    }

    #[test]
    fn message_names_both_dates() {
        let info = get_season_info(39.0, 2025).unwrap();
        // Day 45 = Feb 14, day 59 = Feb 28 in 2025
        assert!(info.message.contains("Fri, Feb 28"));
        assert!(info.message.contains("Fri, Feb 14"));
    }

    #[test]
    fn unsupported_year_is_an_error() {
        assert!(get_season_info(44.0, i32::MAX).is_err());
    }
}
