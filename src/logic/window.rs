use crate::models::{ForecastDay, TapWindow};

/// Find the best contiguous run of favorable days (score >= 2)
///
/// Longer runs always win; equal-length runs are decided by total score.
/// On a full tie the earlier run is kept.
pub fn find_best_window(days: &[ForecastDay]) -> Option<TapWindow> {
    let mut best: Option<TapWindow> = None;
    let mut current: Option<TapWindow> = None;

    for day in days {
        if day.is_favorable() {
            match current.as_mut() {
                Some(run) => run.extend(day.clone()),
                None => current = Some(TapWindow::open(day.clone())),
            }
        } else if let Some(run) = current.take() {
            best = Some(pick_better(best, run));
        }
    }

    if let Some(run) = current.take() {
        best = Some(pick_better(best, run));
    }

    best
}

fn pick_better(best: Option<TapWindow>, candidate: TapWindow) -> TapWindow {
    match best {
        None => candidate,
        Some(best) => {
            let longer = candidate.len() > best.len();
            let same_len_higher =
                candidate.len() == best.len() && candidate.total_score > best.total_score;
            if longer || same_len_higher {
                candidate
            } else {
                best
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rating;
    use chrono::NaiveDate;

    fn days(ratings: &[Rating]) -> Vec<ForecastDay> {
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        ratings
            .iter()
            .enumerate()
            .map(|(i, rating)| {
                let date = start + chrono::Days::new(i as u64);
                ForecastDay::new(date, Some(-4.0), Some(6.0), "", "", *rating)
            })
            .collect()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    use Rating::{Excellent, Fair, Good, Poor, Unknown};

    #[test]
    fn empty_input_has_no_window() {
        assert!(find_best_window(&[]).is_none());
    }

    #[test]
    fn poor_and_fair_days_never_open_a_run() {
        assert!(find_best_window(&days(&[Poor, Poor, Poor])).is_none());
        assert!(find_best_window(&days(&[Fair, Fair, Fair, Fair])).is_none());
        assert!(find_best_window(&days(&[Unknown, Fair, Poor])).is_none());
    }

    #[test]
    fn run_closed_by_poor_day() {
        let window = find_best_window(&days(&[Excellent, Excellent, Excellent, Poor])).unwrap();
        assert_eq!(window.len(), 3);
        assert_eq!(window.start, date(1));
        assert_eq!(window.end, date(3));
        assert_eq!(window.total_score, 9);
    }

    #[test]
    fn equal_length_prefers_higher_total() {
        let window = find_best_window(&days(&[Good, Good, Poor, Excellent, Excellent])).unwrap();
        assert_eq!(window.len(), 2);
        assert_eq!(window.total_score, 6);
        assert_eq!(window.start, date(4));
    }

    #[test]
    fn longer_run_beats_higher_average() {
        let window =
            find_best_window(&days(&[Excellent, Excellent, Fair, Good, Good, Good])).unwrap();
        assert_eq!(window.len(), 3);
        assert_eq!(window.total_score, 6);
        assert_eq!(window.start, date(4));
        assert_eq!(window.end, date(6));
    }

    #[test]
    fn full_tie_keeps_earlier_run() {
        let window = find_best_window(&days(&[Good, Good, Poor, Good, Good])).unwrap();
        assert_eq!(window.start, date(1));
    }

    #[test]
    fn single_qualifying_day() {
        let window = find_best_window(&days(&[Poor, Good, Fair])).unwrap();
        assert_eq!(window.len(), 1);
        assert_eq!(window.start, date(2));
        assert_eq!(window.end, date(2));
        assert_eq!(window.total_score, 2);
    }

    #[test]
    fn unknown_days_break_runs() {
        let window = find_best_window(&days(&[Good, Unknown, Excellent, Excellent])).unwrap();
        assert_eq!(window.start, date(3));
        assert_eq!(window.len(), 2);
    }

    #[test]
    fn members_are_all_favorable() {
        let window =
            find_best_window(&days(&[Fair, Excellent, Good, Excellent, Poor, Good])).unwrap();
        assert!(window.days.iter().all(|d| d.score >= 2));
        assert_eq!(window.total_score, 8);
        assert!((window.average_score() - 8.0 / 3.0).abs() < 1e-9);
    }
}
