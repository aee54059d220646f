use super::forecast::ForecastDay;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A contiguous run of favorable forecast days (score >= 2).
///
/// Only built by the window finder, which guarantees at least one member.
#[derive(Debug, Clone, PartialEq)]
pub struct TapWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: Vec<ForecastDay>,
    pub total_score: u32,
}

impl TapWindow {
    pub(crate) fn open(day: ForecastDay) -> Self {
        Self {
            start: day.date,
            end: day.date,
            total_score: day.score as u32,
            days: vec![day],
        }
    }

    pub(crate) fn extend(&mut self, day: ForecastDay) {
        self.end = day.date;
        self.total_score += day.score as u32;
        self.days.push(day);
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn average_score(&self) -> f64 {
        if self.days.is_empty() {
            0.0
        } else {
            self.total_score as f64 / self.days.len() as f64
        }
    }

    pub fn summary(&self) -> WindowSummary {
        WindowSummary {
            start_date: self.start,
            end_date: self.end,
            days: self.len(),
            avg_score: self.average_score(),
        }
    }
}

/// Presentation view of a window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: usize,
    pub avg_score: f64,
}

impl WindowSummary {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}
