use crate::config::Config;
use crate::models::TapReport;
use chrono::{Datelike, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Forecast,
    Season,
}

impl Screen {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Screen::Dashboard),
            '2' => Some(Screen::Forecast),
            '3' => Some(Screen::Season),
            _ => None,
        }
    }
}

pub struct ForecastState {
    pub selected_index: usize,
}

impl ForecastState {
    pub fn new() -> Self {
        Self { selected_index: 0 }
    }

    pub fn next(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }
}

pub struct SeasonState {
    pub year: i32,
}

impl SeasonState {
    pub fn new() -> Self {
        Self {
            year: Local::now().year(),
        }
    }

    pub fn prev_year(&mut self) {
        self.year -= 1;
    }

    pub fn next_year(&mut self) {
        self.year += 1;
    }
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    pub config: Config,

    pub report: Option<TapReport>,

    // Screen states
    pub forecast_state: ForecastState,
    pub season_state: SeasonState,

    // UI state
    pub status_message: Option<String>,
    pub needs_refresh: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            screen: Screen::Dashboard,
            should_quit: false,
            config,
            report: None,
            forecast_state: ForecastState::new(),
            season_state: SeasonState::new(),
            status_message: None,
            needs_refresh: false,
        }
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    pub fn request_refresh(&mut self) {
        self.needs_refresh = true;
        self.set_status("Refreshing forecast...");
    }

    pub fn update_report(&mut self, report: TapReport) {
        let days = report.days.len();
        self.report = Some(report);
        if self.forecast_state.selected_index >= days {
            self.forecast_state.selected_index = days.saturating_sub(1);
        }
    }

    pub fn day_count(&self) -> usize {
        self.report.as_ref().map(|r| r.days.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_keys() {
        assert_eq!(Screen::from_key('1'), Some(Screen::Dashboard));
        assert_eq!(Screen::from_key('2'), Some(Screen::Forecast));
        assert_eq!(Screen::from_key('3'), Some(Screen::Season));
        assert_eq!(Screen::from_key('4'), None);
    }

    #[test]
    fn forecast_selection_is_clamped() {
        let mut state = ForecastState::new();
        state.prev();
        assert_eq!(state.selected_index, 0);
        state.next(2);
        state.next(2);
        assert_eq!(state.selected_index, 1);
        state.next(0);
        assert_eq!(state.selected_index, 1);
    }
}
