pub mod data_sync;
pub mod dates;
pub mod rating;
pub mod recommendation;
pub mod report;
pub mod season;
pub mod window;

pub use data_sync::ReportService;
pub use dates::{doy_to_date, format_display_date};
pub use rating::{score_day, RatingThresholds};
pub use recommendation::generate_recommendation;
pub use report::build_report;
pub use season::{get_season_info, season_doys, SEASON_REFERENCE_POINTS};
pub use window::find_best_window;
