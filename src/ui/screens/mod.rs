pub mod dashboard;
pub mod forecast;
pub mod season;

pub use dashboard::DashboardScreen;
pub use forecast::ForecastScreen;
pub use season::SeasonScreen;
