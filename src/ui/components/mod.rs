pub mod gauge;

pub use gauge::{favorable_gauge, temperature_gauge};
