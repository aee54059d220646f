pub mod forecast;
pub mod recommendation;
pub mod report;
pub mod season;
pub mod window;

pub use forecast::*;
pub use recommendation::*;
pub use report::*;
pub use season::*;
pub use window::*;
