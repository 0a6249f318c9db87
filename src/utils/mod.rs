pub mod constants;
pub mod fixed_point;
pub mod progress;

pub use constants::*;
pub use fixed_point::{format_tenths, parse_temperature, rounded_mean_tenths};
pub use progress::ProgressReporter;
