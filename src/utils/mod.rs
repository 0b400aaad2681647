pub mod constants;
pub mod dates;
pub mod progress;
pub mod stats;

pub use constants::*;
pub use dates::parse_calendar_date;
pub use progress::ProgressReporter;
pub use stats::MeanAccumulator;
