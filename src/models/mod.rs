pub mod daily;
pub mod hourly;
pub mod merged;
pub mod profile;
pub mod rollup;

pub use daily::DailyRecord;
pub use hourly::HourlyRecord;
pub use merged::MergedRecord;
pub use profile::{CategoryField, CategoryProfile, HourlyProfile, MonthlyProfile};
pub use rollup::DailyRollup;
