pub mod rental_analyzer;

pub use rental_analyzer::{RentalAnalyzer, RentalSummary};
