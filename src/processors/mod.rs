pub mod integrity_checker;
pub mod pipeline;
pub mod profile_aggregator;
pub mod reconciler;
pub mod rollup_aggregator;

pub use integrity_checker::{
    IntegrityChecker, IntegrityReport, IntegrityViolation, RecordSource, ViolationType,
};
pub use pipeline::{DashboardData, Pipeline};
pub use profile_aggregator::ProfileAggregator;
pub use reconciler::{JoinReport, Reconciler};
pub use rollup_aggregator::RollupAggregator;
