pub mod aggregate_merger;
pub mod consistency_checker;
pub mod parallel_processor;

pub use aggregate_merger::AggregateMerger;
pub use consistency_checker::{ConsistencyChecker, ConsistencyReport, MismatchType, StationMismatch};
pub use parallel_processor::ParallelProcessor;
