pub mod aggregate;
pub mod segment;
pub mod station;

pub use aggregate::{AggregateRecord, ChunkAggregates, MergedAggregates};
pub use segment::Segment;
pub use station::StationKey;
