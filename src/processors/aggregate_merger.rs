use crate::error::{ProcessingError, Result};
use crate::models::{ChunkAggregates, MergedAggregates};

/// Folds per-segment aggregates into one name-ordered result.
///
/// Runs on a single thread after every scan has finished, so the merged map
/// has exactly one writer. The result does not depend on the order in which
/// chunks arrive.
pub struct AggregateMerger;

impl AggregateMerger {
    pub fn new() -> Self {
        Self
    }

    pub fn merge<'a, I>(&self, chunks: I) -> Result<MergedAggregates>
    where
        I: IntoIterator<Item = ChunkAggregates<'a>>,
    {
        let mut merged = MergedAggregates::new();
        for chunk in chunks {
            self.merge_into(&mut merged, &chunk)?;
        }
        Ok(merged)
    }

    pub fn merge_into(&self, merged: &mut MergedAggregates, chunk: &ChunkAggregates<'_>) -> Result<()> {
        for (key, record) in chunk {
            let name = key.as_str().ok_or_else(|| {
                ProcessingError::DataMerge(format!(
                    "station name is not valid UTF-8: {:?}",
                    String::from_utf8_lossy(key.as_bytes())
                ))
            })?;
            merged.fold_station(name, record);
        }
        Ok(())
    }
}

impl Default for AggregateMerger {
    fn default() -> Self {
        Self::new()
    }
}
