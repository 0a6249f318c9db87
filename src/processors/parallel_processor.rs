use crate::config::ScanConfig;
use crate::error::{ProcessingError, Result};
use crate::models::{ChunkAggregates, MergedAggregates, Segment};
use crate::processors::AggregateMerger;
use crate::readers::{ChunkScanner, MeasurementFile, Segmenter};
use crate::utils::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_LINE_SIZE};
use crate::utils::progress::ProgressReporter;
use rayon::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, info};

/// Segment, scan in parallel, then merge.
pub struct ParallelProcessor {
    max_workers: usize,
    chunk_size: u64,
    max_line_size: usize,
}

impl ParallelProcessor {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_line_size: DEFAULT_MAX_LINE_SIZE,
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.max_workers)
            .with_chunk_size(config.chunk_size)
            .with_max_line_size(config.max_line_size)
    }

    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_max_line_size(mut self, max_line_size: usize) -> Self {
        self.max_line_size = max_line_size;
        self
    }

    pub fn segmenter(&self) -> Segmenter {
        Segmenter::new(self.chunk_size, self.max_line_size)
    }

    /// Map the file read-only and aggregate it.
    pub fn process_file(
        &self,
        path: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<MergedAggregates> {
        let started = Instant::now();
        let file = MeasurementFile::open(path)?;
        info!(path = %path.display(), bytes = file.len(), "Mapped input file");

        let merged = self.process_bytes(file.as_bytes(), progress)?;

        info!(
            stations = merged.len(),
            records = merged.total_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Aggregation complete"
        );
        Ok(merged)
    }

    /// Aggregate an in-memory buffer holding the whole file.
    pub fn process_bytes(
        &self,
        bytes: &[u8],
        progress: Option<&ProgressReporter>,
    ) -> Result<MergedAggregates> {
        if let Some(p) = progress {
            p.set_message("Segmenting input...");
        }
        let segments = self.segmenter().segment(bytes)?;

        let chunks = self.scan_segments(bytes, &segments, progress)?;

        if let Some(p) = progress {
            p.set_message("Merging station aggregates...");
        }
        let merged = AggregateMerger::new().merge(chunks)?;

        if let Some(p) = progress {
            p.finish_with_message(&format!("Aggregated {} stations", merged.len()));
        }
        Ok(merged)
    }

    /// Scan every segment on a dedicated pool. All scans finish before this
    /// returns; the first failure fails the whole call.
    pub fn scan_segments<'a>(
        &self,
        bytes: &'a [u8],
        segments: &[Segment],
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<ChunkAggregates<'a>>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| ProcessingError::Config(e.to_string()))?;

        debug!(
            workers = pool.current_num_threads(),
            segments = segments.len(),
            "Scanning segments"
        );

        if let Some(p) = progress {
            p.set_length(segments.len() as u64);
            p.set_message(&format!("Scanning {} segments...", segments.len()));
        }

        let scanner = ChunkScanner::new(self.max_line_size);
        let scanned = AtomicUsize::new(0);

        pool.install(|| {
            segments
                .par_iter()
                .map(|segment| {
                    let result = scanner.scan_segment(bytes, segment);

                    let count = scanned.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(p) = progress {
                        p.update(count as u64);
                    }

                    result
                })
                .collect()
        })
    }
}

impl Default for ParallelProcessor {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}
