use crate::error::{ParseErrorKind, ProcessingError, Result};
use crate::models::{AggregateRecord, ChunkAggregates, Segment, StationKey};
use crate::utils::constants::{DEFAULT_MAX_LINE_SIZE, EXPECTED_STATIONS, NEW_LINE, SEMI_COLON};
use crate::utils::fixed_point::parse_temperature;
use std::collections::hash_map::Entry;

/// Aggregates the records of one segment without allocating per record.
///
/// Station names are borrowed straight from the mapped input; a name is only
/// checked for UTF-8 the first time it is seen in the segment. Every record
/// is held to `max_line_size`, whichever segment it falls in.
pub struct ChunkScanner {
    max_line_size: usize,
}

impl ChunkScanner {
    pub fn new(max_line_size: usize) -> Self {
        Self { max_line_size }
    }

    /// Scan `bytes[segment.start..segment.end()]` and nothing else.
    pub fn scan_segment<'a>(&self, bytes: &'a [u8], segment: &Segment) -> Result<ChunkAggregates<'a>> {
        let chunk = bytes.get(segment.range()).ok_or_else(|| {
            ProcessingError::Config(format!(
                "segment {}..{} is outside the {}-byte input",
                segment.start,
                segment.end(),
                bytes.len()
            ))
        })?;

        let mut aggregates =
            ChunkAggregates::with_capacity_and_hasher(EXPECTED_STATIONS, Default::default());

        let limit = chunk.len();
        let mut start = 0;
        while start < limit {
            // One pass finds both the last ';' and the end of the record
            let mut cursor = start;
            let mut semi = None;
            while cursor < limit {
                let b = chunk[cursor];
                if b == NEW_LINE {
                    break;
                }
                if b == SEMI_COLON {
                    semi = Some(cursor);
                }
                cursor += 1;
            }

            if cursor - start > self.max_line_size {
                return Err(ProcessingError::Segmentation {
                    offset: segment.start + start as u64,
                    max_line_size: self.max_line_size,
                });
            }

            let semi = semi
                .ok_or_else(|| parse_error(segment, start, ParseErrorKind::MissingDelimiter))?;
            let name = &chunk[start..semi];
            if name.is_empty() {
                return Err(parse_error(segment, start, ParseErrorKind::InvalidStationName));
            }
            let value = parse_temperature(&chunk[semi + 1..cursor])
                .ok_or_else(|| parse_error(segment, start, ParseErrorKind::InvalidTemperature))?;

            match aggregates.entry(StationKey::new(name)) {
                Entry::Occupied(mut entry) => entry.get_mut().observe(value),
                Entry::Vacant(entry) => {
                    if std::str::from_utf8(name).is_err() {
                        return Err(parse_error(segment, start, ParseErrorKind::InvalidStationName));
                    }
                    entry.insert(AggregateRecord::new(value));
                }
            }

            start = cursor + 1;
        }

        Ok(aggregates)
    }
}

impl Default for ChunkScanner {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINE_SIZE)
    }
}

fn parse_error(segment: &Segment, record_start: usize, kind: ParseErrorKind) -> ProcessingError {
    ProcessingError::Parse {
        segment_start: segment.start,
        offset: segment.start + record_start as u64,
        kind,
    }
}
