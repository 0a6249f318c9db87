use crate::config::ScanConfig;
use crate::error::{ProcessingError, Result};
use crate::models::Segment;
use crate::utils::constants::NEW_LINE;
use tracing::debug;

/// Splits a file into newline-aligned segments of roughly `chunk_size` bytes.
pub struct Segmenter {
    chunk_size: u64,
    max_line_size: usize,
}

impl Segmenter {
    pub fn new(chunk_size: u64, max_line_size: usize) -> Self {
        Self {
            chunk_size,
            max_line_size,
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.chunk_size, config.max_line_size)
    }

    /// Cover `bytes` with contiguous, non-overlapping segments in file order.
    ///
    /// Each segment is extended from its proposed end to just past the next
    /// newline, so no record is split. A segment that runs into end of file
    /// without a newline is accepted only if its last line is no longer than
    /// `max_line_size`.
    pub fn segment(&self, bytes: &[u8]) -> Result<Vec<Segment>> {
        if self.chunk_size == 0 || self.max_line_size == 0 {
            return Err(ProcessingError::Config(
                "chunk size and max line size must be positive".to_string(),
            ));
        }

        let file_size = bytes.len();
        let chunk_size = usize::try_from(self.chunk_size).unwrap_or(usize::MAX);
        let mut segments = Vec::with_capacity(file_size / chunk_size + 1);
        let mut position = 0usize;

        while position < file_size {
            let proposed_end = position.saturating_add(chunk_size).min(file_size);
            let end = if proposed_end == file_size {
                self.check_unterminated_tail(bytes, position)?;
                file_size
            } else {
                self.extend_to_newline(bytes, position, proposed_end)?
            };

            segments.push(Segment::new(position as u64, (end - position) as u64));
            position = end;
        }

        debug!(
            file_size,
            chunk_size = self.chunk_size,
            segments = segments.len(),
            "Segmented input"
        );

        Ok(segments)
    }

    /// Find the end of the line containing byte `proposed_end - 1`.
    fn extend_to_newline(&self, bytes: &[u8], position: usize, proposed_end: usize) -> Result<usize> {
        let search_from = proposed_end - 1;
        // Room for a full line plus its terminator
        let search_to = search_from
            .saturating_add(self.max_line_size)
            .saturating_add(1)
            .min(bytes.len());

        match bytes[search_from..search_to].iter().position(|&b| b == NEW_LINE) {
            Some(offset) => Ok(search_from + offset + 1),
            None if search_to == bytes.len() => {
                self.check_unterminated_tail(bytes, position)?;
                Ok(bytes.len())
            }
            None => Err(ProcessingError::Segmentation {
                offset: line_start(bytes, position, search_from) as u64,
                max_line_size: self.max_line_size,
            }),
        }
    }

    /// A final line without a newline must still fit the line-length bound.
    fn check_unterminated_tail(&self, bytes: &[u8], position: usize) -> Result<()> {
        if bytes.last().map_or(true, |&b| b == NEW_LINE) {
            return Ok(());
        }

        let line_start = line_start(bytes, position, bytes.len());
        if bytes.len() - line_start > self.max_line_size {
            return Err(ProcessingError::Segmentation {
                offset: line_start as u64,
                max_line_size: self.max_line_size,
            });
        }

        Ok(())
    }
}

/// Start of the line holding `index`. Segments always begin on a line start.
fn line_start(bytes: &[u8], position: usize, index: usize) -> usize {
    bytes[position..index]
        .iter()
        .rposition(|&b| b == NEW_LINE)
        .map_or(position, |offset| position + offset + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &[u8] = b"Hamburg;12.0\nBulawayo;8.9\nPalembang;38.8\nHamburg;14.0\n";

    fn assert_covers(segments: &[Segment], bytes: &[u8]) {
        let mut expected_start = 0;
        for segment in segments {
            assert_eq!(segment.start, expected_start);
            assert!(!segment.is_empty());
            let slice = &bytes[segment.range()];
            if segment.end() < bytes.len() as u64 {
                assert_eq!(slice.last(), Some(&NEW_LINE));
            }
            expected_start = segment.end();
        }
        assert_eq!(expected_start, bytes.len() as u64);
    }

    #[test]
    fn test_empty_input_has_no_segments() -> Result<()> {
        let segments = Segmenter::new(16, 300).segment(b"")?;
        assert!(segments.is_empty());
        Ok(())
    }

    #[test]
    fn test_whole_file_in_one_segment() -> Result<()> {
        let segments = Segmenter::new(1 << 20, 300).segment(SAMPLE)?;
        assert_eq!(segments, vec![Segment::new(0, SAMPLE.len() as u64)]);
        Ok(())
    }

    #[test]
    fn test_segments_extend_to_newline() -> Result<()> {
        let segments = Segmenter::new(4, 300).segment(SAMPLE)?;
        assert_eq!(
            segments,
            vec![
                Segment::new(0, 13),
                Segment::new(13, 13),
                Segment::new(26, 15),
                Segment::new(41, 13),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_boundary_on_newline_is_kept() -> Result<()> {
        // First proposed chunk ends exactly on the newline
        let segments = Segmenter::new(13, 300).segment(SAMPLE)?;
        assert_eq!(segments[0], Segment::new(0, 13));
        assert_covers(&segments, SAMPLE);
        Ok(())
    }

    #[test]
    fn test_coverage_for_every_chunk_size() -> Result<()> {
        for chunk_size in 1..=SAMPLE.len() as u64 + 2 {
            let segments = Segmenter::new(chunk_size, 300).segment(SAMPLE)?;
            assert_covers(&segments, SAMPLE);
        }
        Ok(())
    }

    #[test]
    fn test_short_unterminated_last_line_accepted() -> Result<()> {
        let bytes = b"Hamburg;12.0\nBulawayo;8.9";
        for chunk_size in 1..=bytes.len() as u64 {
            let segments = Segmenter::new(chunk_size, 300).segment(bytes)?;
            assert_covers(&segments, bytes);
        }
        Ok(())
    }

    #[test]
    fn test_long_unterminated_last_line_rejected() {
        let mut bytes = b"Hamburg;12.0\n".to_vec();
        bytes.extend(std::iter::repeat(b'X').take(400));

        for chunk_size in [4, 20, 1 << 20] {
            let err = Segmenter::new(chunk_size, 100).segment(&bytes).unwrap_err();
            assert!(
                matches!(err, ProcessingError::Segmentation { max_line_size: 100, .. }),
                "chunk size {chunk_size}: {err}"
            );
        }
    }

    #[test]
    fn test_line_longer_than_bound_rejected_mid_file() {
        let mut bytes = b"Hamburg;12.0\n".to_vec();
        bytes.extend(std::iter::repeat(b'Y').take(50));
        bytes.extend_from_slice(b";1.0\nBulawayo;8.9\n");

        // Boundary lands two bytes into the long line; the error names its start
        let err = Segmenter::new(16, 20).segment(&bytes).unwrap_err();
        assert!(matches!(err, ProcessingError::Segmentation { offset: 13, .. }));
    }

    #[test]
    fn test_zero_chunk_size_fails_fast() {
        assert!(Segmenter::new(0, 300).segment(SAMPLE).is_err());
    }
}
