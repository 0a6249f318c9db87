use serde::Serialize;
use std::ops::Range;

/// Half-open byte range `[start, start + size)` of the input file.
///
/// Produced by the segmenter so that every segment begins at offset 0 or just
/// after a newline and ends just after a newline or at end of file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub start: u64,
    pub size: u64,
}

impl Segment {
    pub fn new(start: u64, size: u64) -> Self {
        Self { start, size }
    }

    /// Exclusive end offset.
    pub fn end(&self) -> u64 {
        self.start + self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The segment as a slice range into a mapped file.
    pub fn range(&self) -> Range<usize> {
        self.start as usize..self.end() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_bounds() {
        let segment = Segment::new(13, 7);
        assert_eq!(segment.end(), 20);
        assert_eq!(segment.range(), 13..20);
        assert!(!segment.is_empty());
        assert!(Segment::new(4, 0).is_empty());
    }
}
