use crate::error::{ParseErrorKind, ProcessingError, Result};
use crate::utils::constants::{DEFAULT_BUFFER_SIZE, NEW_LINE};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Floating-point statistics produced by the row-oriented reference reader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaselineStats {
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub count: u64,
}

impl BaselineStats {
    fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            sum: 0.0,
            count: 0,
        }
    }

    fn accept(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += value;
        self.count += 1;
    }

    pub fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// Straightforward line-by-line reader: split on `;`, parse as `f64`,
/// group into an ordered map. Slow, but shares no code with the fast path,
/// which makes it a useful oracle.
pub struct BaselineReader;

impl BaselineReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_file(&self, path: &Path) -> Result<BTreeMap<String, BaselineStats>> {
        let file = File::open(path).map_err(|source| ProcessingError::InputIo {
            path: path.to_path_buf(),
            source,
        })?;
        self.read(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file))
    }

    pub fn read<R: BufRead>(&self, mut reader: R) -> Result<BTreeMap<String, BaselineStats>> {
        let mut stations: BTreeMap<String, BaselineStats> = BTreeMap::new();
        let mut line = Vec::new();
        let mut offset = 0u64;

        loop {
            line.clear();
            let read = reader.read_until(NEW_LINE, &mut line)?;
            if read == 0 {
                break;
            }

            let record = line.strip_suffix(&[NEW_LINE]).unwrap_or(&line[..]);
            let record = std::str::from_utf8(record)
                .map_err(|_| line_error(offset, ParseErrorKind::InvalidStationName))?;
            let (station, value) = record
                .rsplit_once(';')
                .ok_or_else(|| line_error(offset, ParseErrorKind::MissingDelimiter))?;
            let value: f64 = value
                .parse()
                .map_err(|_| line_error(offset, ParseErrorKind::InvalidTemperature))?;

            match stations.get_mut(station) {
                Some(stats) => stats.accept(value),
                None => {
                    let mut stats = BaselineStats::new();
                    stats.accept(value);
                    stations.insert(station.to_string(), stats);
                }
            }

            offset += read as u64;
        }

        Ok(stations)
    }
}

impl Default for BaselineReader {
    fn default() -> Self {
        Self::new()
    }
}

fn line_error(offset: u64, kind: ParseErrorKind) -> ProcessingError {
    ProcessingError::Parse {
        segment_start: 0,
        offset,
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_groups_and_sorts() -> Result<()> {
        let input = "Hamburg;12.0\nBulawayo;8.9\nHamburg;14.0\n";
        let stations = BaselineReader::new().read(input.as_bytes())?;

        let names: Vec<&str> = stations.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Bulawayo", "Hamburg"]);

        let hamburg = stations["Hamburg"];
        assert_eq!(hamburg.count, 2);
        assert_eq!(hamburg.min, 12.0);
        assert_eq!(hamburg.max, 14.0);
        assert!((hamburg.mean() - 13.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_read_file() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "Abha;-3.4")?;
        write!(temp_file, "Abha;5.0")?;

        let stations = BaselineReader::new().read_file(temp_file.path())?;
        assert_eq!(stations["Abha"].count, 2);
        assert_eq!(stations["Abha"].min, -3.4);
        Ok(())
    }

    #[test]
    fn test_bad_value_reports_line_offset() {
        let input = "Hamburg;12.0\nBulawayo;warm\n";
        let err = BaselineReader::new().read(input.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ProcessingError::Parse {
                offset: 13,
                kind: ParseErrorKind::InvalidTemperature,
                ..
            }
        ));
    }
}
