use crate::error::{ProcessingError, Result};
use crate::models::{AggregateRecord, MergedAggregates};
use crate::utils::constants::{FORMAT_BRACED, FORMAT_JSON, FORMAT_LINES, TENTHS_PER_DEGREE};
use crate::utils::fixed_point::Tenths;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// `{Abha=-3.4/0.8/5.0, Bulawayo=8.9/8.9/8.9}` on one line
    Braced,
    /// One `station=min/mean/max` per line
    Lines,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            FORMAT_BRACED => Ok(ReportFormat::Braced),
            FORMAT_LINES => Ok(ReportFormat::Lines),
            FORMAT_JSON => Ok(ReportFormat::Json),
            _ => Err(ProcessingError::Config(format!(
                "Unsupported report format: {}",
                s
            ))),
        }
    }
}

#[derive(Serialize)]
struct StationRow<'a> {
    station: &'a str,
    min: f64,
    mean: f64,
    max: f64,
    count: u64,
}

/// Renders merged aggregates, already in name order, as min/mean/max text.
pub struct ReportWriter {
    format: ReportFormat,
}

impl ReportWriter {
    pub fn new() -> Self {
        Self {
            format: ReportFormat::Braced,
        }
    }

    pub fn with_format(mut self, format: &str) -> Result<Self> {
        self.format = format.parse()?;
        Ok(self)
    }

    pub fn write<W: Write>(&self, merged: &MergedAggregates, out: &mut W) -> Result<()> {
        match self.format {
            ReportFormat::Braced => {
                write!(out, "{{")?;
                for (i, (station, record)) in merged.iter().enumerate() {
                    if i > 0 {
                        write!(out, ", ")?;
                    }
                    write!(out, "{}={}", station, summary(record))?;
                }
                writeln!(out, "}}")?;
            }
            ReportFormat::Lines => {
                for (station, record) in merged {
                    writeln!(out, "{}={}", station, summary(record))?;
                }
            }
            ReportFormat::Json => {
                let rows: Vec<StationRow<'_>> = merged
                    .iter()
                    .map(|(station, record)| StationRow {
                        station,
                        min: degrees(record.min.into()),
                        mean: degrees(record.mean_tenths()),
                        max: degrees(record.max.into()),
                        count: record.count,
                    })
                    .collect();
                serde_json::to_writer_pretty(&mut *out, &rows)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }

    pub fn write_to_path(&self, merged: &MergedAggregates, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut out = BufWriter::new(File::create(path)?);
        self.write(merged, &mut out)?;
        out.flush()?;
        Ok(())
    }

    pub fn render(&self, merged: &MergedAggregates) -> Result<String> {
        let mut buffer = Vec::new();
        self.write(merged, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| ProcessingError::Config(e.to_string()))
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// `min/mean/max` with one fractional digit each.
pub fn summary(record: &AggregateRecord) -> String {
    format!(
        "{}/{}/{}",
        Tenths(record.min.into()),
        Tenths(record.mean_tenths()),
        Tenths(record.max.into())
    )
}

fn degrees(tenths: i64) -> f64 {
    tenths as f64 / TENTHS_PER_DEGREE as f64
}
