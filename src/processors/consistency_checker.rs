use crate::models::MergedAggregates;
use crate::readers::BaselineStats;
use crate::utils::fixed_point::Tenths;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct ConsistencyReport {
    pub stations_checked: usize,
    pub records_checked: u64,
    pub mismatches: Vec<StationMismatch>,
}

#[derive(Debug, Clone)]
pub struct StationMismatch {
    pub station: String,
    pub mismatch_type: MismatchType,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchType {
    MissingFromFastPath,
    MissingFromBaseline,
    Count,
    Min,
    Max,
    Mean,
}

impl ConsistencyReport {
    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty()
    }

    fn push(&mut self, station: &str, mismatch_type: MismatchType, details: String) {
        self.mismatches.push(StationMismatch {
            station: station.to_string(),
            mismatch_type,
            details,
        });
    }
}

/// Compares fixed-point aggregates against the floating-point baseline.
pub struct ConsistencyChecker {
    /// Allowed gap between the two means, in tenths. Covers rounding of the
    /// fixed-point mean plus float accumulation error in the baseline.
    mean_tolerance: f64,
}

impl ConsistencyChecker {
    pub fn new() -> Self {
        Self {
            mean_tolerance: 0.5 + 1e-6,
        }
    }

    pub fn check(
        &self,
        merged: &MergedAggregates,
        baseline: &BTreeMap<String, BaselineStats>,
    ) -> ConsistencyReport {
        let mut report = ConsistencyReport {
            stations_checked: 0,
            records_checked: 0,
            mismatches: Vec::new(),
        };

        for (station, record) in merged {
            report.stations_checked += 1;
            report.records_checked += record.count;

            let Some(expected) = baseline.get(station) else {
                report.push(
                    station,
                    MismatchType::MissingFromBaseline,
                    "station only seen by fast path".to_string(),
                );
                continue;
            };

            if expected.count != record.count {
                report.push(
                    station,
                    MismatchType::Count,
                    format!("count {} vs baseline {}", record.count, expected.count),
                );
            }

            let baseline_min = to_tenths(expected.min);
            if baseline_min != i64::from(record.min) {
                report.push(
                    station,
                    MismatchType::Min,
                    format!("min {} vs baseline {}", Tenths(record.min.into()), Tenths(baseline_min)),
                );
            }

            let baseline_max = to_tenths(expected.max);
            if baseline_max != i64::from(record.max) {
                report.push(
                    station,
                    MismatchType::Max,
                    format!("max {} vs baseline {}", Tenths(record.max.into()), Tenths(baseline_max)),
                );
            }

            let baseline_mean = expected.mean() * 10.0;
            if (baseline_mean - record.mean_tenths() as f64).abs() > self.mean_tolerance {
                report.push(
                    station,
                    MismatchType::Mean,
                    format!(
                        "mean {} vs baseline {:.3}",
                        Tenths(record.mean_tenths()),
                        expected.mean()
                    ),
                );
            }
        }

        for station in baseline.keys() {
            if merged.get(station).is_none() {
                report.push(
                    station,
                    MismatchType::MissingFromFastPath,
                    "station only seen by baseline".to_string(),
                );
            }
        }

        report
    }

    /// Human-readable summary of a report
    pub fn generate_summary(&self, report: &ConsistencyReport) -> String {
        let mut summary = format!(
            "Consistency Report\n==================\nStations checked: {}\nRecords checked: {}\nMismatches: {}\n",
            report.stations_checked,
            report.records_checked,
            report.mismatches.len()
        );

        for mismatch in report.mismatches.iter().take(20) {
            summary.push_str(&format!(
                "  {:?} {}: {}\n",
                mismatch.mismatch_type, mismatch.station, mismatch.details
            ));
        }
        if report.mismatches.len() > 20 {
            summary.push_str(&format!("  ... and {} more\n", report.mismatches.len() - 20));
        }

        summary
    }
}

impl Default for ConsistencyChecker {
    fn default() -> Self {
        Self::new()
    }
}

fn to_tenths(value: f64) -> i64 {
    (value * 10.0).round() as i64
}
