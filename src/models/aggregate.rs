use crate::models::StationKey;
use crate::utils::fixed_point::rounded_mean_tenths;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::btree_map::{self, BTreeMap};

/// Running min/max/sum/count for one station, in tenths of a degree.
///
/// Always built from at least one observation, so `min <= max` and
/// `count >= 1` hold for every value of this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AggregateRecord {
    pub min: i32,
    pub max: i32,
    pub sum: i64,
    pub count: u64,
}

impl AggregateRecord {
    #[inline]
    pub fn new(value: i32) -> Self {
        Self {
            min: value,
            max: value,
            sum: i64::from(value),
            count: 1,
        }
    }

    /// Fold a single observation in.
    #[inline]
    pub fn observe(&mut self, value: i32) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += i64::from(value);
        self.count += 1;
    }

    /// Fold another record for the same station in.
    #[inline]
    pub fn fold(&mut self, other: &AggregateRecord) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.count += other.count;
    }

    /// Mean in tenths, rounded half away from zero.
    pub fn mean_tenths(&self) -> i64 {
        rounded_mean_tenths(self.sum, self.count)
    }
}

/// Station aggregates for a single segment, keyed by name bytes borrowed from
/// the mapped input.
pub type ChunkAggregates<'a> = FxHashMap<StationKey<'a>, AggregateRecord>;

/// Aggregates for the whole file, ordered by station name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedAggregates {
    stations: BTreeMap<String, AggregateRecord>,
}

impl MergedAggregates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a record into the entry for `name`, creating it if absent.
    pub fn fold_station(&mut self, name: &str, record: &AggregateRecord) {
        match self.stations.get_mut(name) {
            Some(existing) => existing.fold(record),
            None => {
                self.stations.insert(name.to_owned(), *record);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&AggregateRecord> {
        self.stations.get(name)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Total number of observations across all stations.
    pub fn total_count(&self) -> u64 {
        self.stations.values().map(|r| r.count).sum()
    }

    /// Stations in ascending ordinal name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, AggregateRecord> {
        self.stations.iter()
    }

    pub fn station_names(&self) -> impl Iterator<Item = &str> {
        self.stations.keys().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a MergedAggregates {
    type Item = (&'a String, &'a AggregateRecord);
    type IntoIter = btree_map::Iter<'a, String, AggregateRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.stations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_of(values: &[i32]) -> AggregateRecord {
        let mut record = AggregateRecord::new(values[0]);
        for &value in &values[1..] {
            record.observe(value);
        }
        record
    }

    #[test]
    fn test_observe_tracks_min_max_sum_count() {
        let record = record_of(&[120, -34, 140, 0]);
        assert_eq!(record.min, -34);
        assert_eq!(record.max, 140);
        assert_eq!(record.sum, 226);
        assert_eq!(record.count, 4);
    }

    #[test]
    fn test_fold_is_order_independent() {
        let a = record_of(&[120, 89]);
        let b = record_of(&[-15, 300, 2]);
        let c = record_of(&[999]);

        let mut abc = a;
        abc.fold(&b);
        abc.fold(&c);

        let mut cab = c;
        cab.fold(&a);
        cab.fold(&b);

        assert_eq!(abc, cab);
        assert_eq!(abc, record_of(&[120, 89, -15, 300, 2, 999]));
    }

    #[test]
    fn test_mean_tenths() {
        assert_eq!(record_of(&[120, 140]).mean_tenths(), 130);
        assert_eq!(record_of(&[7, 8]).mean_tenths(), 8);
        assert_eq!(record_of(&[-7, -8]).mean_tenths(), -8);
    }

    #[test]
    fn test_merged_aggregates_sorted_by_name() {
        let mut merged = MergedAggregates::new();
        merged.fold_station("Hamburg", &AggregateRecord::new(120));
        merged.fold_station("Bulawayo", &AggregateRecord::new(89));
        merged.fold_station("Hamburg", &AggregateRecord::new(140));
        merged.fold_station("Abha", &AggregateRecord::new(-5));

        let names: Vec<&str> = merged.station_names().collect();
        assert_eq!(names, vec!["Abha", "Bulawayo", "Hamburg"]);
        assert_eq!(merged.get("Hamburg"), Some(&record_of(&[120, 140])));
        assert_eq!(merged.total_count(), 4);
    }
}
