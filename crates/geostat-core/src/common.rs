// crates/geostat-core/src/common.rs

//! Shared result types of the loader and the merger.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `FieldKey -> value` for one region, e.g. `expenses_total_2023 -> 500.0`.
pub type FieldMap = BTreeMap<String, f64>;

/// Per-region metrics collected from one or more sources.
///
/// Keyed by Region Key. Later writes of the same field win, so merging
/// tables in source order gives last-write-wins across the whole run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricTable {
    regions: BTreeMap<String, FieldMap>,
}

impl MetricTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores one value; returns the value it replaced, if any.
    pub fn insert(&mut self, region: &str, field: String, value: f64) -> Option<f64> {
        self.regions
            .entry(region.to_owned())
            .or_default()
            .insert(field, value)
    }

    /// Folds `other` into `self`, field by field. Fields of `other` win.
    pub fn merge(&mut self, other: MetricTable) {
        for (region, fields) in other.regions {
            self.regions.entry(region).or_default().extend(fields);
        }
    }

    pub fn get(&self, region: &str) -> Option<&FieldMap> {
        self.regions.get(region)
    }

    pub fn contains(&self, region: &str) -> bool {
        self.regions.contains_key(region)
    }

    pub fn regions(&self) -> impl Iterator<Item = (&str, &FieldMap)> {
        self.regions.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn field_count(&self) -> usize {
        self.regions.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Counters gathered while collecting one source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    pub records: usize,
    pub no_region: usize,
    pub term_filtered: usize,
    pub no_subtype: usize,
    pub keyword_filtered: usize,
    pub no_year: usize,
    pub non_numeric: usize,
    pub fields_written: usize,
    /// Writes that replaced an earlier value for the same field.
    pub overwritten: usize,
}

impl LoadStats {
    pub fn records_discarded(&self) -> usize {
        self.no_region + self.term_filtered + self.no_subtype
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_insert_wins() {
        let mut t = MetricTable::new();
        assert_eq!(t.insert("Г.АСТАНА", "vrp_2023".into(), 1.0), None);
        assert_eq!(t.insert("Г.АСТАНА", "vrp_2023".into(), 2.0), Some(1.0));
        assert_eq!(t.get("Г.АСТАНА").unwrap()["vrp_2023"], 2.0);
        assert_eq!(t.field_count(), 1);
    }

    #[test]
    fn merge_unions_fields_and_prefers_incoming() {
        let mut a = MetricTable::new();
        a.insert("R", "vrp_2022".into(), 1.0);
        a.insert("R", "vrp_2023".into(), 2.0);

        let mut b = MetricTable::new();
        b.insert("R", "vrp_2023".into(), 20.0);
        b.insert("R", "crime_2023".into(), 5.0);
        b.insert("S", "crime_2023".into(), 7.0);

        a.merge(b);
        let r = a.get("R").unwrap();
        assert_eq!(r.len(), 3);
        assert_eq!(r["vrp_2022"], 1.0);
        assert_eq!(r["vrp_2023"], 20.0);
        assert_eq!(r["crime_2023"], 5.0);
        assert_eq!(a.region_count(), 2);
    }
}
