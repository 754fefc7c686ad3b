// crates/geostat-core/src/loader/mod.rs

//! # Source Loader
//!
//! Turns statistical datasets into a [`MetricTable`]: each record is assigned
//! a region, an optional subtype suffix and, per period, a year; every
//! numeric value lands under `prefix[suffix]_year`.

use crate::classify::SubtypeClassifier;
use crate::common::{LoadStats, MetricTable};
use crate::config::{PipelineConfig, SourceConfig};
use crate::error::Result;
use crate::period::{extract_year, parse_value, passes_keyword_filter};
use crate::raw::{StatRecord, StatRecords};
use crate::text::normalize;
use std::path::{Path, PathBuf};

pub mod common_io;

/// What happened to one configured source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceStatus {
    Loaded,
    /// The file does not exist; the source contributes nothing.
    Missing,
    /// The file exists but could not be read or parsed.
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct SourceOutcome {
    pub prefix: String,
    pub path: PathBuf,
    pub status: SourceStatus,
    pub stats: LoadStats,
    pub table: MetricTable,
}

impl SourceOutcome {
    fn empty(source: &SourceConfig, path: PathBuf, status: SourceStatus) -> Self {
        Self {
            prefix: source.prefix.clone(),
            path,
            status,
            stats: LoadStats::default(),
            table: MetricTable::new(),
        }
    }
}

/// Parses a JSON array of statistical records.
pub fn read_records(path: &Path) -> Result<StatRecords> {
    let reader = common_io::open_stream(path)?;
    Ok(serde_json::from_reader(reader)?)
}

/// Loads one source. A missing file is not an error: it is logged and
/// reported as [`SourceStatus::Missing`] with an empty table.
pub fn load_source(source: &SourceConfig, base_dir: Option<&Path>) -> Result<SourceOutcome> {
    let path = match base_dir {
        Some(base) if source.file.is_relative() => base.join(&source.file),
        _ => source.file.clone(),
    };

    log::info!("processing {} ({})", path.display(), source.prefix);

    if !path.exists() {
        log::warn!("source {} not found, skipping", path.display());
        return Ok(SourceOutcome::empty(source, path, SourceStatus::Missing));
    }

    let records = read_records(&path)?;
    let (table, stats) = collect_records(&records, source);

    log::debug!(
        "{}: {} records, {} discarded, {} fields for {} regions",
        source.prefix,
        stats.records,
        stats.records_discarded(),
        stats.fields_written,
        table.region_count()
    );

    Ok(SourceOutcome {
        prefix: source.prefix.clone(),
        path,
        status: SourceStatus::Loaded,
        stats,
        table,
    })
}

/// Loads every configured source in order and merges them into one table.
/// Sources that fail to parse are logged and contribute nothing.
pub fn load_sources(config: &PipelineConfig) -> (MetricTable, Vec<SourceOutcome>) {
    let mut master = MetricTable::new();
    let mut outcomes = Vec::with_capacity(config.sources.len());

    for source in &config.sources {
        let outcome = match load_source(source, config.base_dir.as_deref()) {
            Ok(outcome) => outcome,
            Err(e) => {
                let path = config.resolve_path(&source.file);
                log::error!("failed to load {}: {}", path.display(), e);
                SourceOutcome::empty(source, path, SourceStatus::Failed(e.to_string()))
            }
        };
        master.merge(outcome.table.clone());
        outcomes.push(outcome);
    }

    (master, outcomes)
}

/// The record classification and key construction, free of I/O.
pub fn collect_records(records: &[StatRecord], source: &SourceConfig) -> (MetricTable, LoadStats) {
    let classifier = source.classifier();
    let mut table = MetricTable::new();
    let mut stats = LoadStats::default();

    for record in records {
        stats.records += 1;
        collect_record(record, source, &classifier, &mut table, &mut stats);
    }

    (table, stats)
}

fn collect_record(
    record: &StatRecord,
    source: &SourceConfig,
    classifier: &SubtypeClassifier<'_>,
    table: &mut MetricTable,
    stats: &mut LoadStats,
) {
    let Some(label) = record.region_label() else {
        stats.no_region += 1;
        return;
    };
    let region = normalize(label);

    if !source.term_filters.iter().all(|f| f.matches(record)) {
        stats.term_filtered += 1;
        return;
    }

    let suffix = if classifier.is_active() {
        match classifier.classify(&record.term_names) {
            Some(suffix) => suffix,
            None => {
                stats.no_subtype += 1;
                return;
            }
        }
    } else {
        ""
    };

    for period in &record.periods {
        if !passes_keyword_filter(&period.name, &source.filter_keywords) {
            stats.keyword_filtered += 1;
            continue;
        }
        let Some(year) = extract_year(period) else {
            stats.no_year += 1;
            continue;
        };
        let Some(value) = parse_value(&period.value) else {
            stats.non_numeric += 1;
            continue;
        };

        let key = source.field_key(suffix, year);
        if table.insert(&region, key, value).is_some() {
            stats.overwritten += 1;
        }
        stats.fields_written += 1;
    }
}
