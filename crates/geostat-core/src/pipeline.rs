// crates/geostat-core/src/pipeline.rs

//! One end-to-end run: load sources, merge into the map, write the result.

use crate::common::MetricTable;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::loader::{load_sources, SourceOutcome};
use crate::merge::{merge_into, read_collection, write_collection, MergeReport, RegionResolver};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub sources: Vec<SourceOutcome>,
    pub regions_loaded: usize,
    pub merge: MergeReport,
    pub output: PathBuf,
}

impl PipelineConfig {
    pub fn resolver(&self) -> RegionResolver {
        RegionResolver::new(self.alias_table(), self.name_fields.clone())
    }
}

/// Loads all sources into one table, in configured order.
pub fn collect(config: &PipelineConfig) -> (MetricTable, Vec<SourceOutcome>) {
    let (table, outcomes) = load_sources(config);
    log::info!(
        "collected {} fields for {} regions from {} sources",
        table.field_count(),
        table.region_count(),
        outcomes.len()
    );
    (table, outcomes)
}

/// Runs the whole pipeline. Only reading the map or writing the output can
/// fail; source problems are logged and reported in the summary.
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    config.validate()?;

    let (table, sources) = collect(config);

    let map_path = config.map_path();
    log::info!("reading {}", map_path.display());
    let mut collection = read_collection(&map_path)?;

    let merge = merge_into(&mut collection, &table, &config.resolver());

    let output = config.output_path();
    log::info!("writing {}", output.display());
    write_collection(&output, &collection, config.pretty)?;

    log::info!(
        "updated {} of {} features ({} unmatched)",
        merge.updated,
        merge.features,
        merge.unmatched.len()
    );

    Ok(RunSummary {
        sources,
        regions_loaded: table.region_count(),
        merge,
        output,
    })
}
