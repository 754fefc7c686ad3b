// crates/geostat-core/src/lib.rs

//! # geostat-core
//!
//! Joins regional statistical time-series onto GeoJSON region polygons.
//!
//! Two stages:
//! - [`loader`] reads statistical datasets (arrays of `{termNames, periods}`
//!   records) into a [`MetricTable`] of `region -> prefix[suffix]_year -> value`;
//! - [`merge`] resolves every map feature to a region through the
//!   [`AliasTable`] and copies the region's fields into its properties.
//!
//! ```no_run
//! use geostat_core::{pipeline, PipelineConfig};
//!
//! let summary = pipeline::run(&PipelineConfig::default())?;
//! println!("updated {} regions", summary.merge.updated);
//! # Ok::<(), geostat_core::GeoStatError>(())
//! ```

pub mod alias;
pub mod classify;
pub mod common;
pub mod config;
pub mod error;
pub mod loader;
pub mod merge;
pub mod period;
pub mod pipeline;
pub mod raw;
pub mod text;

pub use crate::alias::AliasTable;
pub use crate::classify::{SubtypeRule, TermFilter};
pub use crate::common::{FieldMap, LoadStats, MetricTable};
pub use crate::config::{PipelineConfig, SourceConfig};
pub use crate::error::{GeoStatError, Result};
pub use crate::merge::{FeatureCollection, MergeReport, RegionResolver};
pub use crate::pipeline::RunSummary;
