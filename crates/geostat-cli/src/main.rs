//! geostat — merge regional statistics into a GeoJSON map
//!
//! Usage examples
//! --------------
//!
//! - Run the built-in source set in the current directory
//!   $ geostat merge
//!
//! - Same, with data elsewhere and readable output
//!   $ geostat --data-dir data merge --pretty
//!
//! - Use a custom source list
//!   $ geostat --config sources.json merge -o balance_timeseries.geojson
//!
//! - Check how a map name is resolved
//!   $ geostat resolve "Astana City"
//!
//! - Inspect what the sources produce
//!   $ geostat fields
//!   $ geostat fields "Abai Region"
//!
//! Set `RUST_LOG` or pass `-v` for more detail.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use geostat_core::loader::SourceStatus;
use geostat_core::{pipeline, PipelineConfig};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load_config(args: &CliArgs) -> anyhow::Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(dir) = &args.data_dir {
        config.base_dir = Some(dir.clone());
    }
    log::debug!(
        "{} sources, map {}",
        config.sources.len(),
        config.map_path().display()
    );
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let mut config = load_config(&args)?;

    match args.command {
        Commands::Merge {
            map,
            output,
            pretty,
        } => {
            if let Some(map) = map {
                config.map = map;
            }
            if let Some(output) = output {
                config.output = output;
            }
            config.pretty |= pretty;

            let summary = pipeline::run(&config).context("merge failed")?;

            for source in &summary.sources {
                match &source.status {
                    SourceStatus::Loaded => println!(
                        "  {:<10} {} fields ({} records, {} discarded)",
                        source.prefix,
                        source.stats.fields_written,
                        source.stats.records,
                        source.stats.records_discarded()
                    ),
                    SourceStatus::Missing => {
                        println!("  {:<10} skipped: {} not found", source.prefix, source.path.display())
                    }
                    SourceStatus::Failed(e) => println!("  {:<10} failed: {e}", source.prefix),
                }
            }
            for miss in &summary.merge.unmatched {
                match &miss.suggestion {
                    Some(s) => println!(
                        "  [?] no data for {} (looked up as {}; closest: {s})",
                        miss.raw_name, miss.region_key
                    ),
                    None => println!(
                        "  [?] no data for {} (looked up as {})",
                        miss.raw_name, miss.region_key
                    ),
                }
            }
            println!(
                "Updated {} of {} features -> {}",
                summary.merge.updated,
                summary.merge.features,
                summary.output.display()
            );
        }

        Commands::Sources => {
            for source in &config.sources {
                println!("{} <- {}", source.prefix, config.resolve_path(&source.file).display());
                for f in &source.term_filters {
                    println!("    require term[{}] = {}", f.index, f.equals);
                }
                if let Some(i) = source.subtype_term {
                    println!("    subtypes from term[{i}]");
                }
                for rule in &source.subtypes {
                    println!("    {} -> {}{}_<year>", rule.keyword, source.prefix, rule.suffix);
                }
                if !source.filter_keywords.is_empty() {
                    println!("    periods containing: {}", source.filter_keywords.join(", "));
                }
            }
        }

        Commands::Resolve { name } => {
            let key = config.resolver().resolve(&name);
            println!("{name} -> {key}");
        }

        Commands::Fields { region } => {
            let (table, _) = pipeline::collect(&config);
            match region {
                Some(raw) => {
                    let key = config.resolver().resolve(&raw);
                    match table.get(&key) {
                        Some(fields) => {
                            println!("{key}:");
                            for (field, value) in fields {
                                println!("  {field} = {value}");
                            }
                        }
                        None => eprintln!("No data for region: {raw} (looked up as {key})"),
                    }
                }
                None => {
                    println!("Data collected for {} regions:", table.region_count());
                    for (key, fields) in table.regions() {
                        println!("  {key}: {} fields", fields.len());
                    }
                }
            }
        }
    }

    Ok(())
}
