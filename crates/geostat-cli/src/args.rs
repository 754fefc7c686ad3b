use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for geostat
#[derive(Debug, Parser)]
#[command(
    name = "geostat",
    version,
    about = "Merge regional statistical time-series into GeoJSON region properties"
)]
pub struct CliArgs {
    /// JSON pipeline config (default: built-in source set)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Directory that relative source/map/output paths are resolved against
    #[arg(short = 'd', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load all sources and write the enriched map
    Merge {
        /// Input GeoJSON map (overrides config)
        #[arg(short = 'm', long = "map")]
        map: Option<PathBuf>,

        /// Output GeoJSON path (overrides config)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// List configured sources
    Sources,

    /// Show the Region Key a raw name resolves to
    Resolve {
        /// Raw region name (e.g. "Astana City")
        name: String,
    },

    /// Load all sources and print collected fields
    Fields {
        /// Only show this region (raw name, resolved through aliases)
        region: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_with_overrides() {
        let args = CliArgs::try_parse_from([
            "geostat", "-vv", "--data-dir", "data", "merge", "-o", "out.geojson", "--pretty",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.data_dir, Some(PathBuf::from("data")));
        match args.command {
            Commands::Merge { map, output, pretty } => {
                assert_eq!(map, None);
                assert_eq!(output, Some(PathBuf::from("out.geojson")));
                assert!(pretty);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = CliArgs::try_parse_from(["geostat", "resolve", "Astana City", "-c", "cfg.json"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("cfg.json")));
        assert!(matches!(args.command, Commands::Resolve { ref name } if name == "Astana City"));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(CliArgs::try_parse_from(["geostat"]).is_err());
    }
}
