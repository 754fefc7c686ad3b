// crates/geostat-core/src/config.rs

//! # Pipeline Configuration
//!
//! [`PipelineConfig::default`] is the hand-maintained Kazakhstan source set.
//! The same structure deserializes from JSON, so new sources can be added
//! without recompiling:
//!
//! ```json
//! {
//!   "map": "balance.geojson",
//!   "output": "balance_updated.geojson",
//!   "sources": [
//!     { "file": "obrazovanie.json", "prefix": "edu",
//!       "subtypes": [ { "keyword": "Школьные учреждения", "suffix": "_school" } ] }
//!   ]
//! }
//! ```

use crate::alias::AliasTable;
use crate::classify::{SubtypeClassifier, SubtypeRule, SubtypeScope, TermFilter};
use crate::error::{GeoStatError, Result};
use crate::loader::common_io;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_MAP_FILE: &str = "balance.geojson";
pub const DEFAULT_OUTPUT_FILE: &str = "balance_updated.geojson";

/// Map properties that may carry a feature's region name, in priority order.
pub const DEFAULT_NAME_FIELDS: &[&str] = &["ADM_2_rus", "ADM1_EN", "name"];

/// One statistical dataset and how its records become fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub file: PathBuf,
    /// Base field name; fields come out as `prefix[suffix]_year`.
    pub prefix: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtypes: Vec<SubtypeRule>,
    /// Classify on this label only (exact match) instead of scanning all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype_term: Option<usize>,
    /// Keep a period only if its name contains one of these.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter_keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub term_filters: Vec<TermFilter>,
}

impl SourceConfig {
    pub fn new(file: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            prefix: prefix.into(),
            subtypes: Vec::new(),
            subtype_term: None,
            filter_keywords: Vec::new(),
            term_filters: Vec::new(),
        }
    }

    pub fn with_subtypes<I, K, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<String>,
    {
        self.subtypes = rules
            .into_iter()
            .map(|(k, s)| SubtypeRule::new(k, s))
            .collect();
        self
    }

    pub fn with_subtype_term(mut self, index: usize) -> Self {
        self.subtype_term = Some(index);
        self
    }

    pub fn with_filter_keywords<I, K>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.filter_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_term_filter(mut self, index: usize, equals: impl Into<String>) -> Self {
        self.term_filters.push(TermFilter::new(index, equals));
        self
    }

    pub fn classifier(&self) -> SubtypeClassifier<'_> {
        let scope = match self.subtype_term {
            Some(i) => SubtypeScope::Term(i),
            None => SubtypeScope::AnyTerm,
        };
        SubtypeClassifier::new(&self.subtypes, scope)
    }

    /// `expenses` + `_total` + `2023` → `expenses_total_2023`.
    pub fn field_key(&self, suffix: &str, year: &str) -> String {
        format!("{}{}_{}", self.prefix, suffix, year)
    }

    pub fn validate(&self) -> Result<()> {
        if self.prefix.trim().is_empty() {
            return Err(GeoStatError::Config(format!(
                "source {} has an empty prefix",
                self.file.display()
            )));
        }
        if self.subtype_term.is_some() && self.subtypes.is_empty() {
            return Err(GeoStatError::Config(format!(
                "source {} sets subtype_term without subtypes",
                self.file.display()
            )));
        }
        Ok(())
    }
}

/// Everything one run needs: where the map lives, where output goes, which
/// sources to load and how to recognize region names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub map: PathBuf,
    pub output: PathBuf,
    pub name_fields: Vec<String>,
    /// Extra alias entries layered over the built-in table.
    pub aliases: BTreeMap<String, String>,
    pub sources: Vec<SourceConfig>,
    pub pretty: bool,
    /// Directory relative paths are resolved against.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            map: PathBuf::from(DEFAULT_MAP_FILE),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            name_fields: DEFAULT_NAME_FIELDS.iter().map(|s| s.to_string()).collect(),
            aliases: BTreeMap::new(),
            sources: default_sources(),
            pretty: false,
            base_dir: None,
        }
    }
}

/// The hand-maintained source set.
pub fn default_sources() -> Vec<SourceConfig> {
    vec![
        // Gross regional product: one value per region and year.
        SourceConfig::new("2709379-vvp-metodom-proizvodstva.json", "vrp"),
        // Crime counts are cumulative; only year totals are kept.
        SourceConfig::new("704767-kolichestvo-prestupleniy.json", "crime")
            .with_filter_keywords(["Декабрь", "год"]),
        SourceConfig::new("potreb-rashody.json", "expenses").with_subtypes([
            ("Всего", "_total"),
            ("сельская местность", "_rural"),
            ("городская местность", "_urban"),
        ]),
        // Labels: [region, area type, gender, age group].
        SourceConfig::new("703831-naselenie.json", "popul")
            .with_term_filter(1, "Всего")
            .with_term_filter(3, "Все группы")
            .with_subtype_term(2)
            .with_subtypes([
                ("Всего", "_total"),
                ("Мужской", "_male"),
                ("Женский", "_female"),
            ]),
    ]
}

impl PipelineConfig {
    /// Reads a JSON config; relative paths inside it resolve against the
    /// config file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = common_io::open_stream(path)?;
        let mut config: PipelineConfig = serde_json::from_reader(reader)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name_fields.is_empty() {
            return Err(GeoStatError::Config("name_fields must not be empty".into()));
        }
        self.sources.iter().try_for_each(SourceConfig::validate)
    }

    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    pub fn map_path(&self) -> PathBuf {
        self.resolve_path(&self.map)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve_path(&self.output)
    }

    /// Built-in aliases plus any configured extras.
    pub fn alias_table(&self) -> AliasTable {
        if self.aliases.is_empty() {
            AliasTable::builtin().clone()
        } else {
            AliasTable::builtin().extended(&self.aliases)
        }
    }
}
