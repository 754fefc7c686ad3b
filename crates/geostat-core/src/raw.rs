// crates/geostat-core/src/raw.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One observation within a statistical record, as published:
/// ```json
/// { "name": "Декабрь 2023 год", "date": "31.12.2023", "value": "1234.5" }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Period {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: Option<String>,
    /// String or number depending on the publisher; parsed lazily.
    #[serde(default)]
    pub value: Value,
}

/// Raw statistical record. `term_names` lists the category labels with the
/// region first, e.g. `["ОБЛАСТЬ АБАЙ", "Всего", "Мужской", "Все группы"]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatRecord {
    #[serde(rename = "termNames", default)]
    pub term_names: Vec<String>,
    #[serde(default)]
    pub periods: Vec<Period>,
}

impl StatRecord {
    /// The region label (first category), if any.
    pub fn region_label(&self) -> Option<&str> {
        self.term_names.first().map(String::as_str)
    }

    /// Category label at `index`, trimmed.
    pub fn term(&self, index: usize) -> Option<&str> {
        self.term_names.get(index).map(|t| t.trim())
    }
}

pub type StatRecords = Vec<StatRecord>;
