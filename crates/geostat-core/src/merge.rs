// crates/geostat-core/src/merge.rs

//! # Map Merger
//!
//! Resolves each map feature to a Region Key and copies that region's
//! fields into the feature's properties. Geometry is carried through as-is.

use crate::alias::AliasTable;
use crate::common::MetricTable;
use crate::error::Result;
use crate::loader::common_io;
use crate::text::{common_run, fold_key};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

pub type Properties = Map<String, Value>;

/// Minimum shared run of folded characters before a suggestion is offered.
const SUGGESTION_MIN_RUN: usize = 4;

fn feature_type() -> String {
    "Feature".to_string()
}

fn collection_type() -> String {
    "FeatureCollection".to_string()
}

/// A GeoJSON feature. Unknown members survive a round-trip via `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default = "feature_type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// `null` in the file deserializes to `None` and is written back as `null`.
    #[serde(default)]
    pub properties: Option<Properties>,
    #[serde(default)]
    pub geometry: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "collection_type")]
    pub kind: String,
    pub features: Vec<Feature>,
    /// `name`, `crs`, `bbox` and other top-level members.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reads the primary map. Failure here is fatal for a run.
pub fn read_collection(path: &Path) -> Result<FeatureCollection> {
    let reader = common_io::open_stream(path)?;
    Ok(serde_json::from_reader(reader)?)
}

pub fn write_collection(path: &Path, collection: &FeatureCollection, pretty: bool) -> Result<()> {
    common_io::write_json(path, collection, pretty)
}

/// Finds and canonicalizes a feature's region name.
#[derive(Debug, Clone)]
pub struct RegionResolver {
    aliases: AliasTable,
    name_fields: Vec<String>,
}

impl RegionResolver {
    pub fn new(aliases: AliasTable, name_fields: Vec<String>) -> Self {
        Self {
            aliases,
            name_fields,
        }
    }

    /// First populated candidate property. Empty strings are skipped;
    /// numbers are accepted in their JSON text form.
    pub fn identity(&self, properties: &Properties) -> Option<String> {
        self.name_fields
            .iter()
            .find_map(|field| match properties.get(field)? {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }

    /// Raw name → Region Key via the alias table.
    pub fn resolve(&self, raw: &str) -> String {
        self.aliases.resolve(raw)
    }
}

/// A feature whose region had no loaded data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unmatched {
    pub feature_index: usize,
    pub raw_name: String,
    pub region_key: String,
    /// Closest loaded region by folded spelling, if any is close enough.
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub features: usize,
    pub updated: usize,
    /// Features with null properties or no usable name field.
    pub unnamed: usize,
    pub unmatched: Vec<Unmatched>,
}

/// Unions each matched region's fields into its features' properties.
/// Existing keys are overwritten; unmatched features are left untouched.
pub fn merge_into(
    collection: &mut FeatureCollection,
    table: &MetricTable,
    resolver: &RegionResolver,
) -> MergeReport {
    let mut report = MergeReport {
        features: collection.features.len(),
        ..MergeReport::default()
    };

    for (index, feature) in collection.features.iter_mut().enumerate() {
        let Some(properties) = feature.properties.as_mut() else {
            report.unnamed += 1;
            continue;
        };
        let Some(raw_name) = resolver.identity(properties) else {
            report.unnamed += 1;
            continue;
        };

        let key = resolver.resolve(&raw_name);
        match table.get(&key) {
            Some(fields) => {
                for (field, value) in fields {
                    properties.insert(field.clone(), Value::from(*value));
                }
                report.updated += 1;
            }
            None => {
                let suggestion = suggest(&raw_name, table);
                match &suggestion {
                    Some(s) => log::warn!(
                        "no data for region {raw_name} (looked up as {key}); closest loaded region: {s}"
                    ),
                    None => log::warn!("no data for region {raw_name} (looked up as {key})"),
                }
                report.unmatched.push(Unmatched {
                    feature_index: index,
                    raw_name,
                    region_key: key,
                    suggestion,
                });
            }
        }
    }

    report
}

fn suggest(raw_name: &str, table: &MetricTable) -> Option<String> {
    let needle = fold_key(raw_name);
    table
        .regions()
        .map(|(region, _)| (common_run(&needle, &fold_key(region)), region))
        .filter(|(run, _)| *run >= SUGGESTION_MIN_RUN)
        .max_by_key(|(run, _)| *run)
        .map(|(_, region)| region.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolver() -> RegionResolver {
        RegionResolver::new(
            AliasTable::builtin().clone(),
            vec!["ADM_2_rus".into(), "ADM1_EN".into(), "name".into()],
        )
    }

    fn props(v: Value) -> Properties {
        match v {
            Value::Object(m) => m,
            _ => panic!("object expected"),
        }
    }

    fn collection(features: Value) -> FeatureCollection {
        serde_json::from_value(json!({ "type": "FeatureCollection", "features": features })).unwrap()
    }

    #[test]
    fn identity_prefers_earlier_fields_and_skips_empty() {
        let r = resolver();
        let p = props(json!({ "ADM_2_rus": "", "ADM1_EN": "Astana City", "name": "x" }));
        assert_eq!(r.identity(&p).as_deref(), Some("Astana City"));
        let p = props(json!({ "ADM_2_rus": null, "name": "Шымкент" }));
        assert_eq!(r.identity(&p).as_deref(), Some("Шымкент"));
        assert_eq!(r.identity(&props(json!({ "other": 1 }))), None);
    }

    #[test]
    fn admin_english_name_resolves_via_alias() {
        let r = resolver();
        let p = props(json!({ "ADM1_EN": "Astana City" }));
        let raw = r.identity(&p).unwrap();
        assert_eq!(r.resolve(&raw), "Г.АСТАНА");
    }

    #[test]
    fn matched_features_gain_fields_and_overwrite() {
        let mut table = MetricTable::new();
        table.insert("Г.АСТАНА", "vrp_2023".into(), 10.0);
        table.insert("Г.АСТАНА", "name_note".into(), 1.0);

        let mut fc = collection(json!([
            { "type": "Feature", "properties": { "ADM1_EN": "Astana City", "vrp_2023": 0, "name_note": "old" }, "geometry": null },
            { "type": "Feature", "properties": { "ADM1_EN": "Atlantis" }, "geometry": null },
        ]));

        let report = merge_into(&mut fc, &table, &resolver());
        assert_eq!(report.updated, 1);
        assert_eq!(report.unmatched.len(), 1);
        assert_eq!(report.unmatched[0].region_key, "ATLANTIS");

        let p = fc.features[0].properties.as_ref().unwrap();
        assert_eq!(p["vrp_2023"], json!(10.0));
        assert_eq!(p["name_note"], json!(1.0));
        assert_eq!(p["ADM1_EN"], json!("Astana City"));
        assert_eq!(fc.features[1].properties.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn empty_table_leaves_properties_unchanged() {
        let mut fc = collection(json!([
            { "type": "Feature", "properties": { "ADM_2_rus": "Г.АЛМАТЫ", "popul": 2000000 }, "geometry": { "type": "Point", "coordinates": [76.9, 43.2] } },
            { "type": "Feature", "properties": null, "geometry": null },
        ]));
        let before = fc.clone();

        let report = merge_into(&mut fc, &MetricTable::new(), &resolver());
        assert_eq!(fc, before);
        assert_eq!(report.updated, 0);
        assert_eq!(report.unnamed, 1);
    }

    #[test]
    fn unmatched_report_suggests_close_region() {
        let mut table = MetricTable::new();
        table.insert("Г.АСТАНА", "vrp_2023".into(), 1.0);
        table.insert("Г.АЛМАТЫ", "vrp_2023".into(), 1.0);

        let mut fc = collection(json!([
            { "type": "Feature", "properties": { "name": "Astana-city" }, "geometry": null },
            { "type": "Feature", "properties": { "name": "Zzz" }, "geometry": null },
        ]));
        let report = merge_into(&mut fc, &table, &resolver());
        assert_eq!(report.unmatched[0].suggestion.as_deref(), Some("Г.АСТАНА"));
        assert_eq!(report.unmatched[1].suggestion, None);
    }

    #[test]
    fn unknown_members_survive_round_trip() {
        let v = json!({
            "type": "FeatureCollection",
            "name": "balance",
            "crs": { "type": "name", "properties": { "name": "urn:ogc:def:crs:OGC:1.3:CRS84" } },
            "features": [ { "type": "Feature", "id": 7, "properties": { "a": 1 }, "geometry": null, "bbox": [0, 0, 1, 1] } ]
        });
        let fc: FeatureCollection = serde_json::from_value(v.clone()).unwrap();
        assert_eq!(serde_json::to_value(&fc).unwrap(), v);
    }
}
