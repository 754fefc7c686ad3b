//! Merges a small in-memory dataset into an in-memory map, no files needed.
//!
//! $ cargo run -p geostat-core --example merge_inline

use geostat_core::loader::collect_records;
use geostat_core::merge::merge_into;
use geostat_core::raw::StatRecords;
use geostat_core::{FeatureCollection, PipelineConfig, SourceConfig};
use serde_json::json;

fn main() -> geostat_core::Result<()> {
    let records: StatRecords = serde_json::from_value(json!([
        { "termNames": ["ОБЛАСТЬ АБАЙ", "Всего"],
          "periods": [ { "name": "2023", "date": "31.12.2023", "value": "500" } ] },
        { "termNames": ["ОБЛАСТЬ АБАЙ", "сельская местность"],
          "periods": [ { "name": "2023", "date": "31.12.2023", "value": "410.5" } ] }
    ]))?;

    let source = SourceConfig::new("potreb-rashody.json", "expenses").with_subtypes([
        ("Всего", "_total"),
        ("сельская местность", "_rural"),
    ]);
    let (table, stats) = collect_records(&records, &source);
    println!("{} records -> {} fields", stats.records, stats.fields_written);

    let mut map: FeatureCollection = serde_json::from_value(json!({
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": { "ADM1_EN": "Abai Region" }, "geometry": null }
        ]
    }))?;

    let report = merge_into(&mut map, &table, &PipelineConfig::default().resolver());
    println!("updated {} feature(s)", report.updated);
    println!("{}", serde_json::to_string_pretty(&map)?);
    Ok(())
}
