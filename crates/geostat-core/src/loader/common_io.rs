// crates/geostat-core/src/loader/common_io.rs
use crate::error::{GeoStatError, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

/// `true` for `*.gz` paths.
pub fn is_gzip(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Opens a file, buffers it, and unwraps gzip when the name ends in `.gz`.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        GeoStatError::NotFound(format!("cannot open {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);

    if !is_gzip(path) {
        return Ok(Box::new(reader));
    }

    #[cfg(feature = "compact")]
    {
        Ok(Box::new(GzDecoder::new(reader)))
    }

    #[cfg(not(feature = "compact"))]
    {
        Err(GeoStatError::InvalidData(format!(
            "{} is gzip-compressed but 'compact' is disabled",
            path.display()
        )))
    }
}

/// Serializes `value` as JSON to `path`, gzip-compressed for `.gz` names.
/// Non-ASCII text is written verbatim.
pub fn write_json<T: Serialize>(path: &Path, value: &T, pretty: bool) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    if is_gzip(path) {
        #[cfg(feature = "compact")]
        {
            let mut encoder = GzEncoder::new(writer, Compression::default());
            encode(&mut encoder, value, pretty)?;
            encoder.finish()?.flush()?;
            return Ok(());
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(GeoStatError::InvalidData(
                "Gzip requested but 'compact' disabled".into(),
            ));
        }
    }

    let mut writer = writer;
    encode(&mut writer, value, pretty)?;
    writer.flush()?;
    Ok(())
}

fn encode<W: Write, T: Serialize>(writer: &mut W, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, value)?;
    } else {
        serde_json::to_writer(writer, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn read_back(path: &Path) -> Value {
        serde_json::from_reader(open_stream(path).unwrap()).unwrap()
    }

    #[test]
    fn plain_json_round_trips_with_cyrillic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let v = json!({ "name": "Г.АСТАНА" });
        write_json(&path, &v, false).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Г.АСТАНА"));
        assert_eq!(read_back(&path), v);
    }

    #[cfg(feature = "compact")]
    #[test]
    fn gz_suffix_is_compressed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json.gz");
        let v = json!([1, 2, 3]);
        write_json(&path, &v, true).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
        assert_eq!(read_back(&path), v);
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = match open_stream(Path::new("/definitely/not/here.json")) {
            Err(e) => e,
            Ok(_) => panic!("expected an error"),
        };
        assert!(matches!(err, GeoStatError::NotFound(_)));
    }
}
