//! JSON loaders for restricted areas and vehicle catalogues.
//!
//! Both formats deserialise straight into the validated core types, so a
//! polygon with fewer than three vertices, an open ring, or a non-positive
//! vehicle figure is rejected while loading.

use std::io::{self, Read};

use camino::{Utf8Path, Utf8PathBuf};
use serde::de::DeserializeOwned;
use thiserror::Error;
use voltsite_core::{Geofence, VehicleCatalogue};

use crate::fs::open_utf8_file;

/// Errors raised while loading a JSON data file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("failed to read {path}")]
    Read {
        /// File that was being read.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The contents were malformed or failed validation.
    #[error("failed to parse {path}")]
    Parse {
        /// File that was being parsed.
        path: Utf8PathBuf,
        /// Decoder or validation failure.
        #[source]
        source: serde_json::Error,
    },
}

fn load_json<T: DeserializeOwned>(path: &Utf8Path) -> Result<T, LoadError> {
    let read_error = |source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    };
    let mut contents = String::new();
    open_utf8_file(path)
        .map_err(read_error)?
        .read_to_string(&mut contents)
        .map_err(read_error)?;
    let value = serde_json::from_str(&contents).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded {path}");
    Ok(value)
}

/// Load a geofence from `{"buffer_degrees": f64?, "areas": [...]}`.
///
/// # Errors
///
/// Returns [`LoadError`] when the file cannot be read or an area is invalid.
pub fn load_geofence(path: &Utf8Path) -> Result<Geofence, LoadError> {
    load_json(path)
}

/// Load a vehicle catalogue keyed by model identifier.
///
/// # Errors
///
/// Returns [`LoadError`] when the file cannot be read or a model is invalid.
pub fn load_vehicle_catalogue(path: &Utf8Path) -> Result<VehicleCatalogue, LoadError> {
    load_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[fixture]
    fn fixtures_dir() -> Utf8PathBuf {
        Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
    }

    fn temp_json(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write fixture");
        file
    }

    fn utf8(file: &NamedTempFile) -> &Utf8Path {
        Utf8Path::from_path(file.path()).expect("UTF-8 temp path")
    }

    #[rstest]
    fn loads_area_fixture(#[from(fixtures_dir)] dir: Utf8PathBuf) {
        let fence = load_geofence(&dir.join("areas.json")).expect("valid fixture");
        assert_eq!(fence.areas().len(), 1);
        assert_eq!(fence.buffer_degrees(), 0.002);
    }

    #[rstest]
    fn loads_vehicle_fixture(#[from(fixtures_dir)] dir: Utf8PathBuf) {
        let catalogue = load_vehicle_catalogue(&dir.join("vehicles.json")).expect("valid fixture");
        let kona = catalogue.get("hyundai_kona").expect("listed model");
        assert_eq!(kona.vehicle.range_km(), 484.0);
    }

    #[rstest]
    fn open_ring_is_a_parse_error() {
        let file = temp_json(
            r#"{"areas":[{"name":"Open","polygon":[
                {"lat":0,"lng":0},{"lat":0,"lng":1},{"lat":1,"lng":1}]}]}"#,
        );
        let err = load_geofence(utf8(&file)).expect_err("open ring");
        assert!(matches!(err, LoadError::Parse { .. }));
        let source = std::error::Error::source(&err).expect("parse source").to_string();
        assert!(source.contains("Open"), "unexpected message: {source}");
    }

    #[rstest]
    fn missing_file_is_a_read_error(#[from(fixtures_dir)] dir: Utf8PathBuf) {
        let missing = dir.join("missing.json");
        match load_vehicle_catalogue(&missing) {
            Err(LoadError::Read { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected read error, got {other:?}"),
        }
    }
}
