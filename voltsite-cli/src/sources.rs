//! Input resolution shared by the subcommands.

use std::io::{BufReader, Write};
use std::time::Duration;

use camino::Utf8Path;
use serde::Serialize;
use serde::de::DeserializeOwned;
use voltsite_core::{Geofence, PoiLookup, VehicleCatalogue};
use voltsite_data::fs::{file_is_file, open_utf8_file, write_utf8_file};
use voltsite_data::{OverpassConfig, OverpassPoiLookup, load_geofence, load_vehicle_catalogue};

use crate::{ARG_TIMEOUT_SECS, CliError};

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Restricted areas from `path`, or the built-in NCR set.
pub(crate) fn geofence_from(path: Option<&Utf8Path>) -> Result<Geofence, CliError> {
    match path {
        Some(file) => Ok(load_geofence(file)?),
        None => Ok(Geofence::ncr()),
    }
}

/// Vehicle models from `path`, or the built-in catalogue.
pub(crate) fn catalogue_from(path: Option<&Utf8Path>) -> Result<VehicleCatalogue, CliError> {
    match path {
        Some(file) => Ok(load_vehicle_catalogue(file)?),
        None => Ok(VehicleCatalogue::builtin()),
    }
}

/// Overpass settings with optional endpoint and timeout overrides.
///
/// A zero timeout is rejected: the client would fail every request at once.
pub(crate) fn overpass_config(
    endpoint: Option<String>,
    timeout_secs: Option<u64>,
) -> Result<OverpassConfig, CliError> {
    let mut config = endpoint.map_or_else(OverpassConfig::default, OverpassConfig::new);
    match timeout_secs {
        Some(0) => return Err(CliError::ZeroTimeout { field: ARG_TIMEOUT_SECS }),
        Some(secs) => config = config.with_timeout(Duration::from_secs(secs)),
        None => {}
    }
    Ok(config)
}

/// Decode a JSON document from disk.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Utf8Path) -> Result<T, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty-print `value` to `output` when set, otherwise to `writer`.
pub(crate) fn write_json<T: Serialize + ?Sized>(
    value: &T,
    output: Option<&Utf8Path>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let mut payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    payload.push('\n');
    match output {
        Some(path) => write_utf8_file(path, &payload).map_err(CliError::WriteOutput),
        None => writer
            .write_all(payload.as_bytes())
            .map_err(CliError::WriteOutput),
    }
}

/// Builds the POI lookup for a command invocation.
pub(crate) trait LookupBuilder {
    fn build(&self, config: &OverpassConfig) -> Result<Box<dyn PoiLookup>, CliError>;
}

/// Connects to the configured Overpass endpoint.
pub(crate) struct OverpassLookupBuilder;

impl LookupBuilder for OverpassLookupBuilder {
    fn build(&self, config: &OverpassConfig) -> Result<Box<dyn PoiLookup>, CliError> {
        let lookup = OverpassPoiLookup::with_config(config.clone()).map_err(|source| {
            CliError::BuildPoiLookup {
                endpoint: config.endpoint.clone(),
                source,
            }
        })?;
        Ok(Box::new(lookup))
    }
}
