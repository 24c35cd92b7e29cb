//! Error types emitted by the Voltsite CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use voltsite_core::contract::RoutePlanRequestError;
use voltsite_core::{GeoPointError, GeofenceError, PoiLookupError, UnknownVehicleModel};
use voltsite_data::{LoadError, ProviderBuildError};

/// Errors emitted by the Voltsite CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name without leading dashes.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// A timeout of zero seconds was requested.
    #[error("--{field} must be at least 1 second")]
    ZeroTimeout {
        /// Flag name without leading dashes.
        field: &'static str,
    },
    /// Two mutually exclusive options were both supplied.
    #[error("--{first} cannot be combined with --{second}")]
    ConflictingArguments {
        /// First option supplied.
        first: &'static str,
        /// Second option supplied.
        second: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option that named the path.
        field: &'static str,
        /// Missing path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option that named the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option that named the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// A coordinate supplied on the command line was out of range.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(#[from] GeoPointError),
    /// The requested geofence buffer was rejected.
    #[error(transparent)]
    InvalidBuffer(#[from] GeofenceError),
    /// Loading restricted areas or vehicles failed.
    #[error(transparent)]
    LoadData(#[from] LoadError),
    /// Opening a JSON input failed.
    #[error("failed to open {path:?}: {source}")]
    OpenInput {
        /// Input path.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// A JSON input could not be decoded.
    #[error("failed to parse JSON at {path:?}: {source}")]
    ParseInput {
        /// Input path.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// The plan request named a vehicle missing from the catalogue.
    #[error(transparent)]
    UnknownVehicleModel(#[from] UnknownVehicleModel),
    /// The plan request was rejected.
    #[error("plan request in {path:?} is invalid: {source}")]
    InvalidPlanRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Validation or planning failure.
        #[source]
        source: RoutePlanRequestError,
    },
    /// Constructing the Overpass lookup failed.
    #[error("failed to build POI lookup for {endpoint:?}: {source}")]
    BuildPoiLookup {
        /// Configured endpoint.
        endpoint: String,
        /// Construction failure.
        #[source]
        source: ProviderBuildError,
    },
    /// Looking up candidate sites failed.
    #[error("POI lookup failed: {0}")]
    PoiLookup(#[source] PoiLookupError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
