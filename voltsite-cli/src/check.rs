//! `check` command: test a coordinate against the restricted areas.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use voltsite_core::geofence::is_valid_location;
use voltsite_core::{GeoPoint, Geofence};

use crate::sources;
use crate::{ARG_AREAS, ARG_BUFFER, ARG_LAT, ARG_LNG, CliError, ENV_CHECK_LAT, ENV_CHECK_LNG};

/// CLI arguments for the `check` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "check",
    about = "Check whether a coordinate may host a charging station"
)]
#[ortho_config(prefix = "VOLTSITE")]
pub(crate) struct CheckArgs {
    /// Latitude to check.
    #[arg(long = ARG_LAT, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude to check.
    #[arg(long = ARG_LNG, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lng: Option<f64>,
    /// Restricted areas JSON; defaults to the built-in NCR areas.
    #[arg(long = ARG_AREAS, value_name = "path")]
    #[serde(default)]
    pub(crate) areas: Option<Utf8PathBuf>,
    /// Override the buffer distance in degrees.
    #[arg(long = ARG_BUFFER, value_name = "deg")]
    #[serde(default)]
    pub(crate) buffer: Option<f64>,
}

/// Resolved `check` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CheckConfig {
    pub(crate) point: GeoPoint,
    pub(crate) areas: Option<Utf8PathBuf>,
    pub(crate) buffer: Option<f64>,
}

impl TryFrom<CheckArgs> for CheckConfig {
    type Error = CliError;

    fn try_from(args: CheckArgs) -> Result<Self, Self::Error> {
        let lat = args.lat.ok_or(CliError::MissingArgument {
            field: ARG_LAT,
            env: ENV_CHECK_LAT,
        })?;
        let lng = args.lng.ok_or(CliError::MissingArgument {
            field: ARG_LNG,
            env: ENV_CHECK_LNG,
        })?;
        Ok(Self {
            point: GeoPoint::new(lat, lng)?,
            areas: args.areas,
            buffer: args.buffer,
        })
    }
}

/// Outcome printed by the `check` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CheckReport {
    pub(crate) lat: f64,
    pub(crate) lng: f64,
    pub(crate) valid: bool,
    /// Names of the areas the point is inside or too close to.
    pub(crate) restricted_by: Vec<String>,
}

pub(crate) fn run_check_with(args: CheckArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let config = CheckConfig::try_from(merged)?;
    let report = execute_check(&config)?;
    sources::write_json(&report, None, writer)
}

pub(crate) fn execute_check(config: &CheckConfig) -> Result<CheckReport, CliError> {
    if let Some(areas) = &config.areas {
        sources::require_existing(areas, ARG_AREAS)?;
    }
    let mut geofence = sources::geofence_from(config.areas.as_deref())?;
    if let Some(buffer) = config.buffer {
        geofence = Geofence::new(geofence.areas().to_vec(), buffer)?;
    }
    let restricted_by: Vec<String> = geofence
        .areas()
        .iter()
        .filter(|area| {
            !is_valid_location(
                config.point,
                std::slice::from_ref(*area),
                geofence.buffer_degrees(),
            )
        })
        .map(|area| area.name().to_owned())
        .collect();
    Ok(CheckReport {
        lat: config.point.lat(),
        lng: config.point.lng(),
        valid: restricted_by.is_empty(),
        restricted_by,
    })
}
