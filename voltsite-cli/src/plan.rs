//! `plan` command: charging stops for a JSON route-plan request.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use voltsite_core::contract::{RoutePlanRequest, RoutePlanRequestError, RoutePlanResponse};
use voltsite_core::{ChargePlanner, PlannerConfig};
use voltsite_data::OverpassConfig;

use crate::sources::{self, LookupBuilder};
use crate::{
    ARG_AREAS, ARG_MAX_LEGS, ARG_OUTPUT, ARG_OVERPASS_URL, ARG_PLAN_REQUEST, ARG_SEARCH_RADIUS,
    ARG_TIMEOUT_SECS, ARG_VEHICLES, CliError, ENV_PLAN_REQUEST,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "plan",
    long_about = "Plan charging stops for a route. The request is a JSON \
                 document with the route distance and [lat, lng] samples, \
                 the vehicle model key and the current charge. Stations are \
                 looked up through an Overpass endpoint and filtered against \
                 the restricted areas.",
    about = "Plan charging stops along a route"
)]
#[ortho_config(prefix = "VOLTSITE")]
pub(crate) struct PlanArgs {
    /// Path to a JSON route-plan request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Write the plan to this file instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Restricted areas JSON; defaults to the built-in NCR areas.
    #[arg(long = ARG_AREAS, value_name = "path")]
    #[serde(default)]
    pub(crate) areas: Option<Utf8PathBuf>,
    /// Vehicle catalogue JSON; defaults to the built-in models.
    #[arg(long = ARG_VEHICLES, value_name = "path")]
    #[serde(default)]
    pub(crate) vehicles: Option<Utf8PathBuf>,
    /// Overpass interpreter endpoint.
    #[arg(long = ARG_OVERPASS_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) overpass_url: Option<String>,
    /// Overpass request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Station search radius around each stopping point, in metres.
    #[arg(long = ARG_SEARCH_RADIUS, value_name = "metres")]
    #[serde(default)]
    pub(crate) search_radius: Option<u32>,
    /// Maximum number of charging legs per plan.
    #[arg(long = ARG_MAX_LEGS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_legs: Option<usize>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone)]
pub(crate) struct PlanConfig {
    pub(crate) request_path: Utf8PathBuf,
    pub(crate) output: Option<Utf8PathBuf>,
    pub(crate) areas: Option<Utf8PathBuf>,
    pub(crate) vehicles: Option<Utf8PathBuf>,
    pub(crate) overpass: OverpassConfig,
    pub(crate) planner: PlannerConfig,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        sources::require_existing(&self.request_path, ARG_PLAN_REQUEST)?;
        if let Some(areas) = &self.areas {
            sources::require_existing(areas, ARG_AREAS)?;
        }
        if let Some(vehicles) = &self.vehicles {
            sources::require_existing(vehicles, ARG_VEHICLES)?;
        }
        Ok(())
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;
        let mut planner = PlannerConfig::default();
        if let Some(radius) = args.search_radius {
            planner = planner.with_search_radius(radius);
        }
        if let Some(max_legs) = args.max_legs {
            planner = planner.with_max_legs(max_legs);
        }
        Ok(Self {
            request_path,
            output: args.output,
            areas: args.areas,
            vehicles: args.vehicles,
            overpass: sources::overpass_config(args.overpass_url, args.timeout_secs)?,
            planner,
        })
    }
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn LookupBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    let response = execute_plan(&config, builder)?;
    sources::write_json(&response, config.output.as_deref(), writer)
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn execute_plan(
    config: &PlanConfig,
    builder: &dyn LookupBuilder,
) -> Result<RoutePlanResponse, CliError> {
    let request: RoutePlanRequest = sources::read_json(&config.request_path)?;
    let geofence = sources::geofence_from(config.areas.as_deref())?;
    let catalogue = sources::catalogue_from(config.vehicles.as_deref())?;
    let lookup = builder.build(&config.overpass)?;
    let planner = ChargePlanner::with_config(lookup, geofence, config.planner);
    let response = request
        .plan(&planner, &catalogue)
        .map_err(|err| match err {
            RoutePlanRequestError::UnknownVehicleModel(unknown) => {
                CliError::UnknownVehicleModel(unknown)
            }
            other => CliError::InvalidPlanRequest {
                path: config.request_path.clone(),
                source: other,
            },
        })?;
    info!(
        "planned {} charging stops and {} unreachable legs for {}",
        response.charging_stops.len(),
        response.unreachable_legs.len(),
        request.ev_model
    );
    Ok(response)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
