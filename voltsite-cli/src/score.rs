//! `score` command: rank candidate charging sites.
//!
//! Candidates come either from a JSON array of sites on disk or from an
//! Overpass lookup around `--lat`/`--lng`. Unlike the planner, a failing
//! lookup is reported rather than treated as an empty result.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use voltsite_core::{GeoPoint, PoiLookup, ScoredSite, Site, SuitabilityScorer, rank_sites};
use voltsite_data::OverpassConfig;

use crate::sources::{self, LookupBuilder};
use crate::{
    ARG_AREAS, ARG_LAT, ARG_LNG, ARG_OUTPUT, ARG_OVERPASS_URL, ARG_RADIUS, ARG_SITES,
    ARG_TIMEOUT_SECS, CliError, ENV_SCORE_LNG, ENV_SCORE_SITES,
};

const DEFAULT_RADIUS_METERS: u32 = 5_000;

/// CLI arguments for the `score` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "score",
    long_about = "Score candidate sites for a charging station. Pass either \
                 --sites with a JSON array of sites, or --lat and --lng to \
                 fetch fuel stations from Overpass. Sites inside or near a \
                 restricted area, or too close to a better-placed site, \
                 score zero.",
    about = "Rank candidate charging sites"
)]
#[ortho_config(prefix = "VOLTSITE")]
pub(crate) struct ScoreArgs {
    /// JSON array of candidate sites.
    #[arg(long = ARG_SITES, value_name = "path")]
    #[serde(default)]
    pub(crate) sites: Option<Utf8PathBuf>,
    /// Latitude of the search centre.
    #[arg(long = ARG_LAT, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude of the search centre.
    #[arg(long = ARG_LNG, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lng: Option<f64>,
    /// Search radius in metres.
    #[arg(long = ARG_RADIUS, value_name = "metres")]
    #[serde(default)]
    pub(crate) radius: Option<u32>,
    /// Restricted areas JSON; defaults to the built-in NCR areas.
    #[arg(long = ARG_AREAS, value_name = "path")]
    #[serde(default)]
    pub(crate) areas: Option<Utf8PathBuf>,
    /// Overpass interpreter endpoint.
    #[arg(long = ARG_OVERPASS_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) overpass_url: Option<String>,
    /// Overpass request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Write the ranking to this file instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl ScoreArgs {
    pub(crate) fn into_config(self) -> Result<ScoreConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ScoreConfig::try_from(merged)
    }
}

/// Where candidate sites come from.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SiteSource {
    File(Utf8PathBuf),
    Nearby { center: GeoPoint, radius_meters: u32 },
}

/// Resolved `score` command configuration.
#[derive(Debug, Clone)]
pub(crate) struct ScoreConfig {
    pub(crate) source: SiteSource,
    pub(crate) areas: Option<Utf8PathBuf>,
    pub(crate) overpass: OverpassConfig,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl ScoreConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        if let SiteSource::File(path) = &self.source {
            sources::require_existing(path, ARG_SITES)?;
        }
        if let Some(areas) = &self.areas {
            sources::require_existing(areas, ARG_AREAS)?;
        }
        Ok(())
    }
}

impl TryFrom<ScoreArgs> for ScoreConfig {
    type Error = CliError;

    fn try_from(args: ScoreArgs) -> Result<Self, Self::Error> {
        let source = match (args.sites, args.lat, args.lng) {
            (Some(_), Some(_), _) => {
                return Err(CliError::ConflictingArguments {
                    first: ARG_SITES,
                    second: ARG_LAT,
                });
            }
            (Some(_), None, Some(_)) => {
                return Err(CliError::ConflictingArguments {
                    first: ARG_SITES,
                    second: ARG_LNG,
                });
            }
            (Some(path), None, None) => SiteSource::File(path),
            (None, Some(lat), Some(lng)) => SiteSource::Nearby {
                center: GeoPoint::new(lat, lng)?,
                radius_meters: args.radius.unwrap_or(DEFAULT_RADIUS_METERS),
            },
            (None, Some(_), None) => {
                return Err(CliError::MissingArgument {
                    field: ARG_LNG,
                    env: ENV_SCORE_LNG,
                });
            }
            (None, None, _) => {
                return Err(CliError::MissingArgument {
                    field: ARG_SITES,
                    env: ENV_SCORE_SITES,
                });
            }
        };
        Ok(Self {
            source,
            areas: args.areas,
            overpass: sources::overpass_config(args.overpass_url, args.timeout_secs)?,
            output: args.output,
        })
    }
}

pub(crate) fn run_score_with(
    args: ScoreArgs,
    builder: &dyn LookupBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let ranked = execute_score(&config, builder)?;
    sources::write_json(&ranked, config.output.as_deref(), writer)
}

fn execute_score(
    config: &ScoreConfig,
    builder: &dyn LookupBuilder,
) -> Result<Vec<ScoredSite>, CliError> {
    let geofence = sources::geofence_from(config.areas.as_deref())?;
    let candidates: Vec<Site> = match &config.source {
        SiteSource::File(path) => sources::read_json(path)?,
        SiteSource::Nearby {
            center,
            radius_meters,
        } => builder
            .build(&config.overpass)?
            .find_sites(*center, *radius_meters)
            .map_err(CliError::PoiLookup)?,
    };
    let ranked = rank_sites(&SuitabilityScorer::new(geofence), candidates);
    info!(
        "scored {} candidate sites, {} accepted",
        ranked.len(),
        ranked.iter().filter(|site| !site.is_rejected()).count()
    );
    Ok(ranked)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ScoreConfig, CliError> {
    let merged = ScoreArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ScoreConfig::try_from(merged)
}
