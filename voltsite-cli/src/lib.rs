//! Command-line interface for the Voltsite engine.
//!
//! Three subcommands share the same layered configuration model: CLI flags
//! override `VOLTSITE_`-prefixed environment variables, which override
//! configuration files discovered by `ortho_config`.
//!
//! - `plan` reads a JSON route-plan request and prints the charging plan.
//! - `score` ranks candidate sites from a JSON file or an Overpass lookup.
//! - `check` reports whether a coordinate clears the restricted areas.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod check;
mod error;
mod plan;
mod score;
mod sources;

pub use error::CliError;

use check::CheckArgs;
use plan::PlanArgs;
use score::ScoreArgs;
use sources::OverpassLookupBuilder;

pub(crate) const ARG_PLAN_REQUEST: &str = "request";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ARG_AREAS: &str = "areas";
pub(crate) const ARG_VEHICLES: &str = "vehicles";
pub(crate) const ARG_OVERPASS_URL: &str = "overpass-url";
pub(crate) const ARG_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ARG_SEARCH_RADIUS: &str = "search-radius";
pub(crate) const ARG_MAX_LEGS: &str = "max-legs";
pub(crate) const ARG_SITES: &str = "sites";
pub(crate) const ARG_LAT: &str = "lat";
pub(crate) const ARG_LNG: &str = "lng";
pub(crate) const ARG_RADIUS: &str = "radius";
pub(crate) const ARG_BUFFER: &str = "buffer";
pub(crate) const ENV_PLAN_REQUEST: &str = "VOLTSITE_CMDS_PLAN_REQUEST_PATH";
pub(crate) const ENV_SCORE_SITES: &str = "VOLTSITE_CMDS_SCORE_SITES";
pub(crate) const ENV_SCORE_LNG: &str = "VOLTSITE_CMDS_SCORE_LNG";
pub(crate) const ENV_CHECK_LAT: &str = "VOLTSITE_CMDS_CHECK_LAT";
pub(crate) const ENV_CHECK_LNG: &str = "VOLTSITE_CMDS_CHECK_LNG";

/// Run the Voltsite CLI with the current process arguments and environment.
///
/// `--help` and `--version` print to stdout and return `Ok`.
pub fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            err.print().map_err(CliError::WriteOutput)?;
            return Ok(());
        }
        Err(err) => return Err(CliError::ArgumentParsing(err)),
    };
    let mut stdout = std::io::stdout().lock();
    let builder = OverpassLookupBuilder;
    match cli.command {
        Command::Plan(args) => plan::run_plan_with(args, &builder, &mut stdout),
        Command::Score(args) => score::run_score_with(args, &builder, &mut stdout),
        Command::Check(args) => check::run_check_with(args, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "voltsite",
    about = "Plan EV charging stops and vet candidate charging sites",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan charging stops along a route.
    Plan(PlanArgs),
    /// Rank candidate charging sites by suitability.
    Score(ScoreArgs),
    /// Check a coordinate against the restricted areas.
    Check(CheckArgs),
}

#[cfg(test)]
mod tests;
