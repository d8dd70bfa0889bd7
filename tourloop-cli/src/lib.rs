//! Command-line interface for the Tourloop round-trip planner.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod output;
mod plan;
mod suggest;

pub use error::CliError;

use plan::PlanArgs;
use suggest::SuggestArgs;

pub(crate) const ARG_PLAN_ADDRESSES: &str = "addresses";
pub(crate) const ARG_OSRM_BASE_URL: &str = "osrm-base-url";
pub(crate) const ARG_NOMINATIM_BASE_URL: &str = "nominatim-base-url";
pub(crate) const ARG_PROFILE: &str = "profile";
pub(crate) const ARG_MAX_STOPS: &str = "max-stops";
pub(crate) const ARG_USER_AGENT: &str = "user-agent";
pub(crate) const ARG_NO_FALLBACK: &str = "no-fallback";
pub(crate) const ARG_GEOMETRY: &str = "geometry";
pub(crate) const ARG_SUGGEST_QUERY: &str = "query";
pub(crate) const ARG_GEOAPIFY_API_KEY: &str = "geoapify-api-key";
pub(crate) const ARG_LIMIT: &str = "limit";
pub(crate) const ENV_PLAN_ADDRESSES: &str = "TOURLOOP_CMDS_PLAN_ADDRESSES_PATH";
pub(crate) const ENV_SUGGEST_QUERY: &str = "TOURLOOP_CMDS_SUGGEST_QUERY";
pub(crate) const ENV_GEOAPIFY_API_KEY: &str = "TOURLOOP_CMDS_SUGGEST_GEOAPIFY_API_KEY";

/// Run the Tourloop CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments or configuration are invalid, a
/// collaborator cannot be built, planning fails, or output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => plan::run_plan(args),
        Command::Suggest(args) => suggest::run_suggest(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "tourloop",
    about = "Plan the fastest round trip from home through a list of stops",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Geocode addresses, fetch travel times and print the optimal loop.
    Plan(PlanArgs),
    /// Suggest complete addresses for a partial query.
    Suggest(SuggestArgs),
}

#[cfg(test)]
mod tests;
