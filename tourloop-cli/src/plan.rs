//! Plan command implementation for the Tourloop CLI.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;
use tourloop_core::{
    DEFAULT_MAX_STOPS, Geocoder, PlanResponse, PlannerConfig, RouteGeometryProvider, Solver,
    TourPlanner, TravelTimeProvider, parse_addresses,
};
use tourloop_data::geocoding::{
    DEFAULT_NOMINATIM_BASE_URL, NominatimGeocoder, NominatimGeocoderConfig,
};
use tourloop_data::routing::{
    DEFAULT_PROFILE, DEFAULT_USER_AGENT, HttpTravelTimeProvider, HttpTravelTimeProviderConfig,
};
use tourloop_solver_exact::{DEFAULT_MAX_LOCATIONS, HeldKarpSolver};

use crate::output::write_json;
use crate::{
    ARG_GEOMETRY, ARG_MAX_STOPS, ARG_NO_FALLBACK, ARG_NOMINATIM_BASE_URL, ARG_OSRM_BASE_URL,
    ARG_PLAN_ADDRESSES, ARG_PROFILE, ARG_USER_AGENT, CliError, ENV_PLAN_ADDRESSES, fs,
};

/// Smallest accepted `--max-stops`: home plus one stop.
const MIN_STOPS: usize = 2;

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan the fastest round trip through the addresses in a \
                 text file, one per line, the first being home. Addresses \
                 are geocoded with Nominatim and travel times come from \
                 OSRM; straight-line distances stand in when routing is \
                 unavailable unless --no-fallback is given.",
    about = "Plan the optimal loop through a list of addresses"
)]
#[ortho_config(prefix = "TOURLOOP")]
pub(crate) struct PlanArgs {
    /// Text file with one address per line; the first line is home.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) addresses_path: Option<Utf8PathBuf>,
    /// Base URL for the OSRM server (e.g. "http://localhost:5000").
    #[arg(long = ARG_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// Base URL for the Nominatim geocoder.
    #[arg(long = ARG_NOMINATIM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) nominatim_base_url: Option<String>,
    /// OSRM routing profile, e.g. "driving" or "foot".
    #[arg(long = ARG_PROFILE, value_name = "profile")]
    #[serde(default)]
    pub(crate) profile: Option<String>,
    /// Maximum number of addresses, home included.
    #[arg(long = ARG_MAX_STOPS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_stops: Option<usize>,
    /// User agent identifying this client to the geocoding and routing services.
    #[arg(long = ARG_USER_AGENT, value_name = "agent")]
    #[serde(default)]
    pub(crate) user_agent: Option<String>,
    /// Fail instead of using straight-line distances when routing is unavailable.
    #[arg(long = ARG_NO_FALLBACK)]
    #[serde(default)]
    pub(crate) no_fallback: bool,
    /// Include the road geometry of the planned loop in the output.
    #[arg(long = ARG_GEOMETRY)]
    #[serde(default)]
    pub(crate) geometry: bool,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    /// Path to the addresses file.
    pub(crate) addresses_path: Utf8PathBuf,
    /// Base URL for the OSRM table and route services.
    pub(crate) osrm_base_url: String,
    /// Base URL for the Nominatim search service.
    pub(crate) nominatim_base_url: String,
    /// OSRM routing profile.
    pub(crate) profile: String,
    /// Address ceiling, home included.
    pub(crate) max_stops: usize,
    /// User agent sent to both services.
    pub(crate) user_agent: String,
    /// Whether straight-line distances may replace road travel times.
    pub(crate) allow_fallback: bool,
    /// Whether to fetch the road geometry after planning.
    pub(crate) geometry: bool,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.addresses_path, ARG_PLAN_ADDRESSES)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match fs::file_is_file(path) {
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

    fn planner_config(&self) -> PlannerConfig {
        PlannerConfig {
            max_stops: self.max_stops,
            allow_fallback: self.allow_fallback,
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let addresses_path = args.addresses_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_ADDRESSES,
            env: ENV_PLAN_ADDRESSES,
        })?;

        let max_stops = args.max_stops.unwrap_or(DEFAULT_MAX_STOPS);
        if !(MIN_STOPS..=DEFAULT_MAX_LOCATIONS).contains(&max_stops) {
            return Err(CliError::OutOfRange {
                field: ARG_MAX_STOPS,
                value: max_stops,
                min: MIN_STOPS,
                max: DEFAULT_MAX_LOCATIONS,
            });
        }

        let osrm_base_url = args
            .osrm_base_url
            .unwrap_or_else(|| HttpTravelTimeProviderConfig::default().base_url);

        Ok(Self {
            addresses_path,
            osrm_base_url,
            nominatim_base_url: args
                .nominatim_base_url
                .unwrap_or_else(|| DEFAULT_NOMINATIM_BASE_URL.to_owned()),
            profile: args.profile.unwrap_or_else(|| DEFAULT_PROFILE.to_owned()),
            max_stops,
            user_agent: args
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned()),
            allow_fallback: !args.no_fallback,
            geometry: args.geometry,
        })
    }
}

/// Routing backend offering both travel tables and road geometry.
pub(crate) trait Routing: TravelTimeProvider + RouteGeometryProvider {}

impl<T: TravelTimeProvider + RouteGeometryProvider + ?Sized> Routing for T {}

/// Collaborators a plan run needs.
pub(crate) struct PlanServices {
    pub(crate) geocoder: Box<dyn Geocoder>,
    pub(crate) routing: Box<dyn Routing>,
    pub(crate) solver: Box<dyn Solver>,
}

/// Builds the collaborators for the current plan invocation.
pub(crate) trait PlannerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<PlanServices, CliError>;
}

pub(crate) struct DefaultPlannerBuilder;

impl PlannerBuilder for DefaultPlannerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<PlanServices, CliError> {
        let geocoder_config = NominatimGeocoderConfig::new(config.user_agent.clone())
            .with_base_url(config.nominatim_base_url.clone());
        let geocoder = NominatimGeocoder::new(&geocoder_config).map_err(|source| {
            CliError::BuildGeocoder {
                base_url: config.nominatim_base_url.clone(),
                source,
            }
        })?;

        let routing_config = HttpTravelTimeProviderConfig::new(config.osrm_base_url.clone())
            .with_profile(config.profile.clone())
            .with_user_agent(config.user_agent.clone());
        let routing = HttpTravelTimeProvider::with_config(routing_config).map_err(|source| {
            CliError::BuildTravelTimeProvider {
                base_url: config.osrm_base_url.clone(),
                source,
            }
        })?;

        Ok(PlanServices {
            geocoder: Box::new(geocoder),
            routing: Box::new(routing),
            solver: Box::new(HeldKarpSolver::new()),
        })
    }
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &DefaultPlannerBuilder, &mut stdout)
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlannerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let response = execute_plan(args, builder)?;
    write_json(writer, &response)
}

fn execute_plan(args: PlanArgs, builder: &dyn PlannerBuilder) -> Result<PlanResponse, CliError> {
    let config = resolve_plan_config(args)?;
    let addresses = load_addresses(&config.addresses_path)?;
    let services = builder.build(&config)?;
    let planner = TourPlanner::with_config(
        &*services.geocoder,
        &*services.routing,
        &*services.solver,
        config.planner_config(),
    );
    let mut response = planner.plan(addresses.as_slice())?;

    if config.geometry {
        if response.used_fallback {
            log::info!("skipping road geometry: routing service was unavailable");
        } else {
            response.attach_geometry(&*services.routing);
        }
    }
    Ok(response)
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads one address per non-blank line from disk.
pub(crate) fn load_addresses(path: &Utf8Path) -> Result<Vec<String>, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::ReadAddresses {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_addresses(&raw))
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
