//! Suggest command: address autocomplete for interactive front ends.

use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;
use tourloop_core::GeocodeError;
use tourloop_data::geocoding::{GeoapifyAutocomplete, GeoapifyAutocompleteConfig, Suggestion};

use crate::output::write_json;
use crate::{
    ARG_GEOAPIFY_API_KEY, ARG_LIMIT, ARG_SUGGEST_QUERY, CliError, ENV_GEOAPIFY_API_KEY,
    ENV_SUGGEST_QUERY,
};

const DEFAULT_LIMIT: usize = 5;
const MAX_LIMIT: usize = 20;

/// CLI arguments for the `suggest` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Suggest complete addresses for a partial query")]
#[ortho_config(prefix = "TOURLOOP")]
pub(crate) struct SuggestArgs {
    /// Partial address to complete.
    #[arg(value_name = "query")]
    #[serde(default)]
    pub(crate) query: Option<String>,
    /// Geoapify API key.
    #[arg(long = ARG_GEOAPIFY_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) geoapify_api_key: Option<String>,
    /// Maximum number of suggestions.
    #[arg(long = ARG_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

impl SuggestArgs {
    fn into_config(self) -> Result<SuggestConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SuggestConfig::try_from(merged)
    }
}

/// Resolved `suggest` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SuggestConfig {
    pub(crate) query: String,
    pub(crate) api_key: String,
    pub(crate) limit: usize,
}

impl TryFrom<SuggestArgs> for SuggestConfig {
    type Error = CliError;

    fn try_from(args: SuggestArgs) -> Result<Self, Self::Error> {
        let query = args.query.ok_or(CliError::MissingArgument {
            field: ARG_SUGGEST_QUERY,
            env: ENV_SUGGEST_QUERY,
        })?;
        let api_key = args
            .geoapify_api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_GEOAPIFY_API_KEY,
                env: ENV_GEOAPIFY_API_KEY,
            })?;
        let limit = args.limit.unwrap_or(DEFAULT_LIMIT);
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(CliError::OutOfRange {
                field: ARG_LIMIT,
                value: limit,
                min: 1,
                max: MAX_LIMIT,
            });
        }
        Ok(Self {
            query,
            api_key,
            limit,
        })
    }
}

/// Source of address suggestions.
pub(crate) trait Suggester {
    fn suggest(&self, query: &str, limit: usize) -> Result<Vec<Suggestion>, GeocodeError>;
}

impl Suggester for GeoapifyAutocomplete {
    fn suggest(&self, query: &str, limit: usize) -> Result<Vec<Suggestion>, GeocodeError> {
        Self::suggest(self, query, limit)
    }
}

/// Builds the suggestion source for the current invocation.
pub(crate) trait SuggesterBuilder {
    fn build(&self, config: &SuggestConfig) -> Result<Box<dyn Suggester>, CliError>;
}

pub(crate) struct DefaultSuggesterBuilder;

impl SuggesterBuilder for DefaultSuggesterBuilder {
    fn build(&self, config: &SuggestConfig) -> Result<Box<dyn Suggester>, CliError> {
        let autocomplete =
            GeoapifyAutocomplete::new(&GeoapifyAutocompleteConfig::new(config.api_key.clone()))
                .map_err(CliError::BuildAutocomplete)?;
        Ok(Box::new(autocomplete))
    }
}

pub(crate) fn run_suggest(args: SuggestArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_suggest_with(args, &DefaultSuggesterBuilder, &mut stdout)
}

pub(crate) fn run_suggest_with(
    args: SuggestArgs,
    builder: &dyn SuggesterBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let suggester = builder.build(&config)?;
    let suggestions = suggester
        .suggest(&config.query, config.limit)
        .map_err(CliError::Suggest)?;
    write_json(writer, &suggestions)
}
