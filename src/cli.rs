//! Command-line interface parsing for npsites
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! the configuration the interactive session starts from.

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

use crate::data::nps::NPS_BASE_URL;
use crate::data::places::PLACES_SEARCH_URL;

/// Default cache document, relative to the working directory
pub const DEFAULT_CACHE_FILE: &str = "nps_cache.json";

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// No API key was given on the command line or in the environment
    #[error("Missing places API key: pass --api-key or set MAPQUEST_API_KEY")]
    MissingApiKey,
}

/// npsites - Browse national sites by state and find places nearby
#[derive(Parser, Debug)]
#[command(name = "npsites")]
#[command(about = "Browse US national sites by state and look up places nearby")]
#[command(version)]
pub struct Cli {
    /// JSON file used to cache every fetched page and API response
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CACHE_FILE)]
    pub cache_file: PathBuf,

    /// API key for the places search
    #[arg(long, env = "MAPQUEST_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Root URL of the parks site
    #[arg(long, value_name = "URL", default_value = NPS_BASE_URL)]
    pub nps_base_url: String,

    /// Radius-search endpoint of the places API
    #[arg(long, value_name = "URL", default_value = PLACES_SEARCH_URL)]
    pub places_url: String,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// Where the cache document lives
    pub cache_file: PathBuf,
    /// Places API credential, never empty
    pub api_key: String,
    /// Root URL of the parks site
    pub nps_base_url: String,
    /// Radius-search endpoint of the places API
    pub places_url: String,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError::MissingApiKey)` if the API key is absent or blank
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let api_key = cli
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(CliError::MissingApiKey)?;

        Ok(StartupConfig {
            cache_file: cli.cache_file.clone(),
            api_key: api_key.to_string(),
            nps_base_url: cli.nps_base_url.clone(),
            places_url: cli.places_url.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::try_parse_from(["npsites", "--api-key", "k"]).unwrap();
        assert_eq!(cli.cache_file, PathBuf::from("nps_cache.json"));
        assert_eq!(cli.nps_base_url, "https://www.nps.gov");
        assert_eq!(cli.places_url, "http://www.mapquestapi.com/search/v2/radius");
        assert!(!cli.quiet);
    }

    #[test]
    fn test_cli_parse_overrides() {
        let cli = Cli::try_parse_from([
            "npsites",
            "--cache-file",
            "/tmp/other.json",
            "--api-key",
            "k",
            "--nps-base-url",
            "http://localhost:1",
            "--places-url",
            "http://localhost:2/radius",
            "-q",
        ])
        .unwrap();
        assert_eq!(cli.cache_file, PathBuf::from("/tmp/other.json"));
        assert_eq!(cli.nps_base_url, "http://localhost:1");
        assert_eq!(cli.places_url, "http://localhost:2/radius");
        assert!(cli.quiet);
    }

    #[test]
    fn test_startup_config_from_cli() {
        let cli = Cli::try_parse_from(["npsites", "--api-key", " abc123 "]).unwrap();
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.cache_file, PathBuf::from(DEFAULT_CACHE_FILE));
    }

    #[test]
    fn test_startup_config_blank_api_key() {
        let cli = Cli::try_parse_from(["npsites", "--api-key", "   "]).unwrap();
        let err = StartupConfig::from_cli(&cli).unwrap_err();
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn test_startup_config_missing_api_key() {
        let cli = Cli {
            cache_file: PathBuf::from(DEFAULT_CACHE_FILE),
            api_key: None,
            nps_base_url: NPS_BASE_URL.to_string(),
            places_url: PLACES_SEARCH_URL.to_string(),
            quiet: false,
        };
        assert!(matches!(
            StartupConfig::from_cli(&cli),
            Err(CliError::MissingApiKey)
        ));
    }
}
