//! Integration tests for CLI argument handling
//!
//! Tests flag parsing and startup validation from the command line.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_npsites"))
        .args(args)
        .env_remove("MAPQUEST_API_KEY")
        .output()
        .expect("Failed to execute npsites")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("npsites"), "Help should mention npsites");
    assert!(stdout.contains("--cache-file"), "Help should mention --cache-file");
    assert!(stdout.contains("--api-key"), "Help should mention --api-key");
}

#[test]
fn test_version_flag_exits_successfully() {
    let output = run_cli(&["--version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_api_key_prints_error_and_exits() {
    let output = run_cli(&[]);
    assert!(
        !output.status.success(),
        "Expected missing API key to fail"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("API key"),
        "Should print error message about the API key: {}",
        stderr
    );
}

#[test]
fn test_unknown_flag_is_rejected() {
    let output = run_cli(&["--plan"]);
    assert!(!output.status.success());
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use npsites::cli::{Cli, CliError, StartupConfig};
    use std::path::PathBuf;

    #[test]
    fn test_cli_cache_file_default() {
        let cli = Cli::parse_from(["npsites", "--api-key", "k"]);
        assert_eq!(cli.cache_file, PathBuf::from("nps_cache.json"));
    }

    #[test]
    fn test_cli_cache_file_override() {
        let cli = Cli::parse_from(["npsites", "--api-key", "k", "--cache-file", "x.json"]);
        assert_eq!(cli.cache_file, PathBuf::from("x.json"));
    }

    #[test]
    fn test_startup_config_carries_urls() {
        let cli = Cli::parse_from([
            "npsites",
            "--api-key",
            "k",
            "--nps-base-url",
            "http://nps.local",
            "--places-url",
            "http://places.local/radius",
        ]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.nps_base_url, "http://nps.local");
        assert_eq!(config.places_url, "http://places.local/radius");
    }

    #[test]
    fn test_startup_config_empty_api_key_is_error() {
        let cli = Cli::parse_from(["npsites", "--api-key", ""]);
        assert!(matches!(
            StartupConfig::from_cli(&cli),
            Err(CliError::MissingApiKey)
        ));
    }
}
