// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for SkillMatch.
//!
//! This crate provides:
//! - [`Secret`], a redacting wrapper for the RapidAPI credentials
//! - `VAR` / `VAR_FILE` secret loading from the environment
//! - Layered configuration from defaults, a TOML file and `SKILLMATCH_*`
//!   environment variables
//!
//! # Usage
//!
//! ```ignore
//! use skillmatch_config::load_config;
//!
//! let config = load_config()?;
//! println!("searching {}", config.jsearch.redacted_endpoint());
//! ```

pub mod env;
pub mod error;
pub mod layer;
pub mod paths;
pub mod secret;
pub mod sources;

pub use env::{load_secret_env, require_secret_env, RequiredSecretError, SecretEnvError};
pub use error::ConfigError;
pub use layer::{
	AppConfigLayer, JobSearchConfig, JobSearchConfigLayer, LoggingConfig, LoggingConfigLayer,
	DEFAULT_API_HOST, DEFAULT_TIMEOUT_SECS,
};
pub use paths::default_config_path;
pub use secret::{Secret, SecretString, REDACTED};
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use std::path::PathBuf;

use tracing::{debug, info};

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
	pub jsearch: JobSearchConfig,
	pub logging: LoggingConfig,
}

/// Load configuration with the default config file location.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`SKILLMATCH_*`)
/// 2. Config file (`$XDG_CONFIG_HOME/skillmatch/config.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<AppConfig, ConfigError> {
	load_config_with_file(default_config_path()?)
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(config_path: impl Into<PathBuf>) -> Result<AppConfig, ConfigError> {
	let sources: Vec<Box<dyn ConfigSource>> = vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource::new()),
	];
	load_from_sources(sources)
}

/// Merge the given sources in precedence order and resolve the result.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<AppConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = AppConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	finalize(merged)
}

fn finalize(layer: AppConfigLayer) -> Result<AppConfig, ConfigError> {
	let jsearch = layer.jsearch.unwrap_or_default().finalize()?;
	let logging = layer.logging.unwrap_or_default().finalize();

	info!(
		endpoint = %jsearch.redacted_endpoint(),
		timeout_secs = jsearch.timeout.as_secs(),
		"configuration loaded"
	);

	Ok(AppConfig { jsearch, logging })
}
