// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: built-in defaults, a TOML file and the environment.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::env::load_secret_env;
use crate::error::ConfigError;
use crate::layer::{AppConfigLayer, JobSearchConfigLayer, LoggingConfigLayer};

pub const DEFAULT_ENV_PREFIX: &str = "SKILLMATCH";

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<AppConfigLayer, ConfigError>;
}

pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<AppConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(AppConfigLayer::default())
	}
}

/// TOML file source. A missing file yields an empty layer.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<AppConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(AppConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: AppConfigLayer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: `<PREFIX>_RAPIDAPI_KEY`, `<PREFIX>_RAPIDAPI_HOST` (both with
/// `_FILE` variants), `<PREFIX>_JSEARCH_BASE_URL`,
/// `<PREFIX>_JSEARCH_TIMEOUT_SECS` and `<PREFIX>_LOG_LEVEL`.
pub struct EnvSource {
	prefix: String,
}

impl EnvSource {
	pub fn new() -> Self {
		Self::with_prefix(DEFAULT_ENV_PREFIX)
	}

	pub fn with_prefix(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
		}
	}

	fn var_name(&self, suffix: &str) -> String {
		format!("{}_{suffix}", self.prefix)
	}

	fn load_jsearch(&self) -> Result<Option<JobSearchConfigLayer>, ConfigError> {
		let layer = JobSearchConfigLayer {
			api_key: load_secret_env(&self.var_name("RAPIDAPI_KEY"))
				.map_err(|e| ConfigError::Secret(e.to_string()))?,
			api_host: load_secret_env(&self.var_name("RAPIDAPI_HOST"))
				.map_err(|e| ConfigError::Secret(e.to_string()))?,
			base_url: env_var(&self.var_name("JSEARCH_BASE_URL")),
			timeout_secs: env_u64(&self.var_name("JSEARCH_TIMEOUT_SECS"))?,
		};

		let any_set = layer.api_key.is_some()
			|| layer.api_host.is_some()
			|| layer.base_url.is_some()
			|| layer.timeout_secs.is_some();
		Ok(any_set.then_some(layer))
	}

	fn load_logging(&self) -> Option<LoggingConfigLayer> {
		env_var(&self.var_name("LOG_LEVEL")).map(|level| LoggingConfigLayer { level: Some(level) })
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<AppConfigLayer, ConfigError> {
		debug!(prefix = %self.prefix, "loading environment variables");
		Ok(AppConfigLayer {
			jsearch: self.load_jsearch()?,
			logging: self.load_logging(),
		})
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_u64(name: &str) -> Result<Option<u64>, ConfigError> {
	match env_var(name) {
		Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid u64 value '{v}'"),
		}),
		None => Ok(None),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[test]
	fn test_precedence_ordering() {
		assert!(Precedence::Environment > Precedence::ConfigFile);
		assert!(Precedence::ConfigFile > Precedence::Defaults);
	}

	#[test]
	fn test_defaults_source_returns_empty_layer() {
		let layer = DefaultsSource.load().unwrap();
		assert!(layer.jsearch.is_none());
		assert!(layer.logging.is_none());
	}

	#[test]
	fn test_toml_source_missing_file_returns_empty() {
		let layer = TomlSource::new("/nonexistent/skillmatch.toml").load().unwrap();
		assert!(layer.jsearch.is_none());
	}

	#[test]
	fn test_toml_source_malformed_file_is_error() {
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "[jsearch").unwrap();

		let err = TomlSource::new(file.path()).load().unwrap_err();
		assert!(matches!(err, ConfigError::TomlParse { .. }));
	}

	#[test]
	fn test_env_source_reads_prefixed_vars() {
		let prefix = "SMTEST_ENV_READS";
		std::env::set_var(format!("{prefix}_RAPIDAPI_KEY"), "env-key");
		std::env::set_var(format!("{prefix}_JSEARCH_TIMEOUT_SECS"), "7");
		std::env::set_var(format!("{prefix}_LOG_LEVEL"), "trace");

		let layer = EnvSource::with_prefix(prefix).load().unwrap();
		let jsearch = layer.jsearch.unwrap();
		assert_eq!(jsearch.api_key.unwrap().expose(), "env-key");
		assert!(jsearch.api_host.is_none());
		assert_eq!(jsearch.timeout_secs, Some(7));
		assert_eq!(layer.logging.unwrap().level.as_deref(), Some("trace"));

		std::env::remove_var(format!("{prefix}_RAPIDAPI_KEY"));
		std::env::remove_var(format!("{prefix}_JSEARCH_TIMEOUT_SECS"));
		std::env::remove_var(format!("{prefix}_LOG_LEVEL"));
	}

	#[test]
	fn test_env_source_empty_when_nothing_set() {
		let layer = EnvSource::with_prefix("SMTEST_ENV_NOTHING").load().unwrap();
		assert!(layer.jsearch.is_none());
		assert!(layer.logging.is_none());
	}

	#[test]
	fn test_env_source_rejects_bad_timeout() {
		let prefix = "SMTEST_ENV_BAD_TIMEOUT";
		std::env::set_var(format!("{prefix}_JSEARCH_TIMEOUT_SECS"), "soon");

		let err = EnvSource::with_prefix(prefix).load().unwrap_err();
		assert!(matches!(err, ConfigError::InvalidValue { .. }));

		std::env::remove_var(format!("{prefix}_JSEARCH_TIMEOUT_SECS"));
	}
}
