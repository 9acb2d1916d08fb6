// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partially specified configuration layers and their merge rules.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::secret::SecretString;

pub const DEFAULT_API_HOST: &str = "jsearch.p.rapidapi.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// One configuration source's view. Every field is optional; later layers
/// override earlier ones field by field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfigLayer {
	#[serde(default)]
	pub jsearch: Option<JobSearchConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
}

impl AppConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if let Some(other_jsearch) = other.jsearch {
			self
				.jsearch
				.get_or_insert_with(Default::default)
				.merge(other_jsearch);
		}
		if let Some(other_logging) = other.logging {
			self
				.logging
				.get_or_insert_with(Default::default)
				.merge(other_logging);
		}
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobSearchConfigLayer {
	pub api_key: Option<SecretString>,
	pub api_host: Option<SecretString>,
	pub base_url: Option<String>,
	pub timeout_secs: Option<u64>,
}

impl JobSearchConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.api_key.is_some() {
			self.api_key = other.api_key;
		}
		if other.api_host.is_some() {
			self.api_host = other.api_host;
		}
		if other.base_url.is_some() {
			self.base_url = other.base_url;
		}
		if other.timeout_secs.is_some() {
			self.timeout_secs = other.timeout_secs;
		}
	}

	pub fn finalize(self) -> Result<JobSearchConfig, ConfigError> {
		let api_key = self
			.api_key
			.filter(|key| !key.is_blank())
			.ok_or_else(|| ConfigError::MissingField("jsearch.api_key".to_string()))?;

		let api_host = self
			.api_host
			.filter(|host| !host.is_blank())
			.unwrap_or_else(|| SecretString::new(DEFAULT_API_HOST.to_string()));

		let timeout_secs = self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
		if timeout_secs == 0 {
			return Err(ConfigError::InvalidValue {
				key: "jsearch.timeout_secs".to_string(),
				message: "timeout must be at least one second".to_string(),
			});
		}

		Ok(JobSearchConfig {
			api_key,
			api_host,
			base_url: self.base_url.filter(|url| !url.trim().is_empty()),
			timeout: Duration::from_secs(timeout_secs),
		})
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfigLayer {
	pub level: Option<String>,
}

impl LoggingConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.level.is_some() {
			self.level = other.level;
		}
	}

	pub fn finalize(self) -> LoggingConfig {
		LoggingConfig {
			level: self.level.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
		}
	}
}

/// Resolved provider settings.
#[derive(Debug, Clone)]
pub struct JobSearchConfig {
	pub api_key: SecretString,
	pub api_host: SecretString,
	/// Full search endpoint, overriding the one derived from `api_host`.
	pub base_url: Option<String>,
	pub timeout: Duration,
}

impl JobSearchConfig {
	/// The search endpoint requests are sent to.
	pub fn endpoint(&self) -> String {
		match &self.base_url {
			Some(url) => url.clone(),
			None => format!("https://{}/search", self.api_host.expose()),
		}
	}

	/// [`JobSearchConfig::endpoint`] with the API host masked, for logging.
	pub fn redacted_endpoint(&self) -> String {
		self.api_host.redact_from(&self.endpoint())
	}
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
	pub level: String,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: DEFAULT_LOG_LEVEL.to_string(),
		}
	}
}
