// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! XDG config file location.

use std::path::PathBuf;

use crate::error::ConfigError;

/// `$XDG_CONFIG_HOME/skillmatch/config.toml`, or `~/.config/skillmatch/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
	let config_home = match std::env::var_os("XDG_CONFIG_HOME") {
		Some(dir) if !dir.is_empty() => PathBuf::from(dir),
		_ => dirs::home_dir()
			.ok_or(ConfigError::HomeDirNotFound)?
			.join(".config"),
	};

	let path = config_home.join("skillmatch").join("config.toml");
	tracing::debug!(path = %path.display(), "resolved default config path");
	Ok(path)
}
