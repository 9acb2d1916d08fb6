// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Loading credentials from `VAR` / `VAR_FILE` environment variables.
//!
//! `VAR_FILE` points at a file holding the secret (Docker and Kubernetes
//! secret mounts) and wins over `VAR` when both are set.

use std::path::PathBuf;
use std::{env, fs};

use thiserror::Error;

use crate::secret::SecretString;

#[derive(Debug, Error)]
pub enum SecretEnvError {
	#[error("failed to read secret file at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("secret file path in {var} is empty")]
	EmptyPath { var: String },
}

#[derive(Debug, Error)]
pub enum RequiredSecretError {
	#[error("required secret not found: set either {var} or {file_var}")]
	Missing { var: String, file_var: String },

	#[error(transparent)]
	Load(#[from] SecretEnvError),
}

/// Load a secret from `{var}_FILE` or `{var}`.
///
/// A single trailing newline is stripped from file contents. Returns
/// `Ok(None)` when neither variable is set.
pub fn load_secret_env(var: &str) -> Result<Option<SecretString>, SecretEnvError> {
	let file_var = format!("{var}_FILE");

	if let Ok(path_str) = env::var(&file_var) {
		if path_str.is_empty() {
			return Err(SecretEnvError::EmptyPath { var: file_var });
		}

		let path = PathBuf::from(&path_str);
		let content = fs::read_to_string(&path).map_err(|source| SecretEnvError::Io {
			path: path.clone(),
			source,
		})?;

		let value = content.strip_suffix('\n').unwrap_or(&content).to_string();
		return Ok(Some(SecretString::new(value)));
	}

	match env::var(var) {
		Ok(value) if !value.is_empty() => Ok(Some(SecretString::new(value))),
		_ => Ok(None),
	}
}

/// Like [`load_secret_env`], but a missing secret is an error.
pub fn require_secret_env(var: &str) -> Result<SecretString, RequiredSecretError> {
	load_secret_env(var)?.ok_or_else(|| RequiredSecretError::Missing {
		var: var.to_string(),
		file_var: format!("{var}_FILE"),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[test]
	fn returns_none_when_not_set() {
		let var = "SKILLMATCH_TEST_UNSET_SECRET";
		env::remove_var(var);
		env::remove_var(format!("{var}_FILE"));

		assert!(load_secret_env(var).unwrap().is_none());
	}

	#[test]
	fn empty_value_counts_as_unset() {
		let var = "SKILLMATCH_TEST_EMPTY_SECRET";
		env::set_var(var, "");
		env::remove_var(format!("{var}_FILE"));

		assert!(load_secret_env(var).unwrap().is_none());
		env::remove_var(var);
	}

	#[test]
	fn reads_direct_value() {
		let var = "SKILLMATCH_TEST_DIRECT_SECRET";
		env::set_var(var, "direct-key");
		env::remove_var(format!("{var}_FILE"));

		let secret = load_secret_env(var).unwrap().unwrap();
		assert_eq!(secret.expose(), "direct-key");
		env::remove_var(var);
	}

	#[test]
	fn file_wins_and_trailing_newline_is_stripped() {
		let var = "SKILLMATCH_TEST_FILE_SECRET";
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "file-key").unwrap();

		env::set_var(var, "direct-key");
		env::set_var(format!("{var}_FILE"), file.path().to_str().unwrap());

		let secret = load_secret_env(var).unwrap().unwrap();
		assert_eq!(secret.expose(), "file-key");

		env::remove_var(var);
		env::remove_var(format!("{var}_FILE"));
	}

	#[test]
	fn empty_file_path_is_error() {
		let var = "SKILLMATCH_TEST_EMPTY_PATH_SECRET";
		env::set_var(format!("{var}_FILE"), "");

		let err = load_secret_env(var).unwrap_err();
		assert!(matches!(err, SecretEnvError::EmptyPath { .. }));
		env::remove_var(format!("{var}_FILE"));
	}

	#[test]
	fn unreadable_file_is_error() {
		let var = "SKILLMATCH_TEST_MISSING_FILE_SECRET";
		env::set_var(format!("{var}_FILE"), "/nonexistent/skillmatch/secret");

		let err = load_secret_env(var).unwrap_err();
		assert!(matches!(err, SecretEnvError::Io { .. }));
		env::remove_var(format!("{var}_FILE"));
	}

	#[test]
	fn require_reports_both_variable_names() {
		let var = "SKILLMATCH_TEST_REQUIRED_SECRET";
		env::remove_var(var);
		env::remove_var(format!("{var}_FILE"));

		let err = require_secret_env(var).unwrap_err();
		let message = err.to_string();
		assert!(message.contains(var));
		assert!(message.contains("SKILLMATCH_TEST_REQUIRED_SECRET_FILE"));
	}
}
