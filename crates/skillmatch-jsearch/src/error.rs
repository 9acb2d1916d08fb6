// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the JSearch client.

use thiserror::Error;

/// Errors that can occur when searching the JSearch API.
#[derive(Debug, Error)]
pub enum JobSearchError {
	/// The underlying HTTP client could not be constructed.
	#[error("Failed to build HTTP client: {0}")]
	ClientBuild(#[source] reqwest::Error),

	/// The request URL could not be constructed.
	#[error("Invalid request: {0}")]
	InvalidRequest(String),

	/// Connection, DNS or transport failure.
	#[error("Network error: {0}")]
	Network(#[from] reqwest::Error),

	/// No response within the configured timeout.
	#[error("Request timed out")]
	Timeout,

	#[error("Rate limit exceeded")]
	RateLimited,

	/// The API key or host was rejected.
	#[error("Invalid RapidAPI credentials")]
	Unauthorized,

	/// Any other non-2xx response.
	#[error("JSearch API error: {status} - {message}")]
	Api { status: u16, message: String },

	/// The body was not JSON or had no `data` array.
	#[error("Invalid response from JSearch: {0}")]
	Decode(String),
}

impl JobSearchError {
	/// Whether a manual retry might succeed. The client never retries on its
	/// own.
	pub fn is_transient(&self) -> bool {
		match self {
			JobSearchError::Network(e) => e.is_timeout() || e.is_connect() || e.is_request(),
			JobSearchError::Timeout | JobSearchError::RateLimited => true,
			JobSearchError::Api { status, .. } => *status >= 500,
			JobSearchError::ClientBuild(_)
			| JobSearchError::InvalidRequest(_)
			| JobSearchError::Unauthorized
			| JobSearchError::Decode(_) => false,
		}
	}
}
