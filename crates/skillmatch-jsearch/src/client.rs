// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! JSearch API client implementation.

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use skillmatch_config::{JobSearchConfig, SecretString};
use tracing::{debug, error, instrument, trace, warn};

use crate::error::JobSearchError;
use crate::http;
use crate::query::search_url;
use crate::types::{JobPosting, SearchQuery, SearchResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const API_KEY_HEADER: &str = "x-rapidapi-key";
const API_HOST_HEADER: &str = "x-rapidapi-host";

/// Client for the JSearch job search API.
///
/// Holds no per-search state, so one client (or its clones, which share a
/// connection pool) can serve any number of concurrent searches. Each call
/// to [`JobSearchClient::search`] makes exactly one request.
#[derive(Clone)]
pub struct JobSearchClient {
	http_client: Client,
	api_key: SecretString,
	api_host: SecretString,
	base_url: String,
	timeout: Duration,
}

impl fmt::Debug for JobSearchClient {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("JobSearchClient")
			.field("api_key", &self.api_key)
			.field("api_host", &self.api_host)
			.field("base_url", &self.redacted_base_url())
			.field("timeout", &self.timeout)
			.finish_non_exhaustive()
	}
}

#[derive(Debug, Deserialize)]
struct JSearchApiResponse {
	data: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct JSearchApiJob {
	job_id: String,
	job_title: String,
	employer_name: String,
	job_city: String,
	job_apply_link: String,
}

impl From<JSearchApiJob> for JobPosting {
	fn from(job: JSearchApiJob) -> Self {
		JobPosting::new(
			job.job_id,
			job.job_title,
			job.employer_name,
			job.job_city,
			job.job_apply_link,
		)
	}
}

impl JobSearchClient {
	/// Creates a client for the given RapidAPI key and host. Requests go to
	/// `https://{api_host}/search`.
	pub fn new(
		api_key: impl Into<String>,
		api_host: impl Into<String>,
	) -> Result<Self, JobSearchError> {
		let api_host = api_host.into();
		let http_client = http::builder()
			.build()
			.map_err(JobSearchError::ClientBuild)?;

		Ok(Self {
			http_client,
			api_key: SecretString::new(api_key.into()),
			base_url: format!("https://{api_host}/search"),
			api_host: SecretString::new(api_host),
			timeout: REQUEST_TIMEOUT,
		})
	}

	/// Creates a client from resolved configuration.
	pub fn from_config(config: &JobSearchConfig) -> Result<Self, JobSearchError> {
		let http_client = http::builder()
			.build()
			.map_err(JobSearchError::ClientBuild)?;

		Ok(Self {
			http_client,
			api_key: config.api_key.clone(),
			api_host: config.api_host.clone(),
			base_url: config.endpoint(),
			timeout: config.timeout,
		})
	}

	/// Sets a custom search endpoint (useful for testing).
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	/// Sets the per-request timeout.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	pub fn timeout(&self) -> Duration {
		self.timeout
	}

	fn redacted_base_url(&self) -> String {
		self.api_host.redact_from(&self.base_url)
	}

	/// Runs one search.
	///
	/// Entries of the provider's `data` array that lack a required field are
	/// dropped and counted in [`SearchResult::skipped`]; everything else that
	/// goes wrong is returned as an error.
	#[instrument(skip(self, query), fields(term = %query.search_term(), pages = query.page_count()))]
	pub async fn search(&self, query: &SearchQuery) -> Result<SearchResult, JobSearchError> {
		let url = search_url(&self.base_url, query)?;

		debug!(url = %self.redacted_base_url(), "Sending search request to JSearch");
		trace!(url = %self.api_host.redact_from(url.as_str()), "Full request URL");

		let response = self
			.http_client
			.get(url)
			.header(API_KEY_HEADER, self.api_key.expose())
			.header(API_HOST_HEADER, self.api_host.expose())
			.timeout(self.timeout)
			.send()
			.await
			.map_err(map_transport_error)?;

		let status = response.status();
		debug!(status = %status, "Received response from JSearch");

		if !status.is_success() {
			let status_code = status.as_u16();
			let body = response.text().await.unwrap_or_default();
			return Err(classify_status(status_code, body));
		}

		let body = response.text().await.map_err(|e| {
			error!(error = %e, "Failed to read response body");
			map_transport_error(e)
		})?;

		trace!(bytes = body.len(), "Response body received");

		let result = decode_body(&body)?;

		debug!(
			result_count = result.len(),
			skipped = result.skipped(),
			"Search completed successfully"
		);

		Ok(result)
	}

	/// Runs one search, reporting any failure as an empty result.
	///
	/// Callers cannot tell "no matches" from "search failed" with this
	/// method; prefer [`JobSearchClient::search`].
	pub async fn search_or_empty(&self, query: &SearchQuery) -> SearchResult {
		match self.search(query).await {
			Ok(result) => result,
			Err(e) => {
				warn!(error = %e, "Search failed, returning no results");
				SearchResult::empty()
			}
		}
	}
}

fn map_transport_error(e: reqwest::Error) -> JobSearchError {
	if e.is_timeout() {
		error!("Request timed out");
		return JobSearchError::Timeout;
	}
	// The request URL embeds the API host.
	let e = e.without_url();
	error!(error = %e, "Network error during JSearch request");
	JobSearchError::Network(e)
}

fn classify_status(status_code: u16, body: String) -> JobSearchError {
	let lower = body.to_lowercase();
	let mentions_limit =
		lower.contains("rate") || lower.contains("quota") || lower.contains("limit");

	match status_code {
		429 => {
			error!(status = status_code, "Rate limit exceeded");
			JobSearchError::RateLimited
		}
		401 | 403 if mentions_limit => {
			error!(status = status_code, "Rate limit exceeded");
			JobSearchError::RateLimited
		}
		401 | 403 => {
			error!(status = status_code, "Unauthorized request");
			JobSearchError::Unauthorized
		}
		_ => {
			error!(status = status_code, body = %body, "JSearch API error");
			JobSearchError::Api {
				status: status_code,
				message: body,
			}
		}
	}
}

/// Decodes a JSearch response body, dropping malformed entries.
pub(crate) fn decode_body(body: &str) -> Result<SearchResult, JobSearchError> {
	let response: JSearchApiResponse = serde_json::from_str(body).map_err(|e| {
		error!(error = %e, "Failed to parse JSearch response");
		JobSearchError::Decode(format!("JSON parse error: {e}"))
	})?;

	let total = response.data.len();
	let postings: Vec<JobPosting> = response
		.data
		.into_iter()
		.enumerate()
		.filter_map(
			|(index, entry)| match serde_json::from_value::<JSearchApiJob>(entry) {
				Ok(job) => Some(JobPosting::from(job)),
				Err(e) => {
					debug!(index, error = %e, "Dropping malformed job entry");
					None
				}
			},
		)
		.collect();

	let skipped = total - postings.len();
	if skipped > 0 {
		warn!(skipped, total, "Some job entries could not be decoded");
	}

	Ok(SearchResult::new(postings, skipped))
}
