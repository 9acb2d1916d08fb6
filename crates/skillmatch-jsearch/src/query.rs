// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Provider request URL construction.
//!
//! Skills and location are percent-encoded separately and joined with
//! `%20in%20`. Only RFC 3986 unreserved characters pass through unchanged,
//! so spaces become `%20` (never `+`) and non-ASCII text is encoded byte by
//! byte from its UTF-8 form.

use reqwest::Url;

use crate::error::JobSearchError;
use crate::types::SearchQuery;

/// Fixed first page; the provider returns `num_pages` pages starting here.
pub const FIRST_PAGE: u32 = 1;
/// Posting-age filter sent with every search.
pub const DATE_POSTED: &str = "all";

/// The percent-encoded value of the `query` parameter.
pub fn encode_search_term(query: &SearchQuery) -> String {
	format!(
		"{}%20in%20{}",
		urlencoding::encode(&query.skills_text()),
		urlencoding::encode(query.location())
	)
}

/// Builds the full GET URL for `query` against `base_url`.
pub fn search_url(base_url: &str, query: &SearchQuery) -> Result<Url, JobSearchError> {
	let mut url = Url::parse(base_url)
		.map_err(|e| JobSearchError::InvalidRequest(format!("Invalid base URL '{base_url}': {e}")))?;

	let params = format!(
		"query={}&page={FIRST_PAGE}&num_pages={}&date_posted={DATE_POSTED}",
		encode_search_term(query),
		query.page_count()
	);

	let full_query = match url.query() {
		Some(existing) if !existing.is_empty() => format!("{existing}&{params}"),
		_ => params,
	};
	url.set_query(Some(&full_query));

	Ok(url)
}
