// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! One search from the command line: validate, fetch, render.

use std::future::Future;

use anyhow::Context;
use skillmatch_config::JobSearchConfig;
use skillmatch_jsearch::{JobSearchClient, SearchQuery, SearchSession, MAX_PAGES, MIN_PAGES};
use tracing::{info, warn};

use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
	#[default]
	Text,
	Json,
}

/// What the user asked for on the command line.
#[derive(Debug, Clone)]
pub struct SearchRequest {
	pub skills: Vec<String>,
	pub location: String,
	pub pages: u32,
	pub format: OutputFormat,
}

/// The page count actually requested from the provider. Logs a warning
/// when `requested` falls outside the provider's limits.
pub fn effective_pages(requested: u32) -> u32 {
	let pages = requested.clamp(MIN_PAGES, MAX_PAGES);
	if pages != requested {
		warn!(
			requested,
			min = MIN_PAGES,
			max = MAX_PAGES,
			"page count out of range, clamping"
		);
	}
	pages
}

/// Runs a search and returns the rendered output.
///
/// Fails when the query is invalid, the search fails, or `cancel`
/// completes before the search does.
pub async fn run_search<C>(
	config: &JobSearchConfig,
	request: SearchRequest,
	cancel: C,
) -> anyhow::Result<String>
where
	C: Future<Output = ()>,
{
	let pages = effective_pages(request.pages);
	let query = SearchQuery::new(&request.skills, request.location, pages)?;
	let client = JobSearchClient::from_config(config)?;
	let session = SearchSession::new(client);

	info!(
		term = %query.search_term(),
		pages = query.page_count(),
		"starting job search"
	);

	let ticket = session.start(query);
	let outcome = tokio::select! {
		outcome = ticket.wait() => outcome,
		_ = cancel => {
			session.cancel();
			info!("search cancelled");
			None
		}
	};

	let Some(outcome) = outcome else {
		anyhow::bail!("search cancelled");
	};
	let result = outcome.context("job search failed")?;

	match request.format {
		OutputFormat::Text => Ok(render::render_text(&result)),
		OutputFormat::Json => Ok(render::render_json(&result)?),
	}
}
