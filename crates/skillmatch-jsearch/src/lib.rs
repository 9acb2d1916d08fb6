// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! JSearch (RapidAPI) job search client for SkillMatch.
//!
//! Turns a [`SearchQuery`] of skills and a location into a single provider
//! request and maps the response into [`JobPosting`]s, preserving provider
//! order. Malformed entries are dropped individually; transport, status and
//! whole-body decode failures are reported as [`JobSearchError`].
//!
//! ```no_run
//! use skillmatch_jsearch::{JobSearchClient, SearchQuery};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = JobSearchClient::new("rapidapi-key", "jsearch.p.rapidapi.com")?;
//! let query = SearchQuery::new(["Swift", "iOS"], "Houston, TX", 1)?;
//! for job in client.search(&query).await?.iter() {
//!     println!("{} at {}", job.title(), job.employer_name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod http;
pub mod query;
pub mod session;
pub mod types;

pub use client::JobSearchClient;
pub use error::JobSearchError;
pub use session::{SearchSession, SearchTicket};
pub use types::{JobPosting, QueryError, SearchQuery, SearchResult, MAX_PAGES, MIN_PAGES};
