// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Latest-search-wins coordination for interactive callers.
//!
//! A UI issues a new search whenever the user edits the query or refreshes.
//! [`SearchSession`] aborts the previous in-flight request when a new one
//! starts, and a superseded [`SearchTicket`] resolves to `None` even if its
//! request had already finished.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, error};

use crate::client::JobSearchClient;
use crate::error::JobSearchError;
use crate::types::{SearchQuery, SearchResult};

pub struct SearchSession {
	client: JobSearchClient,
	generation: Arc<AtomicU64>,
	in_flight: Mutex<Option<AbortHandle>>,
}

/// Handle to one started search.
#[must_use = "a ticket must be awaited to observe the search result"]
pub struct SearchTicket {
	generation: u64,
	current: Arc<AtomicU64>,
	handle: JoinHandle<Result<SearchResult, JobSearchError>>,
}

impl SearchSession {
	pub fn new(client: JobSearchClient) -> Self {
		Self {
			client,
			generation: Arc::new(AtomicU64::new(0)),
			in_flight: Mutex::new(None),
		}
	}

	/// Number of searches started so far.
	pub fn generation(&self) -> u64 {
		self.generation.load(Ordering::SeqCst)
	}

	/// Starts a search, superseding any search still in flight.
	///
	/// Must be called from within a tokio runtime.
	pub fn start(&self, query: SearchQuery) -> SearchTicket {
		let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);

		let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
		if let Some(previous) = in_flight.take() {
			debug!(generation, "Superseding in-flight search");
			previous.abort();
		}

		let client = self.client.clone();
		let handle = tokio::spawn(async move { client.search(&query).await });
		*in_flight = Some(handle.abort_handle());

		SearchTicket {
			generation,
			current: Arc::clone(&self.generation),
			handle,
		}
	}

	/// Aborts the in-flight search, if any. Its ticket resolves to `None`.
	pub fn cancel(&self) {
		let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
		self.generation.fetch_add(1, Ordering::SeqCst);
		if let Some(previous) = in_flight.take() {
			debug!("Cancelling in-flight search");
			previous.abort();
		}
	}
}

impl SearchTicket {
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// True if a newer search has started or the session was cancelled.
	pub fn is_superseded(&self) -> bool {
		self.current.load(Ordering::SeqCst) != self.generation
	}

	/// Waits for the search. `None` means it was superseded or cancelled.
	pub async fn wait(self) -> Option<Result<SearchResult, JobSearchError>> {
		let outcome = match self.handle.await {
			Ok(outcome) => outcome,
			Err(e) if e.is_cancelled() => {
				debug!(generation = self.generation, "Search was aborted");
				return None;
			}
			Err(e) => {
				error!(generation = self.generation, error = %e, "Search task panicked");
				return None;
			}
		};

		if self.current.load(Ordering::SeqCst) != self.generation {
			debug!(generation = self.generation, "Discarding superseded search result");
			return None;
		}

		Some(outcome)
	}
}
