// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared HTTP client construction with a consistent User-Agent header.

use reqwest::{Client, ClientBuilder};

/// Creates an HTTP client builder with the standard SkillMatch User-Agent.
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Returns the standard User-Agent string: `skillmatch/{version}`.
pub fn user_agent() -> String {
	format!("skillmatch/{}", env!("CARGO_PKG_VERSION"))
}
