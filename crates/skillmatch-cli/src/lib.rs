// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Search flow and rendering behind the `skillmatch` binary.

pub mod render;
pub mod search;

pub use search::{effective_pages, run_search, OutputFormat, SearchRequest};
