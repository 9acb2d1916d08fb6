// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Plain-text and JSON rendering of search results.

use skillmatch_jsearch::{JobPosting, SearchResult};

pub const NO_JOBS_MESSAGE: &str = "No jobs found";

/// One block per posting, separated by blank lines.
pub fn render_text(result: &SearchResult) -> String {
	if result.is_empty() {
		return NO_JOBS_MESSAGE.to_string();
	}

	let blocks: Vec<String> = result.iter().map(render_posting).collect();
	let mut output = blocks.join("\n\n");

	let count = result.len();
	let noun = if count == 1 { "job" } else { "jobs" };
	output.push_str(&format!("\n\n{count} {noun} found"));
	output
}

fn render_posting(posting: &JobPosting) -> String {
	let mut lines = vec![
		posting.title().to_string(),
		format!("  {} ({})", posting.employer_name(), posting.city()),
	];

	// The apply button only appears for URLs that can actually be opened.
	if let Some(link) = posting.apply_link() {
		lines.push(format!("  Apply: {link}"));
	}

	lines.join("\n")
}

pub fn render_json(result: &SearchResult) -> serde_json::Result<String> {
	serde_json::to_string_pretty(result)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn posting(id: &str, url: &str) -> JobPosting {
		JobPosting::new(id, "iOS Engineer", "Acme", "Houston", url)
	}

	#[test]
	fn empty_result_shows_message() {
		assert_eq!(render_text(&SearchResult::empty()), NO_JOBS_MESSAGE);
	}

	#[test]
	fn posting_with_valid_link() {
		let result = SearchResult::new(vec![posting("abc", "https://x/y")], 0);
		assert_eq!(
			render_text(&result),
			"iOS Engineer\n  Acme (Houston)\n  Apply: https://x/y\n\n1 job found"
		);
	}

	#[test]
	fn malformed_link_is_omitted() {
		let result = SearchResult::new(vec![posting("a", "::nope"), posting("b", "")], 0);
		let text = render_text(&result);
		assert!(!text.contains("Apply"));
		assert!(text.ends_with("2 jobs found"));
	}

	#[test]
	fn json_contains_domain_fields() {
		let result = SearchResult::new(vec![posting("abc", "https://x/y")], 1);
		let value: serde_json::Value = serde_json::from_str(&render_json(&result).unwrap()).unwrap();

		assert_eq!(value["postings"][0]["id"], "abc");
		assert_eq!(value["postings"][0]["employer_name"], "Acme");
		assert_eq!(value["postings"][0]["apply_url"], "https://x/y");
		assert_eq!(value["skipped"], 1);
	}
}
