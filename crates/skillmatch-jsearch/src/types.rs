// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Search query and job posting types.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fewest result pages the provider accepts per request.
pub const MIN_PAGES: u32 = 1;
/// Most result pages the provider accepts per request.
pub const MAX_PAGES: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
	#[error("at least one non-blank skill is required")]
	NoSkills,

	#[error("location must not be blank")]
	EmptyLocation,
}

/// Skills, location and page count for one search.
///
/// Skills are trimmed and blank ones discarded. A query always holds at
/// least one skill and a non-blank location, and `page_count` always lies
/// in `MIN_PAGES..=MAX_PAGES`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
	skills: Vec<String>,
	location: String,
	page_count: u32,
}

impl SearchQuery {
	/// Builds a query, clamping `page_count` into the provider's range.
	pub fn new<I, S>(skills: I, location: impl Into<String>, page_count: u32) -> Result<Self, QueryError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let skills: Vec<String> = skills
			.into_iter()
			.filter_map(|skill| normalize_skill(skill.as_ref()))
			.collect();
		if skills.is_empty() {
			return Err(QueryError::NoSkills);
		}

		let location = location.into().trim().to_string();
		if location.is_empty() {
			return Err(QueryError::EmptyLocation);
		}

		Ok(Self {
			skills,
			location,
			page_count: page_count.clamp(MIN_PAGES, MAX_PAGES),
		})
	}

	pub fn skills(&self) -> &[String] {
		&self.skills
	}

	pub fn location(&self) -> &str {
		&self.location
	}

	pub fn page_count(&self) -> u32 {
		self.page_count
	}

	pub fn with_page_count(mut self, page_count: u32) -> Self {
		self.page_count = page_count.clamp(MIN_PAGES, MAX_PAGES);
		self
	}

	/// Appends a skill. Returns false if it was blank and therefore ignored.
	pub fn add_skill(&mut self, skill: &str) -> bool {
		match normalize_skill(skill) {
			Some(skill) => {
				self.skills.push(skill);
				true
			}
			None => false,
		}
	}

	/// Removes the first skill equal to `skill`.
	///
	/// Removing the only remaining skill is refused with
	/// [`QueryError::NoSkills`].
	pub fn remove_skill(&mut self, skill: &str) -> Result<bool, QueryError> {
		let skill = skill.trim();
		let Some(index) = self.skills.iter().position(|s| s == skill) else {
			return Ok(false);
		};
		if self.skills.len() == 1 {
			return Err(QueryError::NoSkills);
		}
		self.skills.remove(index);
		Ok(true)
	}

	/// Free-text skills, space separated.
	pub fn skills_text(&self) -> String {
		self.skills.join(" ")
	}

	/// The unencoded provider query: `"<skills> in <location>"`.
	pub fn search_term(&self) -> String {
		format!("{} in {}", self.skills_text(), self.location)
	}
}

fn normalize_skill(skill: &str) -> Option<String> {
	let trimmed = skill.trim();
	(!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// One normalized job listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
	id: String,
	title: String,
	employer_name: String,
	city: String,
	apply_url: String,
}

impl JobPosting {
	pub fn new(
		id: impl Into<String>,
		title: impl Into<String>,
		employer_name: impl Into<String>,
		city: impl Into<String>,
		apply_url: impl Into<String>,
	) -> Self {
		Self {
			id: id.into(),
			title: title.into(),
			employer_name: employer_name.into(),
			city: city.into(),
			apply_url: apply_url.into(),
		}
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn title(&self) -> &str {
		&self.title
	}

	pub fn employer_name(&self) -> &str {
		&self.employer_name
	}

	pub fn city(&self) -> &str {
		&self.city
	}

	/// The raw apply URL exactly as the provider sent it. May be empty or
	/// malformed.
	pub fn apply_url(&self) -> &str {
		&self.apply_url
	}

	/// The apply URL, if it is an absolute http(s) URL.
	pub fn apply_link(&self) -> Option<Url> {
		Url::parse(self.apply_url.trim())
			.ok()
			.filter(|url| matches!(url.scheme(), "http" | "https"))
	}
}

/// Postings for one search, in provider order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResult {
	postings: Vec<JobPosting>,
	/// Provider entries dropped because they were malformed.
	skipped: usize,
}

impl SearchResult {
	pub fn new(postings: Vec<JobPosting>, skipped: usize) -> Self {
		Self { postings, skipped }
	}

	pub fn empty() -> Self {
		Self::default()
	}

	pub fn postings(&self) -> &[JobPosting] {
		&self.postings
	}

	pub fn skipped(&self) -> usize {
		self.skipped
	}

	pub fn len(&self) -> usize {
		self.postings.len()
	}

	pub fn is_empty(&self) -> bool {
		self.postings.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, JobPosting> {
		self.postings.iter()
	}
}

impl IntoIterator for SearchResult {
	type Item = JobPosting;
	type IntoIter = std::vec::IntoIter<JobPosting>;

	fn into_iter(self) -> Self::IntoIter {
		self.postings.into_iter()
	}
}

impl<'a> IntoIterator for &'a SearchResult {
	type Item = &'a JobPosting;
	type IntoIter = std::slice::Iter<'a, JobPosting>;

	fn into_iter(self) -> Self::IntoIter {
		self.postings.iter()
	}
}
