// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::time::Duration;

use serde_json::json;
use skillmatch_jsearch::{JobPosting, JobSearchClient, SearchQuery, SearchSession};
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_search(server: &MockServer, term: &str, job_id: &str, delay: Duration) {
	Mock::given(method("GET"))
		.and(query_param("query", term))
		.respond_with(
			ResponseTemplate::new(200)
				.set_body_json(json!({
					"data": [{
						"job_id": job_id,
						"job_title": "Engineer",
						"employer_name": "Acme",
						"job_city": "Anywhere",
						"job_apply_link": ""
					}]
				}))
				.set_delay(delay),
		)
		.mount(server)
		.await;
}

fn session_for(server: &MockServer) -> SearchSession {
	let client = JobSearchClient::new("key", "host")
		.unwrap()
		.with_base_url(format!("{}/search", server.uri()));
	SearchSession::new(client)
}

#[tokio::test]
async fn new_search_supersedes_in_flight_one() {
	let server = MockServer::start().await;
	mount_search(&server, "Rust in Austin", "slow", Duration::from_secs(2)).await;
	mount_search(&server, "Go in Berlin", "fast", Duration::ZERO).await;

	let session = session_for(&server);
	let first = session.start(SearchQuery::new(["Rust"], "Austin", 1).unwrap());
	let second = session.start(SearchQuery::new(["Go"], "Berlin", 1).unwrap());

	assert_eq!(first.generation(), 1);
	assert_eq!(second.generation(), 2);
	assert!(first.is_superseded());
	assert!(!second.is_superseded());

	assert!(first.wait().await.is_none());

	let result = second.wait().await.unwrap().unwrap();
	let ids: Vec<&str> = result.iter().map(JobPosting::id).collect();
	assert_eq!(ids, ["fast"]);
}

#[tokio::test]
async fn completed_but_superseded_result_is_discarded() {
	let server = MockServer::start().await;
	mount_search(&server, "Rust in Austin", "old", Duration::ZERO).await;
	mount_search(&server, "Rust in Austin, TX", "new", Duration::ZERO).await;

	let session = session_for(&server);
	let first = session.start(SearchQuery::new(["Rust"], "Austin", 1).unwrap());
	tokio::time::sleep(Duration::from_millis(300)).await;

	let second = session.start(SearchQuery::new(["Rust"], "Austin, TX", 1).unwrap());

	assert!(first.wait().await.is_none());
	assert!(second.wait().await.unwrap().is_ok());
}

#[tokio::test]
async fn cancel_aborts_in_flight_search() {
	let server = MockServer::start().await;
	mount_search(&server, "Rust in Austin", "slow", Duration::from_secs(5)).await;

	let session = session_for(&server);
	let ticket = session.start(SearchQuery::new(["Rust"], "Austin", 1).unwrap());
	session.cancel();

	let outcome = tokio::time::timeout(Duration::from_secs(1), ticket.wait())
		.await
		.expect("cancelled ticket should resolve promptly");
	assert!(outcome.is_none());
}

#[tokio::test]
async fn refresh_reissues_the_same_query() {
	let server = MockServer::start().await;
	mount_search(&server, "Swift iOS in Houston, TX", "abc", Duration::ZERO).await;

	let session = session_for(&server);
	let query = SearchQuery::new(["Swift", "iOS"], "Houston, TX", 1).unwrap();

	let first = session.start(query.clone()).wait().await.unwrap().unwrap();
	let refreshed = session.start(query).wait().await.unwrap().unwrap();

	assert_eq!(first, refreshed);
	assert_eq!(session.generation(), 2);
	assert_eq!(server.received_requests().await.unwrap().len(), 2);
}
