//! ADR fixtures and mock repository helpers

use adr_index::Config;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Template document, excluded from every index
pub const TEMPLATE_ADR: &str = "\
# [short title of solved problem and solution]

Authors: [list everyone involved]

## Status

[Proposed | Accepted | Superseded by ADR-0005]
";

/// Superseded decision
pub const SUPERSEDED_ADR: &str = "\
# 1. Record architecture decisions

Authors: Ada Lovelace

## Status

Accepted

Superseded by [ADR-0003](0003-use-queues.md)

## Context

We need to record the architectural decisions made on this project.
";

/// Accepted decision with two authors and free-form status prose
pub const ACCEPTED_ADR: &str = "\
# 2. Use PostgreSQL

Authors: Grace Hopper, Alan Turing

## Status

Accepted on 2023-01-01

## Decision

Amended by nobody. This line sits outside the status section.
";

/// Proposal still under review
pub const PROPOSED_ADR: &str = "\
# 3. Use message queues

Authors: Barbara Liskov

## Status

Pending review

## Context

Background jobs.
";

/// Amended decision
pub const AMENDED_ADR: &str = "\
# 4. Authentication via tokens

## Status

Accepted

Amended by ADR-0006

## Status

Proposed
";

/// Document with no status section at all
pub const UNKNOWN_ADR: &str = "\
# 5. Logging format

Some prose without any status heading.
";

/// Repository directory content: `(name, text)` pairs
pub fn repository_documents() -> Vec<(&'static str, &'static str)> {
    vec![
        ("0000-template.md", TEMPLATE_ADR),
        ("0001-record-decisions.md", SUPERSEDED_ADR),
        ("0002-use-postgresql.md", ACCEPTED_ADR),
        ("0003-use-queues.md", PROPOSED_ADR),
        ("0004-token-auth.md", AMENDED_ADR),
        ("0005-logging-format.md", UNKNOWN_ADR),
        ("README.md", "# Decisions\n"),
    ]
}

/// Config pointing every endpoint at the mock server
pub fn mock_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.repository.namespace = "acme".to_string();
    config.repository.repository = "platform".to_string();
    config.api.api_base_url = server.uri();
    config.api.graphql_url = format!("{}/graphql", server.uri());
    config.api.raw_base_url = format!("{}/raw", server.uri());
    config
}

/// Serve the fixture repository through the contents API and raw downloads
pub async fn mount_contents_api(server: &MockServer) {
    let listing: Vec<serde_json::Value> = repository_documents()
        .into_iter()
        .map(|(name, _)| {
            json!({
                "name": name,
                "type": "file",
                "download_url": format!("{}/raw/acme/platform/main/docs/adr/{}", server.uri(), name),
            })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path("/repos/acme/platform/contents/docs/adr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing))
        .mount(server)
        .await;

    for (name, text) in repository_documents() {
        Mock::given(method("GET"))
            .and(path(format!("/raw/acme/platform/main/docs/adr/{name}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(text))
            .mount(server)
            .await;
    }
}

/// Serve the fixture repository through the GraphQL endpoint
pub async fn mount_graphql_api(server: &MockServer) {
    let entries: Vec<serde_json::Value> = repository_documents()
        .into_iter()
        .map(|(name, text)| {
            json!({
                "name": name,
                "type": "blob",
                "object": { "text": text, "isBinary": false },
            })
        })
        .collect();

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "repository": { "object": { "entries": entries } } }
        })))
        .expect(1)
        .mount(server)
        .await;
}
