//! Batched transport over the GraphQL API

use super::{DocumentFetcher, authorize, build_client, send_checked};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::Document;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

const TREE_QUERY: &str = r#"
query AdrTree($owner: String!, $name: String!, $expression: String!) {
  repository(owner: $owner, name: $name) {
    object(expression: $expression) {
      ... on Tree {
        entries {
          name
          type
          object {
            ... on Blob {
              text
              isBinary
            }
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<QueryData>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
struct QueryData {
    repository: Option<Repository>,
}

#[derive(Debug, Deserialize)]
struct Repository {
    object: Option<TreeObject>,
}

#[derive(Debug, Deserialize)]
struct TreeObject {
    entries: Option<Vec<TreeEntry>>,
}

#[derive(Debug, Deserialize)]
struct TreeEntry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    object: Option<BlobObject>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlobObject {
    text: Option<String>,
    #[serde(default)]
    is_binary: Option<bool>,
}

/// Fetches every ADR's text in a single GraphQL request
///
/// The API rejects anonymous queries, so a token is mandatory. Entries that
/// are not blobs, are binary, or carry no text are left out.
pub struct GraphQlFetcher {
    client: reqwest::Client,
    endpoint: String,
    token: String,
    owner: String,
    repository: String,
    expression: String,
}

impl GraphQlFetcher {
    /// Create a fetcher for the repository directory named in `config`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no token is configured, or an error if
    /// the HTTP client cannot be created.
    pub fn new(config: &Config) -> Result<Self> {
        let token = config
            .token()
            .ok_or_else(|| {
                Error::config("api.token", "the graphql transport requires an access token")
            })?
            .to_string();
        let repo = &config.repository;

        Ok(Self {
            client: build_client(config)?,
            endpoint: config.api.graphql_url.clone(),
            token,
            owner: repo.namespace.clone(),
            repository: repo.repository.clone(),
            expression: format!("{}:{}", repo.branch, repo.trimmed_path()),
        })
    }

    /// Git object expression (`<branch>:<path>`) the query resolves
    pub fn expression(&self) -> &str {
        &self.expression
    }

    fn request_body(&self) -> serde_json::Value {
        json!({
            "query": TREE_QUERY,
            "variables": {
                "owner": self.owner,
                "name": self.repository,
                "expression": self.expression,
            },
        })
    }
}

#[async_trait]
impl DocumentFetcher for GraphQlFetcher {
    async fn fetch_documents(&self) -> Result<Vec<Document>> {
        debug!(endpoint = %self.endpoint, expression = %self.expression, "querying ADR tree");

        let request = authorize(self.client.post(&self.endpoint), Some(&self.token))
            .json(&self.request_body());
        let body = send_checked(request, &self.endpoint).await?.text().await?;
        let response: GraphQlResponse = serde_json::from_str(&body)?;

        documents_from_response(response, &self.expression)
    }

    fn name(&self) -> &'static str {
        "graphql"
    }
}

fn documents_from_response(response: GraphQlResponse, expression: &str) -> Result<Vec<Document>> {
    if !response.errors.is_empty() {
        let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(Error::GraphQl(messages.join("; ")));
    }

    let repository = response
        .data
        .and_then(|data| data.repository)
        .ok_or_else(|| Error::InvalidResponse("response has no repository".to_string()))?;
    let tree = repository
        .object
        .ok_or_else(|| Error::InvalidResponse(format!("no tree found at '{expression}'")))?;
    let entries = tree
        .entries
        .ok_or_else(|| Error::InvalidResponse(format!("'{expression}' is not a directory")))?;

    let documents = entries
        .into_iter()
        .filter(|entry| entry.kind == "blob")
        .filter_map(|entry| {
            let blob = entry.object?;
            if blob.is_binary == Some(true) {
                debug!(name = %entry.name, "skipping binary blob");
                return None;
            }
            Some(Document {
                name: entry.name,
                text: blob.text?,
            })
        })
        .collect();
    Ok(documents)
}
