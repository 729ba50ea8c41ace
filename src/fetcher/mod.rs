//! Document fetching
//!
//! Fetchers turn a repository directory into `{name, text}` pairs. The
//! [`DocumentFetcher`] trait is the seam; three strategies implement it:
//!
//! - [`ContentsApiFetcher`]: lists the directory through the REST contents
//!   API and downloads each candidate file
//! - [`GraphQlFetcher`]: reads every file's text in one GraphQL query
//! - [`InMemoryFetcher`]: serves a fixed set of documents
//!
//! ## Usage
//!
//! ```no_run
//! use adr_index::Config;
//! use adr_index::fetcher::{self, DocumentFetcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = fetcher::from_config(&Config::default())?;
//!     for document in fetcher.fetch_documents().await? {
//!         println!("{} ({} bytes)", document.name, document.text.len());
//!     }
//!     Ok(())
//! }
//! ```

mod contents;
mod graphql;
mod memory;

pub use contents::ContentsApiFetcher;
pub use graphql::GraphQlFetcher;
pub use memory::InMemoryFetcher;

use crate::config::{Config, Transport};
use crate::error::{Error, Result};
use crate::types::Document;
use async_trait::async_trait;

/// Source of ADR documents
///
/// Implementations must be shareable across tasks; a single fetcher may be
/// asked for documents more than once.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch every candidate document
    ///
    /// # Errors
    ///
    /// Returns an error if the document set as a whole cannot be obtained
    /// (listing failed, query rejected, malformed response). Strategies that
    /// fetch files one by one skip individual failures instead.
    async fn fetch_documents(&self) -> Result<Vec<Document>>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}

/// Build the fetcher selected by `config.transport`
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the HTTP client
/// cannot be created.
pub fn from_config(config: &Config) -> Result<Box<dyn DocumentFetcher>> {
    config.validate()?;
    let fetcher: Box<dyn DocumentFetcher> = match config.transport {
        Transport::Contents => Box::new(ContentsApiFetcher::new(config)?),
        Transport::Graphql => Box::new(GraphQlFetcher::new(config)?),
    };
    Ok(fetcher)
}

/// HTTP client shared by the network strategies
fn build_client(config: &Config) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.api.timeout)
        .user_agent(config.api.user_agent.clone())
        .build()
        .map_err(Error::Network)
}

/// Attach the bearer token, if any
fn authorize(request: reqwest::RequestBuilder, token: Option<&str>) -> reqwest::RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Send a request and turn non-success statuses into [`Error::Http`]
async fn send_checked(request: reqwest::RequestBuilder, url: &str) -> Result<reqwest::Response> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Http {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(response)
}
