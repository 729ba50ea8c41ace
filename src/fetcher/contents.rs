//! Per-file transport over the REST contents API

use super::{DocumentFetcher, authorize, build_client, send_checked};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::index::AdrIndex;
use crate::types::Document;
use async_trait::async_trait;
use futures::future::join_all;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

/// One entry of a contents API directory listing
#[derive(Debug, Deserialize)]
struct ContentEntry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    download_url: Option<String>,
}

/// Fetches ADRs by listing the directory, then downloading each file
///
/// Only files whose names carry a non-template ADR key are downloaded. The
/// downloads run concurrently; a download that fails is logged and skipped.
///
/// # Examples
///
/// ```no_run
/// use adr_index::Config;
/// use adr_index::fetcher::{ContentsApiFetcher, DocumentFetcher};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = ContentsApiFetcher::new(&Config::default())?;
/// let documents = fetcher.fetch_documents().await?;
/// # Ok(())
/// # }
/// ```
pub struct ContentsApiFetcher {
    client: reqwest::Client,
    listing_url: Url,
    token: Option<String>,
    template_marker: Option<char>,
}

impl ContentsApiFetcher {
    /// Create a fetcher for the repository directory named in `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the API base URL is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            listing_url: listing_url(config)?,
            token: config.token().map(str::to_string),
            template_marker: config.template_marker,
        })
    }

    /// URL of the directory listing request
    pub fn listing_url(&self) -> &Url {
        &self.listing_url
    }

    async fn list(&self) -> Result<Vec<ContentEntry>> {
        let url = self.listing_url.as_str();
        debug!(url, "listing ADR directory");

        let request = authorize(self.client.get(url), self.token.as_deref())
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        let body = send_checked(request, url).await?.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            Error::InvalidResponse(format!("expected a directory listing from {url}: {e}"))
        })
    }

    async fn download(&self, name: String, url: String) -> Result<Document> {
        debug!(name = %name, url = %url, "downloading ADR");
        let request = authorize(self.client.get(&url), self.token.as_deref());
        let text = send_checked(request, &url).await?.text().await?;
        Ok(Document { name, text })
    }
}

#[async_trait]
impl DocumentFetcher for ContentsApiFetcher {
    async fn fetch_documents(&self) -> Result<Vec<Document>> {
        let entries = self.list().await?;
        let listed = entries.len();

        let downloads = entries
            .into_iter()
            .filter(|entry| entry.kind == "file")
            .filter(|entry| AdrIndex::admit(&entry.name, self.template_marker).is_ok())
            .filter_map(|entry| match entry.download_url {
                Some(url) => Some((entry.name, url)),
                None => {
                    warn!(name = %entry.name, "listing entry has no download URL, skipping");
                    None
                }
            })
            .map(|(name, url)| async move {
                let outcome = self.download(name.clone(), url).await;
                (name, outcome)
            });

        let mut documents = Vec::new();
        for (name, outcome) in join_all(downloads).await {
            match outcome {
                Ok(document) => documents.push(document),
                Err(e) => warn!(name = %name, error = %e, "failed to download ADR, skipping"),
            }
        }

        debug!(listed, downloaded = documents.len(), "contents fetch finished");
        Ok(documents)
    }

    fn name(&self) -> &'static str {
        "contents"
    }
}

fn listing_url(config: &Config) -> Result<Url> {
    let repo = &config.repository;
    let mut url = Url::parse(&config.api.api_base_url)?;
    url.path_segments_mut()
        .map_err(|_| {
            Error::config(
                "api.api_base_url",
                format!("'{}' cannot be a base URL", config.api.api_base_url),
            )
        })?
        .pop_if_empty()
        .extend(["repos", repo.namespace.as_str(), repo.repository.as_str(), "contents"])
        .extend(repo.trimmed_path().split('/'));
    url.query_pairs_mut().append_pair("ref", &repo.branch);
    Ok(url)
}
