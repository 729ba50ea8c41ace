//! In-memory document source

use super::DocumentFetcher;
use crate::types::Document;
use async_trait::async_trait;

/// Serves a fixed set of documents without touching the network
///
/// Useful for rendering a local checkout or for tests.
///
/// # Examples
///
/// ```
/// use adr_index::Document;
/// use adr_index::fetcher::{DocumentFetcher, InMemoryFetcher};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = InMemoryFetcher::new(vec![Document::new("0001-a.md", "# A\n")]);
/// let documents = fetcher.fetch_documents().await?;
/// assert_eq!(documents.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryFetcher {
    documents: Vec<Document>,
}

impl InMemoryFetcher {
    /// Create a fetcher serving `documents`
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }
}

impl FromIterator<Document> for InMemoryFetcher {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[async_trait]
impl DocumentFetcher for InMemoryFetcher {
    async fn fetch_documents(&self) -> crate::Result<Vec<Document>> {
        Ok(self.documents.clone())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
