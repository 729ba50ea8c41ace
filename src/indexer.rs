//! Fetch → parse → aggregate pipeline

use crate::config::Config;
use crate::error::Result;
use crate::fetcher::{self, DocumentFetcher};
use crate::index::AdrIndex;
use crate::types::Event;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Capacity of the event channel
///
/// A build emits one event per fetched document plus two. Subscribers that
/// fall more than this many events behind see `RecvError::Lagged`.
const EVENT_CHANNEL_CAPACITY: usize = 1000;

/// Builds [`AdrIndex`]es from a repository
///
/// The configuration is fixed at construction. Each call to
/// [`build_index`](Self::build_index) fetches afresh and returns a new index;
/// progress is broadcast to every subscriber.
pub struct AdrIndexer {
    config: Arc<Config>,
    fetcher: Box<dyn DocumentFetcher>,
    event_tx: broadcast::Sender<Event>,
}

impl AdrIndexer {
    /// Create an indexer using the fetcher selected by `config.transport`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the fetcher cannot
    /// be built.
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = fetcher::from_config(&config)?;
        Ok(Self::assemble(config, fetcher))
    }

    /// Create an indexer with a caller-supplied fetcher
    ///
    /// Only `config.template_marker` is consulted by the indexer itself.
    pub fn with_fetcher(config: Config, fetcher: Box<dyn DocumentFetcher>) -> Self {
        Self::assemble(config, fetcher)
    }

    fn assemble(config: Config, fetcher: Box<dyn DocumentFetcher>) -> Self {
        let (event_tx, _rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            config: Arc::new(config),
            fetcher,
            event_tx,
        }
    }

    /// Subscribe to indexing events
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use adr_index::{AdrIndexer, Config, Event};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let indexer = AdrIndexer::new(Config::default())?;
    ///
    ///     let mut events = indexer.subscribe();
    ///     tokio::spawn(async move {
    ///         while let Ok(event) = events.recv().await {
    ///             if let Event::DocumentParsed { key, status, .. } = event {
    ///                 println!("{key}: {status}");
    ///             }
    ///         }
    ///     });
    ///
    ///     let index = indexer.build_index().await?;
    ///     println!("{} ADRs", index.len());
    ///     Ok(())
    /// }
    /// ```
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// The configuration this indexer was built with
    pub fn config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    /// Fetch every document, parse the ADRs among them and collect them by key
    ///
    /// # Errors
    ///
    /// Returns the fetcher's error if the document set cannot be obtained.
    /// Parsing itself never fails.
    pub async fn build_index(&self) -> Result<AdrIndex> {
        let transport = self.fetcher.name();
        self.emit(Event::FetchStarted {
            transport: transport.to_string(),
        });

        let documents = self.fetcher.fetch_documents().await?;
        debug!(transport, fetched = documents.len(), "documents fetched");

        let mut index = AdrIndex::new();
        for document in &documents {
            match index.insert_document(document, self.config.template_marker) {
                Ok(key) => {
                    let status = index.get(&key).map(|adr| adr.status).unwrap_or_default();
                    debug!(key = %key, name = %document.name, status = %status, "parsed ADR");
                    self.emit(Event::DocumentParsed {
                        key,
                        name: document.name.clone(),
                        status,
                    });
                }
                Err(reason) => {
                    debug!(name = %document.name, reason = %reason, "skipped document");
                    self.emit(Event::DocumentSkipped {
                        name: document.name.clone(),
                        reason,
                    });
                }
            }
        }

        info!(transport, count = index.len(), "ADR index built");
        self.emit(Event::IndexComplete { count: index.len() });
        Ok(index)
    }

    fn emit(&self, event: Event) {
        // No subscribers is not an error
        self.event_tx.send(event).ok();
    }
}

/// Build an index for `config` in one call
///
/// # Errors
///
/// See [`AdrIndexer::new`] and [`AdrIndexer::build_index`].
pub async fn index_repository(config: Config) -> Result<AdrIndex> {
    AdrIndexer::new(config)?.build_index().await
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::InMemoryFetcher;
    use crate::types::{AdrStatus, Document, SkipReason};
    use async_trait::async_trait;

    struct FailingFetcher;

    #[async_trait]
    impl DocumentFetcher for FailingFetcher {
        async fn fetch_documents(&self) -> Result<Vec<Document>> {
            Err(crate::Error::InvalidResponse("boom".to_string()))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn indexer_with(documents: Vec<Document>) -> AdrIndexer {
        AdrIndexer::with_fetcher(
            Config::default(),
            Box::new(InMemoryFetcher::new(documents)),
        )
    }

    #[tokio::test]
    async fn builds_index_and_emits_events_in_order() {
        let indexer = indexer_with(vec![
            Document::new("0002-b.md", "# B\n## Status\nAccepted\n"),
            Document::new("0000-template.md", "# Template\n"),
            Document::new("README.md", "# Readme\n"),
        ]);
        let mut events = indexer.subscribe();

        let index = indexer.build_index().await.unwrap();
        assert_eq!(index.len(), 1);

        match events.recv().await.unwrap() {
            Event::FetchStarted { transport } => assert_eq!(transport, "memory"),
            other => panic!("unexpected event {other:?}"),
        }
        match events.recv().await.unwrap() {
            Event::DocumentParsed { key, name, status } => {
                assert_eq!(key.as_str(), "0002");
                assert_eq!(name, "0002-b.md");
                assert_eq!(status, AdrStatus::Accepted);
            }
            other => panic!("unexpected event {other:?}"),
        }
        match events.recv().await.unwrap() {
            Event::DocumentSkipped { name, reason } => {
                assert_eq!(name, "0000-template.md");
                assert_eq!(reason, SkipReason::Template);
            }
            other => panic!("unexpected event {other:?}"),
        }
        match events.recv().await.unwrap() {
            Event::DocumentSkipped { reason, .. } => assert_eq!(reason, SkipReason::NotAnAdr),
            other => panic!("unexpected event {other:?}"),
        }
        match events.recv().await.unwrap() {
            Event::IndexComplete { count } => assert_eq!(count, 1),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn late_reader_receives_every_event_of_a_large_directory() {
        let documents: Vec<Document> = (1..=400)
            .map(|n| Document::new(format!("{n:04}-adr.md"), "# ADR\n## Status\nAccepted\n"))
            .collect();
        let indexer = indexer_with(documents);
        let mut events = indexer.subscribe();

        let index = indexer.build_index().await.unwrap();

        let mut received = Vec::new();
        while let Ok(event) = events.try_recv() {
            received.push(event);
        }
        assert_eq!(received.len(), 400 + 2);
        assert!(matches!(received.first(), Some(Event::FetchStarted { .. })));
        assert!(matches!(
            received.last(),
            Some(Event::IndexComplete { count }) if *count == index.len()
        ));
    }

    #[tokio::test]
    async fn works_without_subscribers() {
        let indexer = indexer_with(vec![Document::new("0001-a.md", "# A\n")]);
        let index = indexer.build_index().await.unwrap();
        assert_eq!(index.len(), 1);
    }

    #[tokio::test]
    async fn template_marker_comes_from_config() {
        let config = Config {
            template_marker: None,
            ..Default::default()
        };
        let indexer = AdrIndexer::with_fetcher(
            config,
            Box::new(InMemoryFetcher::new(vec![Document::new(
                "0000-template.md",
                "# Template\n",
            )])),
        );
        assert_eq!(indexer.build_index().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn repeated_builds_are_equal() {
        let indexer = indexer_with(vec![
            Document::new("0001-a.md", "# A\n## Status\nSuperseded by 3\n"),
            Document::new("0003-c.md", "# C\n## Status\nProposed\n"),
        ]);
        let first = indexer.build_index().await.unwrap();
        let second = indexer.build_index().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn fetch_error_is_propagated() {
        let indexer = AdrIndexer::with_fetcher(Config::default(), Box::new(FailingFetcher));
        let mut events = indexer.subscribe();

        let err = indexer.build_index().await.unwrap_err();
        assert!(matches!(err, crate::Error::InvalidResponse(_)));
        assert!(matches!(
            events.recv().await.unwrap(),
            Event::FetchStarted { .. }
        ));
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn new_rejects_invalid_config() {
        let mut config = Config::default();
        config.repository.branch = String::new();
        let err = AdrIndexer::new(config).err().expect("expected config error");
        assert_eq!(err.config_key(), Some("repository.branch"));
    }
}
