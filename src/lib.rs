//! # adr-index
//!
//! Index of the Architecture Decision Records kept in a source repository.
//!
//! Documents are fetched from a repository directory, each one is parsed for
//! its title, authors and lifecycle status, and the results are collected by
//! their numeric ADR key and rendered as a list with color-coded status
//! badges.
//!
//! ## Pipeline
//!
//! - [`fetcher`]: produce `{name, text}` pairs ([`ContentsApiFetcher`],
//!   [`GraphQlFetcher`] or [`InMemoryFetcher`])
//! - [`parser`]: turn one document into a [`ParsedAdr`]
//! - [`index`]: collect parsed ADRs by [`AdrKey`], dropping templates
//! - [`presenter`]: render HTML or plain text, newest first
//!
//! ## Quick Start
//!
//! ```no_run
//! use adr_index::{AdrIndexer, Config};
//! use adr_index::presenter::render_text;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::default();
//!     config.repository.namespace = "my-org".to_string();
//!     config.repository.repository = "my-service".to_string();
//!
//!     let indexer = AdrIndexer::new(config)?;
//!     let index = indexer.build_index().await?;
//!     print!("{}", render_text(&index));
//!     Ok(())
//! }
//! ```
//!
//! Parsing alone needs no runtime:
//!
//! ```
//! use adr_index::{AdrStatus, parse};
//!
//! let adr = parse("0007-x.md", "# X\n## Status\nAccepted\nSuperseded by ADR-9\n");
//! assert_eq!(adr.status, AdrStatus::Superseded);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Document fetchers
pub mod fetcher;
/// Aggregation by ADR key
pub mod index;
/// Fetch, parse and aggregate in one pipeline
pub mod indexer;
/// ADR document parser
pub mod parser;
/// HTML and text rendering
pub mod presenter;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use config::{ApiConfig, Config, RepositoryConfig, Transport};
pub use error::{Error, Result};
pub use fetcher::{ContentsApiFetcher, DocumentFetcher, GraphQlFetcher, InMemoryFetcher};
pub use index::AdrIndex;
pub use indexer::{AdrIndexer, index_repository};
pub use parser::parse;
pub use types::{AdrKey, AdrStatus, Document, Event, ParsedAdr, SkipReason, humanize_status};
