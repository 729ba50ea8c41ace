//! Render the ADR index of a repository
//!
//! Usage:
//!
//! ```text
//! cargo run --example render_index -- [config.json] [--html]
//! ```
//!
//! Without a config file the upstream default repository is used. A token in
//! `GITHUB_TOKEN` is sent with every request and enables `"transport": "graphql"`.
//! Set `RUST_LOG=adr_index=debug` to see each request.

use adr_index::presenter::{render_html, render_text};
use adr_index::{AdrIndexer, Config, Event};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let mut html = false;
    let mut config_path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--html" => html = true,
            _ => config_path = Some(arg),
        }
    }

    let mut config: Config = match config_path {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => Config::default(),
    };
    if let Ok(token) = std::env::var("GITHUB_TOKEN") {
        config.api.token = Some(token);
    }

    let indexer = AdrIndexer::new(config)?;

    let mut events = indexer.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            if let Event::DocumentSkipped { name, reason } = event {
                tracing::info!(%name, %reason, "skipped");
            }
        }
    });

    let index = indexer.build_index().await?;
    if html {
        print!("{}", render_html(&index, &indexer.config()));
    } else {
        print!("{}", render_text(&index));
    }
    Ok(())
}
