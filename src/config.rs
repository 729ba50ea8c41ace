//! Configuration types for adr-index

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Where the ADRs live: repository coordinates and directory
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Repository owner (user or organization) (default: "RHEnVision")
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Repository name (default: "provisioning-backend")
    #[serde(default = "default_repository")]
    pub repository: String,

    /// Directory holding the ADR documents, relative to the repository root (default: "docs/adr")
    #[serde(default = "default_path")]
    pub path: String,

    /// Branch (or any git ref) to read from (default: "main")
    #[serde(default = "default_branch")]
    pub branch: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            repository: default_repository(),
            path: default_path(),
            branch: default_branch(),
        }
    }
}

impl RepositoryConfig {
    /// ADR directory without leading or trailing slashes
    pub fn trimmed_path(&self) -> &str {
        self.path.trim_matches('/')
    }
}

/// Remote API endpoints and client settings
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// REST API base URL (default: "https://api.github.com")
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// GraphQL endpoint (default: "https://api.github.com/graphql")
    #[serde(default = "default_graphql_url")]
    pub graphql_url: String,

    /// Base URL for raw file links shown to readers (default: "https://raw.githubusercontent.com")
    #[serde(default = "default_raw_base_url")]
    pub raw_base_url: String,

    /// Access token sent as a bearer token (required for GraphQL)
    #[serde(default, skip_serializing)]
    pub token: Option<String>,

    /// Per-request timeout (default: 30 seconds)
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// User-Agent header value (default: "adr-index")
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            graphql_url: default_graphql_url(),
            raw_base_url: default_raw_base_url(),
            token: None,
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// How documents are fetched from the repository
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transport {
    /// List the directory through the contents API, then download each file (default)
    #[default]
    Contents,
    /// Fetch every file's text in a single GraphQL query
    Graphql,
}

impl Transport {
    /// Stable name for logging and events
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::Contents => "contents",
            Transport::Graphql => "graphql",
        }
    }
}

/// Main configuration for the ADR indexer
///
/// Every field has a default, so `Config::default()` points at the upstream
/// provisioning-backend ADR directory over the anonymous contents API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Repository coordinates
    #[serde(default)]
    pub repository: RepositoryConfig,

    /// Fetch strategy
    #[serde(default)]
    pub transport: Transport,

    /// API endpoints and client settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Keys ending in this digit are templates and never indexed (default: '0', None = keep all)
    #[serde(default = "default_template_marker")]
    pub template_marker: Option<char>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repository: RepositoryConfig::default(),
            transport: Transport::default(),
            api: ApiConfig::default(),
            template_marker: default_template_marker(),
        }
    }
}

impl Config {
    /// Check the configuration for values no fetcher could work with
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the offending key when:
    /// - a repository coordinate is empty
    /// - a base URL does not parse
    /// - the timeout is zero
    /// - the template marker is not an ASCII digit
    /// - the GraphQL transport is selected without a token
    pub fn validate(&self) -> Result<()> {
        let coordinates = [
            ("repository.namespace", &self.repository.namespace),
            ("repository.repository", &self.repository.repository),
            ("repository.branch", &self.repository.branch),
        ];
        for (key, value) in coordinates {
            if value.trim().is_empty() {
                return Err(Error::config(key, format!("{key} must not be empty")));
            }
        }
        if self.repository.trimmed_path().is_empty() {
            return Err(Error::config(
                "repository.path",
                "repository.path must name a directory",
            ));
        }

        let urls = [
            ("api.api_base_url", &self.api.api_base_url),
            ("api.graphql_url", &self.api.graphql_url),
            ("api.raw_base_url", &self.api.raw_base_url),
        ];
        for (key, value) in urls {
            Url::parse(value)
                .map_err(|e| Error::config(key, format!("invalid URL '{value}': {e}")))?;
        }

        if self.api.timeout.is_zero() {
            return Err(Error::config("api.timeout", "timeout must be non-zero"));
        }

        if let Some(marker) = self.template_marker
            && !marker.is_ascii_digit()
        {
            return Err(Error::config(
                "template_marker",
                format!("template marker must be a digit, got '{marker}'"),
            ));
        }

        if self.transport == Transport::Graphql && self.token().is_none() {
            return Err(Error::config(
                "api.token",
                "the graphql transport requires an access token",
            ));
        }

        Ok(())
    }

    /// The access token, ignoring blank values
    pub fn token(&self) -> Option<&str> {
        self.api
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

fn default_namespace() -> String {
    "RHEnVision".to_string()
}

fn default_repository() -> String {
    "provisioning-backend".to_string()
}

fn default_path() -> String {
    "docs/adr".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_graphql_url() -> String {
    "https://api.github.com/graphql".to_string()
}

fn default_raw_base_url() -> String {
    "https://raw.githubusercontent.com".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    concat!("adr-index/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_template_marker() -> Option<char> {
    Some('0')
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
