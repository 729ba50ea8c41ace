//! Core types for adr-index

use serde::{Deserialize, Serialize};

/// Lifecycle status of an Architecture Decision Record
///
/// Serialized in lowercase, which is also the CSS class used for the status badge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdrStatus {
    /// Decision proposed or pending review
    Proposed,
    /// Decision accepted
    Accepted,
    /// Decision amended by a later ADR
    Amended,
    /// Decision superseded by a later ADR
    Superseded,
    /// No recognizable status
    #[default]
    Unknown,
}

impl AdrStatus {
    /// All statuses, in lifecycle order
    pub const ALL: [AdrStatus; 5] = [
        AdrStatus::Proposed,
        AdrStatus::Accepted,
        AdrStatus::Amended,
        AdrStatus::Superseded,
        AdrStatus::Unknown,
    ];

    /// Lowercase identifier, used as the badge CSS class
    pub fn as_str(&self) -> &'static str {
        match self {
            AdrStatus::Proposed => "proposed",
            AdrStatus::Accepted => "accepted",
            AdrStatus::Amended => "amended",
            AdrStatus::Superseded => "superseded",
            AdrStatus::Unknown => "unknown",
        }
    }

    /// Human-readable label shown on the badge
    pub fn label(&self) -> &'static str {
        humanize_status(self.as_str())
    }

    /// Map a lowercase identifier back to a status; anything unrecognized is `Unknown`
    pub fn from_name(name: &str) -> Self {
        match name {
            "proposed" => AdrStatus::Proposed,
            "accepted" => AdrStatus::Accepted,
            "amended" => AdrStatus::Amended,
            "superseded" => AdrStatus::Superseded,
            _ => AdrStatus::Unknown,
        }
    }
}

impl std::fmt::Display for AdrStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Display label for a raw status identifier
///
/// Total over all strings: identifiers other than the four known lifecycle
/// states map to `"Unknown"`.
pub fn humanize_status(status: &str) -> &'static str {
    match status {
        "proposed" => "Proposed",
        "accepted" => "Accepted",
        "amended" => "Amended",
        "superseded" => "Superseded",
        _ => "Unknown",
    }
}

/// A parsed Architecture Decision Record
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAdr {
    /// Source document name, passed through unchanged
    pub name: String,

    /// Text of the last `# ` heading, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Authors from the `Authors: ` line before the status section
    #[serde(default)]
    pub authors: Vec<String>,

    /// Derived lifecycle status
    #[serde(default)]
    pub status: AdrStatus,
}

impl ParsedAdr {
    /// Title to display, falling back to the document name when untitled
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

/// A named text document as produced by a fetcher
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// File name, e.g. `0003-use-postgres.md`
    pub name: String,
    /// Full raw text
    pub text: String,
}

impl Document {
    /// Create a new document
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Numeric ADR identifier derived from a document name
///
/// The key is the part of the name before the first `-`. Keys order by
/// numeric value, compared on the digit string so that keys of any length
/// are accepted; the raw text (which keeps zero padding) breaks ties.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdrKey {
    raw: String,
}

impl AdrKey {
    /// Derive a key from a document name
    ///
    /// Returns `None` when the prefix is empty or not made only of ASCII digits.
    pub fn from_document_name(name: &str) -> Option<Self> {
        let raw = name.split('-').next().unwrap_or_default();
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self {
            raw: raw.to_string(),
        })
    }

    /// Numeric value of the key, if it fits in a `u64`
    pub fn number(&self) -> Option<u64> {
        self.raw.parse().ok()
    }

    /// Key exactly as it appears in the document name
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether this key marks a template document
    pub fn is_template(&self, marker: Option<char>) -> bool {
        marker.is_some_and(|m| self.raw.ends_with(m))
    }

    fn significant_digits(&self) -> &str {
        self.raw.trim_start_matches('0')
    }
}

impl Ord for AdrKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let (a, b) = (self.significant_digits(), other.significant_digits());
        a.len()
            .cmp(&b.len())
            .then_with(|| a.cmp(b))
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for AdrKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for AdrKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Why a fetched document was left out of the index
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Name has no numeric key prefix
    NotAnAdr,
    /// Key ends with the template marker
    Template,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotAnAdr => f.write_str("not an ADR"),
            SkipReason::Template => f.write_str("template"),
        }
    }
}

/// Event emitted while building an index
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Fetching started
    FetchStarted {
        /// Name of the fetcher strategy
        transport: String,
    },

    /// A document was parsed and added to the index
    DocumentParsed {
        /// ADR key
        key: AdrKey,
        /// Document name
        name: String,
        /// Derived status
        status: AdrStatus,
    },

    /// A document was not indexed
    DocumentSkipped {
        /// Document name
        name: String,
        /// Why it was skipped
        reason: SkipReason,
    },

    /// All documents processed
    IndexComplete {
        /// Number of ADRs in the index
        count: usize,
    },
}
