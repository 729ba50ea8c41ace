//! ADR document parser
//!
//! Extracts the title, authors and lifecycle status from the raw markdown of
//! an Architecture Decision Record in a single forward pass over its lines.
//!
//! The pass is a two-state machine:
//!
//! - [`Section::BeforeStatus`]: looking for `Authors: ` and the `## Status` heading
//! - [`Section::InStatus`]: reading status prose until the next `## ` heading
//!
//! `# ` title headings are recognized in both states and the last one wins.
//! Inside the status section every line is checked against [`STATUS_RULES`];
//! terminal rules stop the scan, provisional rules only record a status that a
//! later line may overwrite.
//!
//! Parsing is total: any input produces a [`ParsedAdr`], with
//! [`AdrStatus::Unknown`], no title and no authors as the defaults.

use crate::types::{AdrStatus, ParsedAdr};

const TITLE_PREFIX: &str = "# ";
const AUTHORS_PREFIX: &str = "Authors: ";
const AUTHORS_SEPARATOR: &str = ", ";
const STATUS_HEADING: &str = "## Status";
const SECTION_PREFIX: &str = "## ";

/// Where the scan currently is in the document
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    /// Before the `## Status` heading
    BeforeStatus,
    /// Inside the status section
    InStatus,
}

/// Whether the scan goes on after a line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Inspect the next line
    Continue,
    /// Stop; no further line is inspected
    Halt,
}

/// One row of the status transition table
#[derive(Debug)]
pub struct StatusRule {
    /// Substrings that trigger the rule (any one suffices)
    pub keywords: &'static [&'static str],
    /// Status recorded when the rule fires
    pub status: AdrStatus,
    /// What happens to the scan afterwards
    pub flow: Flow,
}

/// Status keywords in precedence order; the first matching rule wins for a line.
///
/// Matching is plain, case-sensitive substring containment.
pub const STATUS_RULES: &[StatusRule] = &[
    StatusRule {
        keywords: &["Amended by"],
        status: AdrStatus::Amended,
        flow: Flow::Halt,
    },
    StatusRule {
        keywords: &["Superseded by"],
        status: AdrStatus::Superseded,
        flow: Flow::Halt,
    },
    StatusRule {
        keywords: &["Accepted"],
        status: AdrStatus::Accepted,
        flow: Flow::Continue,
    },
    StatusRule {
        keywords: &["Proposed", "Pending"],
        status: AdrStatus::Proposed,
        flow: Flow::Continue,
    },
];

/// Classify one line of status prose
///
/// Returns the status and flow of the first rule in [`STATUS_RULES`] whose
/// keyword the line contains, or `None` when no rule matches.
pub fn classify_status_line(line: &str) -> Option<(AdrStatus, Flow)> {
    STATUS_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| line.contains(kw)))
        .map(|rule| (rule.status, rule.flow))
}

/// Scanner state threaded through the lines of one document
#[derive(Debug)]
struct Scanner {
    section: Section,
    adr: ParsedAdr,
}

impl Scanner {
    fn new(name: &str) -> Self {
        Self {
            section: Section::BeforeStatus,
            adr: ParsedAdr {
                name: name.to_string(),
                ..Default::default()
            },
        }
    }

    fn step(&mut self, line: &str) -> Flow {
        if let Some(title) = line.strip_prefix(TITLE_PREFIX) {
            self.adr.title = Some(title.to_string());
            return Flow::Continue;
        }

        match self.section {
            Section::BeforeStatus => {
                if let Some(authors) = line.strip_prefix(AUTHORS_PREFIX) {
                    self.adr.authors = split_authors(authors);
                } else if line.starts_with(STATUS_HEADING) {
                    self.section = Section::InStatus;
                }
                Flow::Continue
            }
            Section::InStatus => {
                if line.starts_with(SECTION_PREFIX) {
                    return Flow::Halt;
                }
                match classify_status_line(line) {
                    Some((status, flow)) => {
                        self.adr.status = status;
                        flow
                    }
                    None => Flow::Continue,
                }
            }
        }
    }
}

fn split_authors(list: &str) -> Vec<String> {
    list.split(AUTHORS_SEPARATOR)
        .map(|author| author.trim().to_string())
        .collect()
}

/// Parse an ADR document
///
/// `name` is passed through to the result untouched. Lines may end in `\n`
/// or `\r\n`.
///
/// # Examples
///
/// ```
/// use adr_index::parser::parse;
/// use adr_index::AdrStatus;
///
/// let text = "# Use PostgreSQL\n\nAuthors: Alice, Bob\n\n## Status\n\nAccepted\n\n## Context\n";
/// let adr = parse("0003-use-postgresql.md", text);
///
/// assert_eq!(adr.title.as_deref(), Some("Use PostgreSQL"));
/// assert_eq!(adr.authors, vec!["Alice", "Bob"]);
/// assert_eq!(adr.status, AdrStatus::Accepted);
/// ```
pub fn parse(name: &str, text: &str) -> ParsedAdr {
    let mut scanner = Scanner::new(name);
    for line in text.lines() {
        if scanner.step(line) == Flow::Halt {
            break;
        }
    }
    scanner.adr
}
