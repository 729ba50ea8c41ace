//! Rendering of an ADR index as an HTML list or plain text

use crate::config::Config;
use crate::index::AdrIndex;
use crate::types::ParsedAdr;
use std::fmt::Write;

/// Stylesheet for the list and its status badges
pub const STYLES: &str = "
  li {
    height: 2em;
  }
  .status {
    margin-left: 8px;
    color: white;
    padding: 4px 8px;
    text-align: center;
    border-radius: 5px;
  }
  .status.accepted {
    background-color: green;
  }
  .status.superseded {
    background-color: red;
  }
  .status.amended {
    background-color: orange;
  }
  .status.proposed {
    background-color: blue;
  }
  .status.unknown {
    color: red;
    background-color: grey;
  }
";

/// Link to the raw text of an ADR document
///
/// # Examples
///
/// ```
/// use adr_index::Config;
/// use adr_index::presenter::adr_link;
///
/// assert_eq!(
///     adr_link(&Config::default(), "0001-record.md"),
///     "https://raw.githubusercontent.com/RHEnVision/provisioning-backend/main/docs/adr/0001-record.md"
/// );
/// ```
pub fn adr_link(config: &Config, name: &str) -> String {
    let repo = &config.repository;
    format!(
        "{}/{}/{}/{}/{}/{}",
        config.api.raw_base_url.trim_end_matches('/'),
        repo.namespace,
        repo.repository,
        repo.branch,
        repo.trimmed_path(),
        urlencoding::encode(name),
    )
}

/// Render one list entry: linked title followed by the status badge
pub fn render_item(adr: &ParsedAdr, link: &str) -> String {
    format!(
        r#"<li><a href="{}" target="_blank">{}</a><span class="status {}">{}</span></li>"#,
        escape_html(link),
        escape_html(adr.display_title()),
        adr.status.as_str(),
        adr.status.label(),
    )
}

/// Render the whole index as a styled `<ul>`, newest ADR first
pub fn render_html(index: &AdrIndex, config: &Config) -> String {
    let mut html = String::new();
    let _ = writeln!(html, "<style>{STYLES}</style>");
    html.push_str("<ul class=\"adr-index\">\n");
    for (_, adr) in index.newest_first() {
        html.push_str(&render_item(adr, &adr_link(config, &adr.name)));
        html.push('\n');
    }
    html.push_str("</ul>\n");
    html
}

/// Render the index as aligned text lines, newest ADR first
pub fn render_text(index: &AdrIndex) -> String {
    let key_width = index
        .iter()
        .map(|(key, _)| key.as_str().len())
        .max()
        .unwrap_or(0);

    let mut text = String::new();
    for (key, adr) in index.newest_first() {
        let badge = format!("[{}]", adr.status.label());
        let _ = writeln!(
            text,
            "{:>key_width$}  {:<12}  {}",
            key.as_str(),
            badge,
            adr.display_title(),
        );
    }
    text
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
