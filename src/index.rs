//! Aggregation of parsed ADRs keyed by their numeric identifier

use crate::parser;
use crate::types::{AdrKey, AdrStatus, Document, ParsedAdr, SkipReason};
use std::collections::BTreeMap;

/// Parsed ADRs keyed by [`AdrKey`]
///
/// Iteration order depends only on the keys, never on insertion order, so
/// documents may be inserted as they arrive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdrIndex {
    entries: BTreeMap<AdrKey, ParsedAdr>,
}

impl AdrIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a batch of documents, dropping non-ADRs and templates
    pub fn from_documents<'a>(
        documents: impl IntoIterator<Item = &'a Document>,
        template_marker: Option<char>,
    ) -> Self {
        let mut index = Self::new();
        for document in documents {
            index.insert_document(document, template_marker).ok();
        }
        index
    }

    /// Decide whether a document name belongs in the index
    ///
    /// # Errors
    ///
    /// Returns the [`SkipReason`] when the name has no numeric key or the key
    /// ends with `template_marker`.
    pub fn admit(name: &str, template_marker: Option<char>) -> Result<AdrKey, SkipReason> {
        let key = AdrKey::from_document_name(name).ok_or(SkipReason::NotAnAdr)?;
        if key.is_template(template_marker) {
            return Err(SkipReason::Template);
        }
        Ok(key)
    }

    /// Parse a document and insert it under its key
    ///
    /// A document whose key is already present replaces the earlier entry.
    ///
    /// # Errors
    ///
    /// Returns the [`SkipReason`] when the document is not admitted; the
    /// index is left unchanged.
    pub fn insert_document(
        &mut self,
        document: &Document,
        template_marker: Option<char>,
    ) -> Result<AdrKey, SkipReason> {
        let key = Self::admit(&document.name, template_marker)?;
        self.insert(key.clone(), parser::parse(&document.name, &document.text));
        Ok(key)
    }

    /// Insert an already parsed ADR, returning the entry it replaced
    pub fn insert(&mut self, key: AdrKey, adr: ParsedAdr) -> Option<ParsedAdr> {
        self.entries.insert(key, adr)
    }

    /// Look up an ADR by key
    pub fn get(&self, key: &AdrKey) -> Option<&ParsedAdr> {
        self.entries.get(key)
    }

    /// Number of ADRs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no ADRs
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// ADRs in ascending key order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&AdrKey, &ParsedAdr)> {
        self.entries.iter()
    }

    /// ADRs in descending key order, the order they are presented in
    pub fn newest_first(&self) -> impl Iterator<Item = (&AdrKey, &ParsedAdr)> {
        self.entries.iter().rev()
    }

    /// ADRs with the given status, newest first
    pub fn with_status(&self, status: AdrStatus) -> impl Iterator<Item = (&AdrKey, &ParsedAdr)> {
        self.newest_first()
            .filter(move |(_, adr)| adr.status == status)
    }

    /// Count of ADRs per status, in [`AdrStatus::ALL`] order
    pub fn status_counts(&self) -> [(AdrStatus, usize); 5] {
        AdrStatus::ALL.map(|status| (status, self.with_status(status).count()))
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str, status_line: &str) -> Document {
        Document::new(
            name,
            format!("# Title of {name}\n\n## Status\n\n{status_line}\n"),
        )
    }

    fn keys_newest_first(index: &AdrIndex) -> Vec<&str> {
        index.newest_first().map(|(k, _)| k.as_str()).collect()
    }

    #[test]
    fn admits_numbered_documents_only() {
        assert!(AdrIndex::admit("0001-first.md", Some('0')).is_ok());
        assert_eq!(
            AdrIndex::admit("README.md", Some('0')),
            Err(SkipReason::NotAnAdr)
        );
        assert_eq!(
            AdrIndex::admit("0000-template.md", Some('0')),
            Err(SkipReason::Template)
        );
        assert!(AdrIndex::admit("0000-template.md", None).is_ok());
    }

    #[test]
    fn admits_keys_beyond_u64() {
        let key = AdrIndex::admit("123456789012345678901-big.md", Some('0')).unwrap();
        assert_eq!(key.as_str(), "123456789012345678901");
    }

    #[test]
    fn insert_parsed_adr_returns_replaced_entry() {
        let mut index = AdrIndex::new();
        let key = AdrKey::from_document_name("0007-seven.md").unwrap();
        let first = parser::parse("0007-seven.md", "# Seven\n## Status\nProposed\n");
        let second = parser::parse("0007-seven.md", "# Seven\n## Status\nAccepted\n");

        assert_eq!(index.insert(key.clone(), first.clone()), None);
        assert_eq!(index.insert(key.clone(), second), Some(first));
        assert_eq!(index.get(&key).map(|adr| adr.status), Some(AdrStatus::Accepted));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn skipped_document_leaves_index_unchanged() {
        let mut index = AdrIndex::new();
        let result = index.insert_document(&doc("index.md", "Accepted"), Some('0'));
        assert_eq!(result, Err(SkipReason::NotAnAdr));
        assert!(index.is_empty());
    }

    #[test]
    fn order_is_independent_of_arrival() {
        let docs = [
            doc("0002-b.md", "Accepted"),
            doc("0011-k.md", "Proposed"),
            doc("0001-a.md", "Superseded by 2"),
            doc("0003-c.md", "Amended by 11"),
        ];
        let forward = AdrIndex::from_documents(docs.iter(), Some('0'));
        let backward = AdrIndex::from_documents(docs.iter().rev(), Some('0'));

        assert_eq!(forward, backward);
        assert_eq!(keys_newest_first(&forward), vec!["0011", "0003", "0002", "0001"]);
    }

    #[test]
    fn templates_and_non_adrs_are_filtered() {
        let docs = [
            doc("0000-template.md", "Accepted"),
            doc("0010-tenth.md", "Accepted"),
            doc("README.md", "Accepted"),
            doc("0004-d.md", "Accepted"),
        ];
        let index = AdrIndex::from_documents(docs.iter(), Some('0'));
        assert_eq!(keys_newest_first(&index), vec!["0004"]);
    }

    #[test]
    fn duplicate_key_replaces_entry() {
        let mut index = AdrIndex::new();
        let key = index
            .insert_document(&doc("0005-old.md", "Proposed"), Some('0'))
            .unwrap();
        index
            .insert_document(&doc("0005-new.md", "Accepted"), Some('0'))
            .unwrap();

        assert_eq!(index.len(), 1);
        let adr = index.get(&key).unwrap();
        assert_eq!(adr.name, "0005-new.md");
        assert_eq!(adr.status, AdrStatus::Accepted);
    }

    #[test]
    fn status_filter_and_counts() {
        let docs = [
            doc("0001-a.md", "Superseded by 3"),
            doc("0002-b.md", "Accepted"),
            doc("0003-c.md", "Accepted"),
            doc("0004-d.md", "Nothing here"),
        ];
        let index = AdrIndex::from_documents(docs.iter(), Some('0'));

        let accepted: Vec<&str> = index
            .with_status(AdrStatus::Accepted)
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(accepted, vec!["0003", "0002"]);

        let counts = index.status_counts();
        assert_eq!(counts[0], (AdrStatus::Proposed, 0));
        assert_eq!(counts[1], (AdrStatus::Accepted, 2));
        assert_eq!(counts[3], (AdrStatus::Superseded, 1));
        assert_eq!(counts[4], (AdrStatus::Unknown, 1));
    }
}
