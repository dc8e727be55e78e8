//! Corpus-wide term inventory.
//!
//! Aggregates the merged terms of many converted documents: how often each
//! `(text, label)` pair was annotated, and which sub-term texts each surface
//! form was seen with anywhere in the corpus. Term-table construction starts
//! from this inventory.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::pipeline::Conversion;

/// Term counts and sub-term sets over a corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermInventory {
    counts: HashMap<(String, String), usize>,
    subterms: BTreeMap<String, BTreeSet<String>>,
    documents: usize,
}

impl TermInventory {
    /// Create an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the terms of one converted document.
    pub fn add_document(&mut self, conversion: &Conversion) {
        self.documents += 1;
        for term in &conversion.terms {
            *self
                .counts
                .entry((term.text.clone(), term.label.clone()))
                .or_insert(0) += 1;
            let subs = self.subterms.entry(term.text.clone()).or_default();
            if let Some(found) = conversion.subterms.get(&term.id) {
                subs.extend(found.iter().cloned());
            }
        }
    }

    /// Number of documents added.
    #[must_use]
    pub fn documents(&self) -> usize {
        self.documents
    }

    /// Number of distinct `(text, label)` pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if no term was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Occurrences of a `(text, label)` pair.
    #[must_use]
    pub fn count(&self, text: &str, label: &str) -> usize {
        self.counts
            .get(&(text.to_string(), label.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Union of the sub-term texts seen for a surface form.
    #[must_use]
    pub fn subterms_of(&self, text: &str) -> Option<&BTreeSet<String>> {
        self.subterms.get(text)
    }

    /// `((text, label), count)` sorted by descending count, then text and label.
    #[must_use]
    pub fn terms_by_frequency(&self) -> Vec<((&str, &str), usize)> {
        let mut terms: Vec<_> = self
            .counts
            .iter()
            .map(|((text, label), &n)| ((text.as_str(), label.as_str()), n))
            .collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        terms
    }
}

impl<'a> Extend<&'a Conversion> for TermInventory {
    fn extend<I: IntoIterator<Item = &'a Conversion>>(&mut self, iter: I) {
        for conversion in iter {
            self.add_document(conversion);
        }
    }
}
