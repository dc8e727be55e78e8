//! Term lookup: resolving surface forms to termbase URIs.
//!
//! The graph builder only sees the [`TermLookup`] trait. How the termbase is
//! read and how its URIs are minted is up to the caller; [`TermTable`] is a
//! hash-map implementation that can also be built by joining the two termbase
//! tables (inflected forms and lemma entries) on `(lemma, pos)`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resolves a `(surface form, domain label)` pair to a termbase URI.
pub trait TermLookup: Send + Sync {
    /// Look up an exact form within a domain.
    ///
    /// Returns `None` if the pair is not in the termbase.
    fn resolve(&self, form: &str, domain: &str) -> Option<&str>;

    /// Check if the termbase contains this pair.
    fn contains(&self, form: &str, domain: &str) -> bool {
        self.resolve(form, domain).is_some()
    }

    /// Termbase identifier, used in diagnostics.
    fn source(&self) -> &str;

    /// Approximate number of entries.
    fn len(&self) -> usize;

    /// Check if the termbase is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A row of the inflected-forms table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRow {
    /// Inflected surface form.
    pub form: String,
    /// Lemma the form belongs to.
    pub lemma: String,
    /// Part of speech of the lemma.
    pub pos: String,
}

/// A row of the lemma (entry) table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LemmaRow {
    /// Canonical lemma.
    pub lemma: String,
    /// Part of speech.
    pub pos: String,
    /// Domain label the entry is filed under.
    pub domain: String,
}

/// HashMap-backed termbase keyed by `(form, domain)`.
#[derive(Debug, Clone, Default)]
pub struct TermTable {
    entries: HashMap<(String, String), String>,
    source: String,
}

impl TermTable {
    /// Create an empty table with the given source identifier.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            entries: HashMap::new(),
            source: source.into(),
        }
    }

    /// Insert an entry; a later insert for the same pair replaces the URI.
    pub fn insert(
        &mut self,
        form: impl Into<String>,
        domain: impl Into<String>,
        uri: impl Into<String>,
    ) {
        self.entries
            .insert((form.into(), domain.into()), uri.into());
    }

    /// Create from `(form, domain, uri)` triples.
    pub fn from_entries<I, S>(source: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, S, S)>,
        S: Into<String>,
    {
        let mut table = Self::new(source);
        for (form, domain, uri) in entries {
            table.insert(form, domain, uri);
        }
        table
    }

    /// Join form rows with lemma rows on `(lemma, pos)`.
    ///
    /// Every matching pair contributes `(form, lemma.domain) → mint(lemma)`.
    /// Forms without a matching lemma row are left out.
    ///
    /// ```rust
    /// use termgraph_core::{FormRow, LemmaRow, TermLookup, TermTable};
    ///
    /// let forms = vec![FormRow { form: "rifiuti".into(), lemma: "rifiuto".into(), pos: "NOUN".into() }];
    /// let lemmas = vec![LemmaRow { lemma: "rifiuto".into(), pos: "NOUN".into(), domain: "Waste management".into() }];
    /// let table = TermTable::join("termbase", &forms, &lemmas, |l| format!("urn:sense:{}", l.lemma));
    /// assert_eq!(table.resolve("rifiuti", "Waste management"), Some("urn:sense:rifiuto"));
    /// ```
    pub fn join<F>(
        source: impl Into<String>,
        forms: &[FormRow],
        lemmas: &[LemmaRow],
        mint: F,
    ) -> Self
    where
        F: Fn(&LemmaRow) -> String,
    {
        let mut by_key: HashMap<(&str, &str), Vec<&LemmaRow>> = HashMap::new();
        for row in lemmas {
            by_key
                .entry((row.lemma.as_str(), row.pos.as_str()))
                .or_default()
                .push(row);
        }

        let mut table = Self::new(source);
        for form in forms {
            let Some(rows) = by_key.get(&(form.lemma.as_str(), form.pos.as_str())) else {
                continue;
            };
            for lemma in rows {
                table.insert(form.form.clone(), lemma.domain.clone(), mint(lemma));
            }
        }
        table
    }
}

impl TermLookup for TermTable {
    fn resolve(&self, form: &str, domain: &str) -> Option<&str> {
        // Tuple keys of owned strings cannot be borrowed as (&str, &str).
        self.entries
            .get(&(form.to_string(), domain.to_string()))
            .map(String::as_str)
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(form: &str, lemma: &str, pos: &str) -> FormRow {
        FormRow {
            form: form.into(),
            lemma: lemma.into(),
            pos: pos.into(),
        }
    }

    fn lemma(lemma: &str, pos: &str, domain: &str) -> LemmaRow {
        LemmaRow {
            lemma: lemma.into(),
            pos: pos.into(),
            domain: domain.into(),
        }
    }

    #[test]
    fn test_insert_and_resolve() {
        let mut table = TermTable::new("test");
        assert!(table.is_empty());
        table.insert("rifiuto", "Environment", "urn:a");
        assert_eq!(table.resolve("rifiuto", "Environment"), Some("urn:a"));
        assert_eq!(table.resolve("rifiuto", "Law"), None);
        assert!(table.contains("rifiuto", "Environment"));
        assert_eq!(table.source(), "test");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_join_matches_on_lemma_and_pos() {
        let forms = vec![
            form("rifiuti", "rifiuto", "NOUN"),
            form("rifiuto", "rifiuto", "NOUN"),
            form("rifiutato", "rifiutare", "VERB"),
            form("speciali", "speciale", "ADJ"),
        ];
        let lemmas = vec![
            lemma("rifiuto", "NOUN", "Waste management"),
            lemma("rifiuto", "NOUN", "Law"),
            lemma("rifiutare", "NOUN", "Law"),
        ];
        let table = TermTable::join("tb", &forms, &lemmas, |l| {
            format!("https://example.com/sense_{}", l.lemma.replace(' ', "_"))
        });

        assert_eq!(
            table.resolve("rifiuti", "Waste management"),
            Some("https://example.com/sense_rifiuto")
        );
        assert!(table.contains("rifiuti", "Law"));
        assert!(table.contains("rifiuto", "Law"));
        // pos mismatch and missing lemma are not joined
        assert!(!table.contains("rifiutato", "Law"));
        assert!(!table.contains("speciali", "Law"));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_from_entries_last_wins() {
        let table = TermTable::from_entries(
            "tb",
            vec![("a", "D", "urn:1"), ("a", "D", "urn:2"), ("b", "D", "urn:3")],
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve("a", "D"), Some("urn:2"));
    }
}
