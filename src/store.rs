//! Entity store: annotated spans normalized into term candidates.
//!
//! The store owns a map from entity identifier to [`Term`]. Merging consumes
//! entries by removing them, so "already merged" is simply absence from the
//! map.

use std::collections::BTreeMap;

use termgraph_core::{EntityId, Error, Result, Term};

use crate::offset::{trim_span, CharIndex};
use crate::record::EntityRecord;

/// Owned map of term candidates, keyed by stable entity identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityStore {
    terms: BTreeMap<EntityId, Term>,
}

impl EntityStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the store from a document's entity records.
    ///
    /// Each entity becomes a single-span term whose text is the lower-cased,
    /// trimmed document substring; the span is trimmed along with it.
    ///
    /// # Errors
    ///
    /// `InvalidSpan` for an empty, reversed, out-of-range or blank span;
    /// `InvalidInput` for a repeated entity identifier.
    pub fn from_records(text: &str, entities: &[EntityRecord]) -> Result<Self> {
        let index = CharIndex::new(text);
        let mut store = Self::new();
        for ent in entities {
            let span = trim_span(text, &index, ent.span())?;
            let surface = index.slice(text, span)?.to_lowercase();
            let term = Term::new(ent.id, ent.label.clone(), surface, span);
            if store.insert(term).is_some() {
                return Err(Error::invalid_input(format!(
                    "duplicate entity id {}",
                    ent.id
                )));
            }
        }
        Ok(store)
    }

    /// Insert a term under its own identifier, returning any replaced term.
    pub fn insert(&mut self, term: Term) -> Option<Term> {
        self.terms.insert(term.id, term)
    }

    /// Remove and return a term, consuming it.
    pub fn take(&mut self, id: EntityId) -> Option<Term> {
        self.terms.remove(&id)
    }

    /// Borrow a term.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Term> {
        self.terms.get(&id)
    }

    /// True if the identifier is still present (not consumed).
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.terms.contains_key(&id)
    }

    /// Number of surviving terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True if no terms remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Surviving terms in identifier order.
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.terms.values()
    }

    /// Consume the store into its terms, in identifier order.
    #[must_use]
    pub fn into_terms(self) -> Vec<Term> {
        self.terms.into_values().collect()
    }
}
