//! Relation merging: fusing annotator-linked entities into compound terms.
//!
//! Each relation removes both operands from the [`EntityStore`] and inserts
//! one merged term. Merging is best effort: a relation whose operand is
//! missing (never existed, or already consumed by an earlier relation) is
//! skipped and leaves the remaining operand untouched.
//!
//! ```text
//! store {1: "abc" [0,3), 2: "xyz" [10,13)}   relation (1, 2)
//!   -> take 1, take 2
//!   -> insert 2: "abc xyz" [0,3) [10,13)
//! ```
//!
//! The merged text lists the span texts in span order, joined by
//! `separator_width` spaces.

use serde::{Deserialize, Serialize};

use termgraph_core::{Relation, Term};

use crate::store::EntityStore;

/// Order in which a document's relations are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MergeOrder {
    /// Ascending by `(min endpoint, max endpoint)`; ties keep declaration order.
    #[default]
    SortedByEndpoints,
    /// Exactly as declared in the input record.
    Declaration,
}

/// Outcome counts of one merge pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeStats {
    /// Relations that produced a merged term.
    pub merged: usize,
    /// Relations skipped because an operand was missing or both were the same.
    pub skipped: usize,
}

/// Applies relations to an entity store.
#[derive(Debug, Clone, Copy)]
pub struct RelationMerger {
    order: MergeOrder,
    separator_width: usize,
}

impl Default for RelationMerger {
    fn default() -> Self {
        Self::new(MergeOrder::default())
    }
}

impl RelationMerger {
    /// Create a merger with the given relation order, joining span texts with
    /// a single space.
    #[must_use]
    pub fn new(order: MergeOrder) -> Self {
        Self {
            order,
            separator_width: 1,
        }
    }

    /// Join the span texts of merged terms with `width` spaces.
    #[must_use]
    pub fn with_separator_width(mut self, width: usize) -> Self {
        self.separator_width = width;
        self
    }

    /// Spaces written between the span texts of a merged term.
    #[must_use]
    pub fn separator_width(&self) -> usize {
        self.separator_width
    }

    /// The configured relation order.
    #[must_use]
    pub fn order(&self) -> MergeOrder {
        self.order
    }

    /// Relations in the order they will be applied.
    #[must_use]
    pub fn ordered(&self, relations: &[Relation]) -> Vec<Relation> {
        let mut ordered = relations.to_vec();
        if self.order == MergeOrder::SortedByEndpoints {
            // stable: equal endpoint pairs keep declaration order
            ordered.sort_by_key(Relation::endpoints);
        }
        ordered
    }

    /// Apply all relations to the store.
    pub fn merge(&self, store: &mut EntityStore, relations: &[Relation]) -> MergeStats {
        let mut stats = MergeStats::default();
        for relation in self.ordered(relations) {
            if self.apply(store, relation) {
                stats.merged += 1;
            } else {
                stats.skipped += 1;
            }
        }
        if stats.skipped > 0 {
            log::debug!(
                "skipped {} of {} relations with missing operands",
                stats.skipped,
                relations.len()
            );
        }
        stats
    }

    /// Apply one relation, returning whether a merge happened.
    pub fn apply(&self, store: &mut EntityStore, relation: Relation) -> bool {
        if relation.is_reflexive() || !store.contains(relation.from) || !store.contains(relation.to)
        {
            log::debug!(
                "skipping relation {} -> {}: operand missing",
                relation.from,
                relation.to
            );
            return false;
        }
        match (store.take(relation.from), store.take(relation.to)) {
            (Some(a), Some(b)) => {
                let separator = " ".repeat(self.separator_width);
                store.insert(Term::merge_with(a, b, &separator));
                true
            }
            (Some(t), None) | (None, Some(t)) => {
                store.insert(t);
                false
            }
            (None, None) => false,
        }
    }
}
