//! Sub-term resolution.
//!
//! A term `T'` is a sub-term of `T` when its outer span lies within `T`'s
//! outer span (bounds may coincide) and it has strictly fewer words. Sub-terms
//! are recorded by surface text, the form the termbase refers to them by.

use std::collections::{BTreeMap, BTreeSet};

use termgraph_core::{EntityId, Term};

/// Sub-term surface texts per term identifier.
pub type SubtermMap = BTreeMap<EntityId, BTreeSet<String>>;

/// Derives containment-based sub-term relations.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubtermResolver;

impl SubtermResolver {
    /// Create the resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// True if `candidate` qualifies as a sub-term of `term`.
    #[must_use]
    pub fn is_subterm(candidate: &Term, term: &Term) -> bool {
        term.outer_span().contains(&candidate.outer_span())
            && candidate.word_count() < term.word_count()
    }

    /// Sub-term texts of every term in `terms`.
    ///
    /// Every term gets an entry, empty if it has no sub-terms. A term never
    /// lists its own text: equal word counts never qualify.
    #[must_use]
    pub fn resolve<'a, I>(&self, terms: I) -> SubtermMap
    where
        I: IntoIterator<Item = &'a Term>,
        I::IntoIter: Clone,
    {
        let terms = terms.into_iter();
        terms
            .clone()
            .map(|term| {
                let subs = terms
                    .clone()
                    .filter(|candidate| Self::is_subterm(candidate, term))
                    .map(|candidate| candidate.text.clone())
                    .collect();
                (term.id, subs)
            })
            .collect()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use termgraph_core::Span;

    proptest! {
        #[test]
        fn term_never_lists_itself(
            items in proptest::collection::vec((0usize..40, 1usize..20, 1usize..4), 1..12)
        ) {
            let terms: Vec<Term> = items
                .iter()
                .enumerate()
                .map(|(i, &(b, len, words))| {
                    let text = vec![format!("w{}", i); words].join(" ");
                    Term::new(i as u64, "L", text, Span::new(b, b + len))
                })
                .collect();
            let subs = SubtermResolver::new().resolve(&terms);
            for term in &terms {
                prop_assert!(!subs[&term.id].contains(&term.text));
            }
        }
    }
}
