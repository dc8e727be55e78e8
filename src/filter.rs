//! Longest-span filtering.
//!
//! A term is dropped when its outer span lies strictly inside another term's
//! outer span. Identical outer spans never subsume each other, so same-span
//! duplicates (e.g. one span annotated under two labels) both survive.

use termgraph_core::Term;

/// Removes terms subsumed by a longer term.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongestSpanFilter;

impl LongestSpanFilter {
    /// Create the filter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// True if `term` is strictly contained in any term of `all`.
    #[must_use]
    pub fn is_subsumed(term: &Term, all: &[Term]) -> bool {
        let span = term.outer_span();
        all.iter()
            .any(|other| other.outer_span().strictly_contains(&span))
    }

    /// Keep only terms not strictly contained in another term.
    ///
    /// Input order is preserved among the survivors.
    #[must_use]
    pub fn filter(&self, terms: Vec<Term>) -> Vec<Term> {
        let keep: Vec<bool> = terms
            .iter()
            .map(|t| !Self::is_subsumed(t, &terms))
            .collect();
        let before = terms.len();
        let kept: Vec<Term> = terms
            .into_iter()
            .zip(keep)
            .filter_map(|(t, k)| k.then_some(t))
            .collect();
        if kept.len() < before {
            log::debug!(
                "longest-span filter dropped {} of {} terms",
                before - kept.len(),
                before
            );
        }
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termgraph_core::{EntityId, Span};

    fn term(id: u64, label: &str, b: usize, e: usize) -> Term {
        Term::new(id, label, "x", Span::new(b, e))
    }

    fn ids(terms: &[Term]) -> Vec<u64> {
        terms.iter().map(|t| t.id.0).collect()
    }

    #[test]
    fn test_drops_nested_terms() {
        let terms = vec![
            term(1, "L", 0, 20),
            term(2, "L", 0, 8),
            term(3, "L", 9, 20),
            term(4, "L", 3, 12),
            term(5, "L", 25, 30),
        ];
        let kept = LongestSpanFilter::new().filter(terms);
        assert_eq!(ids(&kept), vec![1, 5]);
    }

    #[test]
    fn test_identical_spans_both_survive() {
        let terms = vec![term(1, "Law", 4, 10), term(2, "Environment", 4, 10)];
        let kept = LongestSpanFilter::new().filter(terms);
        assert_eq!(ids(&kept), vec![1, 2]);
    }

    #[test]
    fn test_overlap_without_containment_survives() {
        let terms = vec![term(1, "L", 0, 10), term(2, "L", 5, 15)];
        let kept = LongestSpanFilter::new().filter(terms);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_uses_outer_span_of_merged_terms() {
        // a discontinuous term covers the gap between its parts
        let merged = Term::merge(term(1, "L", 0, 3), term(2, "L", 10, 13));
        let inside_gap = term(3, "L", 5, 8);
        let kept = LongestSpanFilter::new().filter(vec![merged, inside_gap]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, EntityId(2));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use termgraph_core::Span;

    proptest! {
        #[test]
        fn no_strict_containment_after_filter(
            spans in proptest::collection::vec((0usize..50, 1usize..20), 0..15)
        ) {
            let terms: Vec<Term> = spans
                .iter()
                .enumerate()
                .map(|(i, &(b, len))| Term::new(i as u64, "L", "x", Span::new(b, b + len)))
                .collect();
            let kept = LongestSpanFilter::new().filter(terms);
            for a in &kept {
                for b in &kept {
                    prop_assert!(!a.outer_span().strictly_contains(&b.outer_span()));
                }
            }
        }

        #[test]
        fn filter_is_idempotent(
            spans in proptest::collection::vec((0usize..50, 1usize..20), 0..15)
        ) {
            let terms: Vec<Term> = spans
                .iter()
                .enumerate()
                .map(|(i, &(b, len))| Term::new(i as u64, "L", "x", Span::new(b, b + len)))
                .collect();
            let once = LongestSpanFilter::new().filter(terms);
            let twice = LongestSpanFilter::new().filter(once.clone());
            prop_assert_eq!(once, twice);
        }
    }
}
