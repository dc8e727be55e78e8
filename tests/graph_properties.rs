//! Property tests over generated documents.
//!
//! Documents are built from random words with random entity spans laid on
//! word boundaries, random relations between them, and a termbase that knows
//! about half of the resulting terms. Every such document converts.

use proptest::prelude::*;
use termgraph::{
    AnnotatedDocument, LongestSpanFilter, Pipeline, PipelineConfig, SubtermResolver, Term,
    TermTable,
};

/// A document of `words` separated by single spaces, with word-aligned entities.
fn document() -> impl Strategy<Value = AnnotatedDocument> {
    (
        prop::collection::vec("[a-z]{1,6}", 2..12),
        prop::collection::vec((0usize..12, 1usize..4), 0..8),
        prop::collection::vec((1u64..9, 1u64..9), 0..6),
    )
        .prop_map(|(words, ents, rels)| {
            let text = words.join(" ");
            let mut starts = Vec::with_capacity(words.len());
            let mut pos = 0;
            for w in &words {
                starts.push(pos);
                pos += w.len() + 1;
            }
            let mut doc = AnnotatedDocument::new(text);
            for (i, (first, len)) in ents.into_iter().enumerate() {
                let first = first % words.len();
                let last = (first + len - 1).min(words.len() - 1);
                let end = starts[last] + words[last].len();
                doc = doc.with_entity(i as u64 + 1, starts[first], end, "L");
            }
            for (a, b) in rels {
                doc = doc.with_relation(a, b);
            }
            doc
        })
}

fn half_termbase(terms: &[Term]) -> TermTable {
    TermTable::from_entries(
        "generated",
        terms
            .iter()
            .filter(|t| t.id.0 % 2 == 0)
            .map(|t| (t.text.clone(), t.label.clone(), format!("urn:{}", t.id))),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Phrase pointers follow the sorted phrase sequence.
    #[test]
    fn phrase_links_form_total_order(doc in document()) {
        let empty = TermTable::new("empty");
        let first = Pipeline::with_defaults(&empty).convert(&doc);
        prop_assert!(first.is_ok(), "conversion failed: {:?}", first.as_ref().err());
        let terms = first.unwrap().terms;
        let table = half_termbase(&terms);
        let out = Pipeline::with_defaults(&table).convert(&doc).unwrap();
        let phrases = &out.graph.phrases;

        prop_assert!(phrases.windows(2).all(|w| w[0].span < w[1].span));

        for (i, phrase) in phrases.iter().enumerate() {
            let begin = phrase.span.begin;
            let links = out.graph.links_of(&phrase.id);
            let expected_next = phrases[i + 1..]
                .iter()
                .find(|p| p.span.begin > begin)
                .map(|p| p.id.clone());
            let expected_prev = phrases[..i]
                .iter()
                .rev()
                .find(|p| p.span.begin < begin)
                .map(|p| p.id.clone());
            prop_assert_eq!(links.next, expected_next);
            prop_assert_eq!(links.previous, expected_prev);
        }
    }

    /// Every parent points at a term node listing the phrase as a child.
    #[test]
    fn parents_are_consistent(doc in document()) {
        let empty = TermTable::new("empty");
        let first = Pipeline::with_defaults(&empty).convert(&doc);
        prop_assert!(first.is_ok(), "conversion failed: {:?}", first.as_ref().err());
        let terms = first.unwrap().terms;
        let table = half_termbase(&terms);
        let config = PipelineConfig::default().with_longest_only(false);
        let out = Pipeline::new(&table, config).unwrap().convert(&doc).unwrap();

        for phrase in &out.graph.phrases {
            if let Some(parent) = out.graph.parent_of(&phrase.id) {
                let node = out.graph.term(parent).unwrap();
                prop_assert!(node.children.contains(&phrase.id));
            }
        }
        prop_assert_eq!(
            out.graph.term_count() + out.graph.diagnostics.len(),
            out.terms.len()
        );
    }

    /// Filtered terms never strictly contain one another; sub-terms never
    /// list their own text.
    #[test]
    fn filter_and_subterm_invariants(doc in document()) {
        let empty = TermTable::new("empty");
        let first = Pipeline::with_defaults(&empty).convert(&doc);
        prop_assert!(first.is_ok(), "conversion failed: {:?}", first.as_ref().err());
        let terms = first.unwrap().terms;

        let kept = LongestSpanFilter::new().filter(terms.clone());
        for a in &kept {
            for b in &kept {
                prop_assert!(!a.outer_span().strictly_contains(&b.outer_span()));
            }
        }

        let subterms = SubtermResolver::new().resolve(&terms);
        for term in &terms {
            prop_assert!(!subterms[&term.id].contains(&term.text));
        }
    }

    /// Merged term texts list their span texts in span order.
    #[test]
    fn merged_text_follows_document(doc in document()) {
        let empty = TermTable::new("empty");
        let out = Pipeline::with_defaults(&empty).convert(&doc).unwrap();
        let lower = doc.text.to_lowercase();
        for term in &out.terms {
            let pieces: Vec<&str> = term
                .spans()
                .iter()
                .map(|s| &lower[s.begin..s.end])
                .collect();
            prop_assert_eq!(&term.text, &pieces.join(" "));
        }
    }

    /// Every phrase lies inside the outer span of some merged term.
    #[test]
    fn phrases_lie_inside_terms(doc in document()) {
        let empty = TermTable::new("empty");
        let result = Pipeline::with_defaults(&empty).convert(&doc);
        prop_assert!(result.is_ok(), "conversion failed: {:?}", result.as_ref().err());
        let out = result.unwrap();
        for phrase in &out.graph.phrases {
            prop_assert!(out
                .terms
                .iter()
                .any(|t| t.outer_span().contains(&phrase.span)));
            prop_assert!(!phrase.span.is_empty());
        }
    }
}
