//! Annotation graph construction.
//!
//! Turns a document's retained terms into an ordered node graph:
//!
//! 1. every term's spans are split into word spans of the document text
//!    ([`WordTokenizer`]);
//! 2. each distinct word span becomes one [`PhraseNode`], sorted by
//!    `(begin, end)`;
//! 3. a linking pass fills `next` / `previous` of every phrase with its
//!    nearest neighbour by begin offset;
//! 4. each term resolved through the [`TermLookup`] becomes a [`TermNode`]
//!    and claims its word phrases as `parent`.
//!
//! ```text
//! terms:    "raccolta differenziata" [0,22)      "raccolta" [0,8)
//! phrases:  [0,8) raccolta  <->  [9,22) differenziata
//! parents:  both -> doc#term_n of the term processed last
//! ```
//!
//! A phrase has a single parent. When several terms claim the same phrase,
//! the one processed last wins; processing order is `(outer begin, outer
//! end)` with [`ParentTieBreak`] deciding among identical outer spans.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use termgraph_core::{
    Diagnostic, GraphDocument, NodeLinks, PhraseNode, Result, Span, Term, TermLookup, TermNode,
    WordSpan,
};

use crate::offset::CharIndex;
use crate::tokenize::WordTokenizer;

// =============================================================================
// Configuration
// =============================================================================

/// Which of several terms with the same outer span is processed last, and so
/// becomes the parent of the phrases they share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParentTieBreak {
    /// Ascending term identifier; the highest identifier wins.
    #[default]
    LastWriter,
    /// Fewer spans first; the term with the most spans wins.
    MoreSpans,
    /// Descending label; the lexicographically smallest label wins.
    LabelOrder,
}

impl ParentTieBreak {
    fn compare(self, a: &Term, b: &Term) -> Ordering {
        let key = match self {
            ParentTieBreak::LastWriter => Ordering::Equal,
            ParentTieBreak::MoreSpans => a.num_spans().cmp(&b.num_spans()),
            ParentTieBreak::LabelOrder => b.label.cmp(&a.label),
        };
        key.then(a.id.cmp(&b.id))
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builds the node graph of one document.
pub struct AnnotationGraphBuilder<'a> {
    lookup: &'a dyn TermLookup,
    tokenizer: WordTokenizer,
    tie_break: ParentTieBreak,
}

impl std::fmt::Debug for AnnotationGraphBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationGraphBuilder")
            .field("lookup", &self.lookup.source())
            .field("tokenizer", &self.tokenizer)
            .field("tie_break", &self.tie_break)
            .finish()
    }
}

impl<'a> AnnotationGraphBuilder<'a> {
    /// Create a builder resolving terms through `lookup`.
    #[must_use]
    pub fn new(lookup: &'a dyn TermLookup) -> Self {
        Self {
            lookup,
            tokenizer: WordTokenizer::default(),
            tie_break: ParentTieBreak::default(),
        }
    }

    /// Set the tie-break for identical outer spans.
    #[must_use]
    pub fn with_tie_break(mut self, tie_break: ParentTieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Terms in the order they claim parents.
    #[must_use]
    pub fn processing_order<'t>(&self, terms: &'t [Term]) -> Vec<&'t Term> {
        let mut ordered: Vec<&Term> = terms.iter().collect();
        ordered.sort_by(|a, b| {
            a.outer_span()
                .cmp(&b.outer_span())
                .then_with(|| self.tie_break.compare(a, b))
        });
        ordered
    }

    /// Build the graph of document `doc_id` from its retained terms.
    ///
    /// # Errors
    ///
    /// `InvalidSpan` if a term span falls outside `text`.
    pub fn build(&self, doc_id: &str, text: &str, terms: &[Term]) -> Result<GraphDocument> {
        let index = CharIndex::new(text);
        let ordered = self.processing_order(terms);

        let words: Vec<Vec<WordSpan>> = ordered
            .iter()
            .map(|term| self.tokenizer.word_spans(term, text, &index))
            .collect::<Result<_>>()?;

        let mut graph = GraphDocument::new(doc_id, text);

        let distinct: BTreeSet<Span> = words.iter().flatten().copied().collect();
        for span in distinct {
            let surface = index.slice(text, span)?;
            graph
                .phrases
                .push(PhraseNode::new(phrase_id(doc_id, span), span, surface));
        }
        graph.links = link_phrases(&graph.phrases);

        let mut resolved = 0;
        for (term, spans) in ordered.iter().zip(&words) {
            let Some(uri) = self.lookup.resolve(&term.text, &term.label) else {
                log::warn!(
                    "{}: term '{}' ({}) not found in {}",
                    doc_id,
                    term.text,
                    term.label,
                    self.lookup.source()
                );
                graph.diagnostics.push(Diagnostic::UnresolvedTerm {
                    term: term.id,
                    text: term.text.clone(),
                    label: term.label.clone(),
                });
                continue;
            };

            resolved += 1;
            let node_id = format!("{}#term_{}", doc_id, resolved);
            let mut children = Vec::with_capacity(spans.len());
            let mut texts = Vec::with_capacity(spans.len());
            for &span in spans {
                let Some(phrase) = graph.phrase_at(span) else {
                    continue;
                };
                children.push(phrase.id.clone());
                texts.push(phrase.text.clone());
            }
            for child in &children {
                graph.links.entry(child.clone()).or_default().parent = Some(node_id.clone());
            }

            graph.terms.push(TermNode {
                id: node_id,
                term: term.id,
                uri: uri.to_string(),
                label: term.label.clone(),
                span: term.outer_span(),
                children,
                text: texts.join(" "),
            });
        }

        Ok(graph)
    }
}

/// Identifier of the phrase covering `span`.
#[must_use]
pub fn phrase_id(doc_id: &str, span: Span) -> String {
    format!("{}#offset_{}_{}", doc_id, span.begin, span.end)
}

/// Nearest-neighbour links over phrases sorted by `(begin, end)`.
///
/// `next` is the smallest `(begin, end)` with a strictly greater begin;
/// `previous` is the largest `(begin, end)` with a strictly smaller begin.
fn link_phrases(phrases: &[PhraseNode]) -> BTreeMap<String, NodeLinks> {
    phrases
        .iter()
        .map(|phrase| {
            let begin = phrase.span.begin;
            let after = phrases.partition_point(|p| p.span.begin <= begin);
            let before = phrases.partition_point(|p| p.span.begin < begin);
            let links = NodeLinks {
                next: phrases.get(after).map(|p| p.id.clone()),
                previous: before
                    .checked_sub(1)
                    .and_then(|i| phrases.get(i))
                    .map(|p| p.id.clone()),
                parent: None,
            };
            (phrase.id.clone(), links)
        })
        .collect()
}
