//! Ordered phrase/term node graph of one document.
//!
//! A converted document holds two kinds of nodes:
//!
//! ```text
//!            TermNode "raccolta differenziata" ──uri──> termbase sense
//!              │ children               │
//!              v                        v
//!   ... <──> [raccolta] <──next/prev──> [differenziata] <──> ...
//!            PhraseNode                 PhraseNode
//! ```
//!
//! Phrase nodes are immutable once built. Everything derived from their
//! position among the other nodes (`next`, `previous`, `parent`) lives in a
//! separate [`NodeLinks`] table keyed by phrase identifier.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::entity::{EntityId, Span};

// =============================================================================
// Nodes
// =============================================================================

/// A word-level node covering one distinct span of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseNode {
    /// Node identifier, unique within the document.
    pub id: String,
    /// Character span in the document.
    pub span: Span,
    /// Document text covered by the span.
    pub text: String,
}

impl PhraseNode {
    /// Create a phrase node.
    #[must_use]
    pub fn new(id: impl Into<String>, span: Span, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            span,
            text: text.into(),
        }
    }
}

/// Derived links of a phrase node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLinks {
    /// Phrase with the nearest strictly greater begin offset.
    pub next: Option<String>,
    /// Phrase with the nearest strictly smaller begin offset.
    pub previous: Option<String>,
    /// Term node that claimed this phrase last.
    pub parent: Option<String>,
}

/// A term whose surface form resolved to a termbase URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermNode {
    /// Node identifier, unique within the document.
    pub id: String,
    /// Identifier of the term this node was built from.
    pub term: EntityId,
    /// Resolved termbase URI.
    pub uri: String,
    /// Category label of the term.
    pub label: String,
    /// Outer span of the term.
    pub span: Span,
    /// Child phrase identifiers, in text order.
    pub children: Vec<String>,
    /// Child texts joined by single spaces.
    pub text: String,
}

/// Non-fatal problem noticed while building a document graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The term's `(text, label)` pair is not in the termbase; no term node was made.
    UnresolvedTerm {
        /// Term identifier.
        term: EntityId,
        /// Surface text that was looked up.
        text: String,
        /// Label that was looked up.
        label: String,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnresolvedTerm { term, text, label } => {
                write!(f, "term {} ('{}', {}) is not in the termbase", term, text, label)
            }
        }
    }
}

// =============================================================================
// Flat records for exporters
// =============================================================================

/// Kind of a flattened node record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Word-level phrase node.
    Phrase,
    /// Resolved term node.
    Term,
}

/// One node of a document graph, flattened for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node identifier.
    pub id: String,
    /// Phrase or term.
    pub kind: NodeKind,
    /// Start offset (outer span for terms).
    pub begin: usize,
    /// End offset (outer span for terms).
    pub end: usize,
    /// Covered text (reconstructed text for terms).
    pub text: String,
    /// Parent term node (phrases only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub parent: Option<String>,
    /// Next phrase (phrases only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub next: Option<String>,
    /// Previous phrase (phrases only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub previous: Option<String>,
    /// Child phrases (terms only).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<String>,
    /// Termbase URI (terms only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub uri: Option<String>,
}

// =============================================================================
// Document
// =============================================================================

/// The node graph of one converted document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Document identifier.
    pub id: String,
    /// Raw document text.
    pub text: String,
    /// Phrase nodes sorted by `(begin, end)`.
    pub phrases: Vec<PhraseNode>,
    /// Links of each phrase node, keyed by phrase id in sorted order.
    pub links: BTreeMap<String, NodeLinks>,
    /// Term nodes in processing order.
    pub terms: Vec<TermNode>,
    /// Problems that did not stop the conversion.
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl GraphDocument {
    /// Create an empty graph for a document.
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    /// Look up a phrase node by identifier.
    #[must_use]
    pub fn phrase(&self, id: &str) -> Option<&PhraseNode> {
        self.phrases.iter().find(|p| p.id == id)
    }

    /// Look up the phrase covering exactly `span`.
    #[must_use]
    pub fn phrase_at(&self, span: Span) -> Option<&PhraseNode> {
        self.phrases
            .binary_search_by(|p| p.span.cmp(&span))
            .ok()
            .map(|idx| &self.phrases[idx])
    }

    /// Look up a term node by identifier.
    #[must_use]
    pub fn term(&self, id: &str) -> Option<&TermNode> {
        self.terms.iter().find(|t| t.id == id)
    }

    /// Links of a phrase node (empty links if the id is unknown).
    #[must_use]
    pub fn links_of(&self, phrase_id: &str) -> NodeLinks {
        self.links.get(phrase_id).cloned().unwrap_or_default()
    }

    /// Parent term node identifier of a phrase.
    #[must_use]
    pub fn parent_of(&self, phrase_id: &str) -> Option<&str> {
        self.links.get(phrase_id)?.parent.as_deref()
    }

    /// Number of phrase nodes.
    #[must_use]
    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }

    /// Number of term nodes.
    #[must_use]
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// True if the graph holds no nodes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty() && self.terms.is_empty()
    }

    /// Flatten the graph: phrases in text order, then term nodes.
    #[must_use]
    pub fn records(&self) -> Vec<NodeRecord> {
        let phrases = self.phrases.iter().map(|p| {
            let links = self.links_of(&p.id);
            NodeRecord {
                id: p.id.clone(),
                kind: NodeKind::Phrase,
                begin: p.span.begin,
                end: p.span.end,
                text: p.text.clone(),
                parent: links.parent,
                next: links.next,
                previous: links.previous,
                children: Vec::new(),
                uri: None,
            }
        });
        let terms = self.terms.iter().map(|t| NodeRecord {
            id: t.id.clone(),
            kind: NodeKind::Term,
            begin: t.span.begin,
            end: t.span.end,
            text: t.text.clone(),
            parent: None,
            next: None,
            previous: None,
            children: t.children.clone(),
            uri: Some(t.uri.clone()),
        });
        phrases.chain(terms).collect()
    }

    /// Serialize the flattened records as a JSON array.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.records())
    }
}

// =============================================================================
// Tests
// =============================================================================
