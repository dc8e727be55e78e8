//! # termgraph-core
//!
//! Core types for termgraph: shared data structures used by the span
//! resolution engine and by downstream exporters.
//!
//! This crate provides:
//! - **Span and term types**: `Span`, `Term`, `Relation`, `EntityId`
//! - **Graph types**: `GraphDocument`, `PhraseNode`, `TermNode`, `NodeLinks`, `NodeRecord`
//! - **Term lookup**: the `TermLookup` seam and the in-memory `TermTable`
//!
//! Exporters only need this crate to consume converted documents.

pub mod entity;
pub mod error;
pub mod graph;
pub mod lexicon;

pub use entity::{EntityId, Relation, Span, Term, WordSpan};
pub use error::{Error, Result};
pub use graph::{
    Diagnostic, GraphDocument, NodeKind, NodeLinks, NodeRecord, PhraseNode, TermNode,
};
pub use lexicon::{FormRow, LemmaRow, TermLookup, TermTable};
