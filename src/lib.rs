//! # termgraph
//!
//! Turns manually annotated terminology spans into an ordered graph of terms
//! and word-level phrases.
//!
//! - **Merging**: entities linked by annotators become compound, possibly
//!   discontinuous terms
//! - **Filtering**: terms nested strictly inside a longer term are dropped
//! - **Sub-terms**: containment relations between terms, by surface text
//! - **Graph**: phrase nodes with `next`/`previous`/`parent` links and term
//!   nodes resolved to termbase URIs
//!
//! ## Quick Start
//!
//! ```rust
//! use termgraph::{AnnotatedDocument, Pipeline, TermTable};
//!
//! let termbase = TermTable::from_entries(
//!     "termbase",
//!     [("raccolta differenziata", "Waste management", "urn:sense:42")],
//! );
//! let doc = AnnotatedDocument::new("La raccolta è differenziata.")
//!     .with_id("d1")
//!     .with_entity(1, 3, 11, "Waste management")
//!     .with_entity(2, 14, 27, "Waste management")
//!     .with_relation(1, 2);
//!
//! let out = Pipeline::with_defaults(&termbase).convert(&doc).unwrap();
//! let node = out.graph.term("d1#term_1").unwrap();
//! assert_eq!(node.uri, "urn:sense:42");
//! assert_eq!(node.children, vec!["d1#offset_3_11", "d1#offset_14_27"]);
//! assert_eq!(out.graph.parent_of("d1#offset_14_27"), Some("d1#term_1"));
//! ```
//!
//! Offsets are character offsets, as written by the annotation tool; see
//! [`offset`] for how they are mapped onto Rust strings.
//!
//! ## Feature Flags
//!
//! - `parallel` (default): [`Pipeline::convert_batch`] runs documents on the
//!   rayon thread pool.

pub mod builder;
pub mod config;
mod error;
pub mod filter;
pub mod inventory;
pub mod merge;
pub mod offset;
pub mod pipeline;
pub mod record;
pub mod store;
pub mod subterm;
pub mod tokenize;

pub use builder::{phrase_id, AnnotationGraphBuilder, ParentTieBreak};
pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use filter::LongestSpanFilter;
pub use inventory::TermInventory;
pub use merge::{MergeOrder, MergeStats, RelationMerger};
pub use offset::CharIndex;
pub use pipeline::{Conversion, Pipeline};
pub use record::{AnnotatedDocument, EntityRecord, RelationRecord, ValidationIssue};
pub use store::EntityStore;
pub use subterm::{SubtermMap, SubtermResolver};
pub use tokenize::WordTokenizer;

// Core re-exports
pub use termgraph_core::{
    Diagnostic, EntityId, FormRow, GraphDocument, LemmaRow, NodeKind, NodeLinks, NodeRecord,
    PhraseNode, Relation, Span, Term, TermLookup, TermNode, TermTable, WordSpan,
};

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    pub use crate::{
        AnnotatedDocument, Conversion, Error, GraphDocument, Pipeline, PipelineConfig, Result,
        TermLookup, TermTable,
    };
}
