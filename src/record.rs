//! Input records: one annotated document as exported by the annotation tool.
//!
//! Field names follow the tool's JSON-lines export, so a line can be
//! deserialized directly:
//!
//! ```rust
//! use termgraph::AnnotatedDocument;
//!
//! let line = r#"{"id": 7, "text": "abc xyz",
//!     "entities": [{"id": 1, "start_offset": 0, "end_offset": 3, "label": "LOC"}],
//!     "relations": [{"from_id": 1, "to_id": 2}]}"#;
//! let doc: AnnotatedDocument = serde_json::from_str(line).unwrap();
//! assert_eq!(doc.entities.len(), 1);
//! assert_eq!(doc.relations[0].to_id, 2);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use termgraph_core::{EntityId, Relation, Span};

use crate::offset::CharIndex;

/// One annotated entity span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Entity identifier, unique within the document.
    pub id: u64,
    /// Start character offset.
    pub start_offset: usize,
    /// End character offset (exclusive).
    pub end_offset: usize,
    /// Category label.
    pub label: String,
}

impl EntityRecord {
    /// Create an entity record.
    #[must_use]
    pub fn new(id: u64, start_offset: usize, end_offset: usize, label: impl Into<String>) -> Self {
        Self {
            id,
            start_offset,
            end_offset,
            label: label.into(),
        }
    }

    /// The record's span.
    #[must_use]
    pub fn span(&self) -> Span {
        Span::new(self.start_offset, self.end_offset)
    }
}

/// Annotator link between two entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRecord {
    /// Declared source entity.
    pub from_id: u64,
    /// Declared target entity.
    pub to_id: u64,
}

impl From<&RelationRecord> for Relation {
    fn from(r: &RelationRecord) -> Self {
        Relation::new(EntityId(r.from_id), EntityId(r.to_id))
    }
}

/// One annotated document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedDocument {
    /// Document identifier; batches fall back to the 1-based position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    /// Raw document text.
    pub text: String,
    /// Annotated entity spans.
    #[serde(default)]
    pub entities: Vec<EntityRecord>,
    /// Annotated links between entities.
    #[serde(default)]
    pub relations: Vec<RelationRecord>,
}

/// Problem found by [`AnnotatedDocument::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// `start_offset >= end_offset`.
    InvalidSpan {
        /// Entity identifier.
        entity: u64,
        /// The offending span.
        span: Span,
    },
    /// The span ends past the text.
    SpanOutOfBounds {
        /// Entity identifier.
        entity: u64,
        /// The offending span.
        span: Span,
        /// Text length in characters.
        text_len: usize,
    },
    /// The span covers only whitespace.
    BlankSpan {
        /// Entity identifier.
        entity: u64,
        /// The offending span.
        span: Span,
    },
    /// Two entities share an identifier.
    DuplicateId {
        /// The repeated identifier.
        entity: u64,
    },
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationIssue::InvalidSpan { entity, span } => {
                write!(f, "entity {}: invalid span {}", entity, span)
            }
            ValidationIssue::SpanOutOfBounds {
                entity,
                span,
                text_len,
            } => write!(
                f,
                "entity {}: span {} exceeds text length {}",
                entity, span, text_len
            ),
            ValidationIssue::BlankSpan { entity, span } => {
                write!(f, "entity {}: span {} covers only whitespace", entity, span)
            }
            ValidationIssue::DuplicateId { entity } => {
                write!(f, "entity {}: duplicate identifier", entity)
            }
        }
    }
}

impl AnnotatedDocument {
    /// Create a document with no annotations.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the document identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<serde_json::Value>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add an entity span.
    #[must_use]
    pub fn with_entity(mut self, id: u64, begin: usize, end: usize, label: &str) -> Self {
        self.entities.push(EntityRecord::new(id, begin, end, label));
        self
    }

    /// Add a relation.
    #[must_use]
    pub fn with_relation(mut self, from_id: u64, to_id: u64) -> Self {
        self.relations.push(RelationRecord { from_id, to_id });
        self
    }

    /// Identifier as a string, or `fallback` if the record has none.
    #[must_use]
    pub fn id_or(&self, fallback: impl FnOnce() -> String) -> String {
        match &self.id {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => fallback(),
        }
    }

    /// Relations as core values, in declaration order.
    #[must_use]
    pub fn core_relations(&self) -> Vec<Relation> {
        self.relations.iter().map(Relation::from).collect()
    }

    /// Report every problem with the entity list, not only the first.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let index = CharIndex::new(&self.text);
        let mut seen = HashSet::new();
        let mut issues = Vec::new();

        for ent in &self.entities {
            let span = ent.span();
            if !seen.insert(ent.id) {
                issues.push(ValidationIssue::DuplicateId { entity: ent.id });
            }
            if span.begin >= span.end {
                issues.push(ValidationIssue::InvalidSpan {
                    entity: ent.id,
                    span,
                });
            } else if span.end > index.char_len() {
                issues.push(ValidationIssue::SpanOutOfBounds {
                    entity: ent.id,
                    span,
                    text_len: index.char_len(),
                });
            } else if index
                .slice(&self.text, span)
                .map(|s| s.trim().is_empty())
                .unwrap_or(true)
            {
                issues.push(ValidationIssue::BlankSpan {
                    entity: ent.id,
                    span,
                });
            }
        }
        issues
    }
}
