//! Span, term and relation types.
//!
//! # Offsets
//!
//! All offsets are **character** offsets into the document text, the unit
//! annotation tools export. Converting them to byte positions for slicing is
//! the job of the engine's offset index, never of these types.
//!
//! # Terms and discontinuity
//!
//! A [`Term`] starts life as one annotated span. Annotators can link two
//! spans with a [`Relation`] to say they form a single compound term, so a
//! merged term may cover several non-adjacent regions:
//!
//! ```text
//! "raccolta -------- differenziata"
//!  [0, 8)            [18, 31)
//!  └──────── term "raccolta differenziata", outer span [0, 31) ───┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

// ============================================================================
// Identifiers
// ============================================================================

/// Identifier of an annotated entity (and of the term it survives as).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

// ============================================================================
// Span
// ============================================================================

/// Half-open character interval `[begin, end)`.
///
/// Ordering is by `begin`, then `end`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Span {
    /// Start offset (inclusive).
    pub begin: usize,
    /// End offset (exclusive).
    pub end: usize,
}

/// A single word-level unit of a term.
pub type WordSpan = Span;

impl Span {
    /// Create a span without validation.
    #[must_use]
    pub const fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    /// Create a span, failing unless `begin < end <= text_len`.
    ///
    /// ```rust
    /// use termgraph_core::Span;
    ///
    /// assert!(Span::checked(0, 3, 10).is_ok());
    /// assert!(Span::checked(3, 3, 10).is_err());
    /// assert!(Span::checked(8, 11, 10).is_err());
    /// ```
    pub fn checked(begin: usize, end: usize, text_len: usize) -> Result<Self> {
        if begin >= end || end > text_len {
            return Err(Error::invalid_span(begin, end, text_len));
        }
        Ok(Self { begin, end })
    }

    /// Number of characters covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    /// True if the span covers no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if `other` lies within this span (bounds may coincide).
    #[must_use]
    pub fn contains(&self, other: &Span) -> bool {
        other.begin >= self.begin && other.end <= self.end
    }

    /// True if `other` lies within this span and the two are not identical.
    ///
    /// This is the subsumption rule used to keep only the longest terms:
    /// identical spans never subsume each other.
    #[must_use]
    pub fn strictly_contains(&self, other: &Span) -> bool {
        (other.begin >= self.begin && other.end < self.end)
            || (other.begin > self.begin && other.end <= self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.begin, self.end)
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

// ============================================================================
// Relation
// ============================================================================

/// Annotator link asserting that two entities form one compound term.
///
/// The pair is unordered: `from`/`to` only mirror the source record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    /// First endpoint as declared.
    pub from: EntityId,
    /// Second endpoint as declared.
    pub to: EntityId,
}

impl Relation {
    /// Create a relation between two entities.
    #[must_use]
    pub fn new(from: impl Into<EntityId>, to: impl Into<EntityId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Endpoints as `(min, max)`, independent of declaration direction.
    #[must_use]
    pub fn endpoints(&self) -> (EntityId, EntityId) {
        if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        }
    }

    /// True if both endpoints name the same entity.
    #[must_use]
    pub fn is_reflexive(&self) -> bool {
        self.from == self.to
    }
}

// ============================================================================
// Term
// ============================================================================

/// A resolved surface unit, possibly covering several spans.
///
/// Spans are non-empty and always sorted ascending by `begin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Term {
    /// Identifier this term survives under.
    pub id: EntityId,
    /// Category label (the annotator's domain).
    pub label: String,
    /// Normalized surface text: the span texts in span order, joined by the
    /// merge separator.
    pub text: String,
    spans: Vec<Span>,
    // one normalized text per span, kept parallel to `spans`
    #[serde(skip)]
    parts: Vec<String>,
}

impl Term {
    /// Create a single-span term.
    #[must_use]
    pub fn new(
        id: impl Into<EntityId>,
        label: impl Into<String>,
        text: impl Into<String>,
        span: Span,
    ) -> Self {
        let text = text.into();
        Self {
            id: id.into(),
            label: label.into(),
            parts: vec![text.clone()],
            text,
            spans: vec![span],
        }
    }

    /// Fuse two terms into one compound term, joining span texts with a
    /// single space.
    ///
    /// The operand whose first span starts earlier contributes the label;
    /// the later operand's identifier survives. The text lists every span's
    /// text in span order, however the operands interleave.
    ///
    /// ```rust
    /// use termgraph_core::{Span, Term};
    ///
    /// let a = Term::new(1, "LOC", "t1", Span::new(0, 2));
    /// let b = Term::new(2, "LOC", "t2", Span::new(10, 12));
    /// let merged = Term::merge(b, a);
    /// assert_eq!(merged.id.0, 2);
    /// assert_eq!(merged.text, "t1 t2");
    /// assert_eq!(merged.outer_span(), Span::new(0, 12));
    /// ```
    #[must_use]
    pub fn merge(a: Term, b: Term) -> Term {
        Self::merge_with(a, b, " ")
    }

    /// Fuse two terms, joining span texts with `separator`.
    #[must_use]
    pub fn merge_with(a: Term, b: Term, separator: &str) -> Term {
        let (earlier, later) = if a.position_key() <= b.position_key() {
            (a, b)
        } else {
            (b, a)
        };
        let mut pieces: Vec<(Span, String)> = earlier
            .spans
            .into_iter()
            .zip(earlier.parts)
            .chain(later.spans.into_iter().zip(later.parts))
            .collect();
        // stable: a repeated span keeps the earlier operand's text first
        pieces.sort_by_key(|(span, _)| *span);
        let (spans, parts): (Vec<Span>, Vec<String>) = pieces.into_iter().unzip();
        Term {
            id: later.id,
            label: earlier.label,
            text: parts.join(separator),
            spans,
            parts,
        }
    }

    /// Constituent spans, sorted by begin offset.
    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Number of constituent spans.
    #[must_use]
    pub fn num_spans(&self) -> usize {
        self.spans.len()
    }

    /// True if the term covers more than one span.
    #[must_use]
    pub fn is_discontinuous(&self) -> bool {
        self.spans.len() > 1
    }

    /// Bounding span from the smallest begin to the largest end.
    #[must_use]
    pub fn outer_span(&self) -> Span {
        let begin = self.spans.iter().map(|s| s.begin).min().unwrap_or(0);
        let end = self.spans.iter().map(|s| s.end).max().unwrap_or(0);
        Span::new(begin, end)
    }

    /// Number of space-separated pieces of the span texts.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.parts.iter().map(|p| p.split(' ').count()).sum()
    }

    fn position_key(&self) -> (Span, EntityId) {
        (self.spans.first().copied().unwrap_or_default(), self.id)
    }
}
