//! Word tokenization of (possibly discontinuous) terms.
//!
//! Words are taken from the document, not from the term's normalized text.
//! Each span's substring is split on its own:
//!
//! ```text
//! text:   "abc-------xyz12345"
//! spans:   [0,3)     [10,13)
//!          └─┬─┘     └─┬─┘
//!          "abc"     "xyz"     -> words [0,3) [10,13)
//! ```
//!
//! Each substring is split into word-boundary delimited runs (`\b\S+?\b`),
//! and each run is shifted by the span's begin offset to give absolute
//! document offsets. Neither lower-casing nor the merge separator can shift
//! them.

use once_cell::sync::Lazy;
use regex::Regex;

use termgraph_core::{Result, Span, Term, WordSpan};

use crate::offset::CharIndex;

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\S+?\b").expect("word pattern is valid"));

/// Splits terms into word-level spans of the document text.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    /// Create a tokenizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Word spans of a term over `text`, in span order.
    ///
    /// # Errors
    ///
    /// `InvalidSpan` if one of the term's spans falls outside `text`.
    pub fn word_spans(&self, term: &Term, text: &str, index: &CharIndex) -> Result<Vec<WordSpan>> {
        self.split(term.spans(), text, index)
    }

    /// Word spans of the given spans of `text`.
    pub fn split(&self, spans: &[Span], text: &str, index: &CharIndex) -> Result<Vec<WordSpan>> {
        let mut words = Vec::new();
        for span in spans {
            let piece = index.slice(text, *span)?;
            for m in WORD.find_iter(piece) {
                let local = piece[..m.start()].chars().count();
                let len = m.as_str().chars().count();
                words.push(Span::new(span.begin + local, span.begin + local + len));
            }
        }
        Ok(words)
    }
}
