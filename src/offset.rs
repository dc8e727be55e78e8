//! Character offset handling.
//!
//! Annotation tools count positions in **characters**; Rust strings are
//! indexed by **bytes**. The two agree only for ASCII text:
//!
//! ```text
//! Text:   "la città"
//! chars:   0 1 2 3 4 5 6 7        (8 characters)
//! bytes:   0 1 2 3 4 5 6 7-8      (9 bytes, "à" takes two)
//! ```
//!
//! Slicing a document with an annotator's character offset as if it were a
//! byte offset either panics or silently cuts the wrong substring, which
//! corrupts every offset computed afterwards. [`CharIndex`] precomputes the
//! mapping once per document and turns every span into a checked byte range.

use std::ops::Range;

use termgraph_core::{Error, Result, Span};

/// Character-to-byte index over one text.
///
/// Conversions are O(1). For ASCII text no table is stored.
#[derive(Debug, Clone)]
pub struct CharIndex {
    char_to_byte: Vec<usize>,
    char_len: usize,
    byte_len: usize,
}

impl CharIndex {
    /// Build the index for `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        if text.is_ascii() {
            return Self {
                char_to_byte: Vec::new(),
                char_len: text.len(),
                byte_len: text.len(),
            };
        }
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        let char_len = char_to_byte.len();
        char_to_byte.push(text.len());
        Self {
            char_to_byte,
            char_len,
            byte_len: text.len(),
        }
    }

    /// Length of the text in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// True if the indexed text is ASCII (offsets are identical).
    #[must_use]
    pub fn is_ascii(&self) -> bool {
        self.char_to_byte.is_empty()
    }

    /// Byte position of a character offset (`char_len()` maps to the text end).
    #[must_use]
    pub fn char_to_byte(&self, char_idx: usize) -> Option<usize> {
        if char_idx > self.char_len {
            return None;
        }
        if self.is_ascii() {
            Some(char_idx)
        } else {
            self.char_to_byte.get(char_idx).copied()
        }
    }

    /// Byte range of a span, failing with `InvalidSpan` unless
    /// `begin < end <= char_len()`.
    pub fn byte_range(&self, span: Span) -> Result<Range<usize>> {
        let span = Span::checked(span.begin, span.end, self.char_len)?;
        match (self.char_to_byte(span.begin), self.char_to_byte(span.end)) {
            (Some(start), Some(end)) if end <= self.byte_len => Ok(start..end),
            _ => Err(Error::invalid_span(span.begin, span.end, self.char_len)),
        }
    }

    /// The substring of `text` covered by `span`.
    ///
    /// `text` must be the string this index was built from.
    pub fn slice<'a>(&self, text: &'a str, span: Span) -> Result<&'a str> {
        let range = self.byte_range(span)?;
        text.get(range)
            .ok_or_else(|| Error::invalid_span(span.begin, span.end, self.char_len))
    }
}

/// Shrink `span` so it neither starts nor ends with whitespace.
///
/// Fails with `InvalidSpan` if the span is malformed or covers only
/// whitespace.
pub fn trim_span(text: &str, index: &CharIndex, span: Span) -> Result<Span> {
    let slice = index.slice(text, span)?;
    let leading = slice.chars().take_while(|c| c.is_whitespace()).count();
    let trailing = slice.chars().rev().take_while(|c| c.is_whitespace()).count();
    if leading == span.len() {
        return Err(Error::invalid_span(span.begin, span.end, index.char_len()));
    }
    Ok(Span::new(span.begin + leading, span.end - trailing))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Slicing by characters must agree with collecting characters.
        #[test]
        fn slice_matches_char_collect(text in ".{1,60}", a in 0usize..60, b in 0usize..60) {
            let index = CharIndex::new(&text);
            let n = index.char_len();
            let (begin, end) = (a.min(b) % (n + 1), a.max(b) % (n + 1));
            let span = Span::new(begin.min(end), begin.max(end));
            let expected: String = text.chars().skip(span.begin).take(span.len()).collect();
            match index.slice(&text, span) {
                Ok(s) => prop_assert_eq!(s, expected.as_str()),
                Err(_) => prop_assert!(span.begin >= span.end),
            }
        }

        /// Out-of-range spans never slice.
        #[test]
        fn out_of_range_is_error(text in "[a-z]{0,20}", extra in 1usize..10) {
            let index = CharIndex::new(&text);
            let span = Span::new(0, index.char_len() + extra);
            prop_assert!(index.slice(&text, span).is_err());
        }
    }
}
