//! Parse failure reporting for the matching engine.
//!
//! A [`ParseError`] is the sole failure channel of the raising primitives
//! (`char`, `keyword`, `match_rule`). It carries the exact offset at which a
//! primitive gave up, what was expected there, and the offending character
//! (or the end-of-input marker). The non-raising `maybe_*` primitives catch
//! and discard it; everything else propagates it unchanged to the top-level
//! `parse` call.
//!
//! Grammar bugs (an unresolvable rule name, a malformed character class) are
//! *not* parse errors: they are programming-contract violations and panic
//! instead of flowing through this type.

use std::fmt;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use thiserror::Error;

/// Result alias used by every raising primitive.
pub type ParseResult<T> = Result<T, ParseError>;

/// What the cursor was looking at when a primitive failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Found {
    Char(char),
    EndOfInput,
}

impl From<Option<char>> for Found {
    fn from(ch: Option<char>) -> Self {
        match ch {
            Some(c) => Found::Char(c),
            None => Found::EndOfInput,
        }
    }
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Char(c) => write!(f, "'{}'", c.escape_default()),
            Found::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// The failure taxonomy of the engine.
///
/// All variants except [`ErrorKind::Invalid`] are raised by the engine
/// itself; `Invalid` is the channel for grammar-authored content errors
/// (e.g. a data format rejecting a trailing comma).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The next character failed a character-class predicate.
    ClassMismatch { class: String },
    /// A primitive needed a character but the cursor was exhausted.
    EndOfInput { expected: String },
    /// None of the candidate literals matched at the current position.
    KeywordMismatch { candidates: Vec<String> },
    /// Every rule passed to an ordered choice failed.
    NoAlternative { rules: Vec<String> },
    /// The start rule succeeded but input remains.
    TrailingInput,
    /// A grammar-defined rejection of otherwise well-formed input.
    Invalid { message: String },
}

impl ErrorKind {
    /// Error code suffix for diagnostic codes.
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::ClassMismatch { .. } => "class_mismatch",
            Self::EndOfInput { .. } => "end_of_input",
            Self::KeywordMismatch { .. } => "keyword_mismatch",
            Self::NoAlternative { .. } => "no_alternative",
            Self::TrailingInput => "trailing_input",
            Self::Invalid { .. } => "invalid",
        }
    }
}

fn join_quoted(items: &[String], separator: &str) -> String {
    items
        .iter()
        .map(|item| format!("`{item}`"))
        .collect::<Vec<_>>()
        .join(separator)
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ClassMismatch { class } => {
                write!(f, "expected a character matching [{class}]")
            }
            ErrorKind::EndOfInput { expected } => write!(f, "expected {expected}"),
            ErrorKind::KeywordMismatch { candidates } => {
                write!(f, "expected one of {}", join_quoted(candidates, ", "))
            }
            ErrorKind::NoAlternative { rules } => {
                write!(f, "expected {}", join_quoted(rules, " or "))
            }
            ErrorKind::TrailingInput => write!(f, "expected end of input"),
            ErrorKind::Invalid { message } => write!(f, "{message}"),
        }
    }
}

/// A structured parse failure: what went wrong, where, and what was there.
///
/// `position` is a byte offset into the parsed input, always on a character
/// boundary. The error is immutable after construction and survives
/// propagation through any number of enclosing alternatives without losing
/// its original position.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} (found {found} at position {position})")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub position: usize,
    pub found: Found,
}

impl ParseError {
    pub fn new(kind: ErrorKind, position: usize, found: Found) -> Self {
        Self {
            kind,
            position,
            found,
        }
    }

    pub fn class_mismatch(position: usize, class: &str, found: char) -> Self {
        Self::new(
            ErrorKind::ClassMismatch {
                class: class.to_string(),
            },
            position,
            Found::Char(found),
        )
    }

    pub fn end_of_input(position: usize, expected: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::EndOfInput {
                expected: expected.into(),
            },
            position,
            Found::EndOfInput,
        )
    }

    pub fn keyword_mismatch(position: usize, candidates: &[&str], found: Found) -> Self {
        Self::new(
            ErrorKind::KeywordMismatch {
                candidates: candidates.iter().map(|c| c.to_string()).collect(),
            },
            position,
            found,
        )
    }

    pub fn no_alternative(position: usize, rules: Vec<String>, found: Found) -> Self {
        Self::new(ErrorKind::NoAlternative { rules }, position, found)
    }

    pub fn trailing_input(position: usize, found: Found) -> Self {
        Self::new(ErrorKind::TrailingInput, position, found)
    }

    pub fn invalid(position: usize, message: impl Into<String>, found: Found) -> Self {
        Self::new(
            ErrorKind::Invalid {
                message: message.into(),
            },
            position,
            found,
        )
    }

    /// Derives the 1-based line and column of the failure from the original
    /// input text. Positions past the end of the input clamp to its end.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let mut end = self.position.min(source.len());
        while !source.is_char_boundary(end) {
            end -= 1;
        }
        let mut line = 1;
        let mut col = 1;
        for ch in source[..end].chars() {
            if ch == '\n' {
                line += 1;
                col = 1;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    fn primary_label(&self) -> String {
        match &self.kind {
            ErrorKind::ClassMismatch { .. } => "mismatched character".into(),
            ErrorKind::EndOfInput { .. } => "input ends here".into(),
            ErrorKind::KeywordMismatch { .. } => "no keyword matched here".into(),
            ErrorKind::NoAlternative { .. } => "no alternative matched here".into(),
            ErrorKind::TrailingInput => "unexpected trailing input".into(),
            ErrorKind::Invalid { .. } => "invalid content".into(),
        }
    }
}

impl Diagnostic for ParseError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!(
            "descent::parse::{}",
            self.kind.code_suffix()
        )))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let len = match self.found {
            Found::Char(c) => c.len_utf8(),
            Found::EndOfInput => 0,
        };
        let span = SourceSpan::from(self.position..self.position + len);
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(self.primary_label()),
            span,
        ))))
    }
}

/// Prints a [`ParseError`] as a full miette diagnostic with the parsed input
/// attached, so the report shows line/column context and an arrow at the
/// failure offset. Use this for user-facing display in CLI and REPL contexts.
pub fn print_error(error: ParseError, source_name: &str, source_text: &str) {
    let report = miette::Report::new(error)
        .with_source_code(NamedSource::new(source_name, source_text.to_string()));
    eprintln!("{report:?}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_position_and_found() {
        let err = ParseError::class_mismatch(3, "0-9", 'x');
        assert_eq!(
            err.to_string(),
            "expected a character matching [0-9] (found 'x' at position 3)"
        );
    }

    #[test]
    fn end_of_input_display() {
        let err = ParseError::end_of_input(0, "a digit");
        assert_eq!(
            err.to_string(),
            "expected a digit (found end of input at position 0)"
        );
    }

    #[test]
    fn keyword_mismatch_lists_candidates() {
        let err = ParseError::keyword_mismatch(2, &["+", "-"], Found::Char('x'));
        assert_eq!(
            err.to_string(),
            "expected one of `+`, `-` (found 'x' at position 2)"
        );
    }

    #[test]
    fn line_col_counts_newlines() {
        let source = "ab\ncde\nf";
        let err = ParseError::trailing_input(5, Found::Char('e'));
        assert_eq!(err.line_col(source), (2, 3));
        let at_start = ParseError::trailing_input(0, Found::Char('a'));
        assert_eq!(at_start.line_col(source), (1, 1));
    }

    #[test]
    fn line_col_clamps_past_end() {
        let err = ParseError::end_of_input(99, "anything");
        assert_eq!(err.line_col("ab"), (1, 3));
    }
}
