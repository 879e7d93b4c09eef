//! Error types.
//!
//! Syntax errors end tokenization for good and are reported with their
//! position; the other enums describe misuse of accessors, sources and
//! configuration.
use thiserror::Error;

use crate::event::Event;

/// Why the tokenizer stopped.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    /// A control byte that may not appear anywhere in a JSON text.
    #[error("invalid character {0:#04x}")]
    InvalidCharacter(u8),
    /// A byte that is not legal in the current lexical state.
    #[error("unexpected character '{}'", escaped(.0))]
    UnexpectedCharacter(u8),
    /// `]` or `}` that does not close the innermost open container.
    #[error("mismatched closing '{}'", escaped(.0))]
    MismatchedClose(u8),
    /// `,` or `:` outside of the container that allows it.
    #[error("unexpected separator '{}'", escaped(.0))]
    UnexpectedSeparator(u8),
    /// Opening another container would exceed the nesting limit.
    #[error("nesting depth exceeds the limit of {0}")]
    DepthLimitExceeded(usize),
    /// Input ended while a token or container was still open.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn escaped(unit: &u8) -> core::ascii::EscapeDefault {
    core::ascii::escape_default(*unit)
}

impl SyntaxError {
    /// Coarse category of the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCharacter(_) | Self::UnexpectedCharacter(_) => ErrorKind::Lexical,
            Self::MismatchedClose(_) | Self::UnexpectedSeparator(_) => ErrorKind::Structural,
            Self::DepthLimitExceeded(_) => ErrorKind::Resource,
            Self::UnexpectedEndOfInput => ErrorKind::PrematureEnd,
        }
    }
}

/// Coarse error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Illegal byte or byte sequence.
    Lexical,
    /// Well-formed tokens in a malformed arrangement.
    Structural,
    /// The nesting limit was hit.
    Resource,
    /// The producer finished mid-document.
    PrematureEnd,
}

/// A [`SyntaxError`] with the position it was detected at.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{source} at {line}:{column}")]
pub struct ParserError {
    /// What went wrong.
    pub source: SyntaxError,
    /// Units consumed when the error was detected, the offending one included.
    pub offset: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, counted in units.
    pub column: usize,
}

impl ParserError {
    /// Coarse category of the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

/// Misuse of the token accessors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The accessor does not apply to the last event returned.
    #[error("no {expected} available after {found:?}")]
    NotAvailable {
        /// What the accessor reads.
        expected: &'static str,
        /// The last event returned, if any.
        found: Option<Event>,
    },
    /// The integer does not fit in an `i64`.
    #[error("integer out of range")]
    IntegerOverflow,
    /// The accumulated digits are not a valid floating point number.
    #[error("invalid number")]
    InvalidNumber,
    /// The token text is not valid UTF-8.
    #[error("token text is not valid UTF-8")]
    InvalidUtf8,
}

/// Misuse of an input source.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SourceError {
    /// The byte region cannot accept more input until some is staged.
    #[error("input buffer is full")]
    Full,
    /// No staged unit is available.
    #[error("not enough input data")]
    Exhausted,
}

/// Invalid configuration change.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The setting can only change before the first unit is consumed.
    #[error("cannot reconfigure a tokenizer after parsing has started")]
    ParseInProgress,
}

/// Failure to build a [`JsonTree`](crate::JsonTree).
#[cfg(feature = "tree")]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The tokenizer rejected the input.
    #[error(transparent)]
    Parser(#[from] ParserError),
    /// A token could not be converted into a value.
    #[error(transparent)]
    Value(#[from] ValueError),
    /// The tokenizer ended without producing a document.
    #[error("no document in input")]
    EmptyDocument,
    /// The document root is a scalar; trees are rooted at an array or object.
    #[error("document root must be an array or an object, found {0:?}")]
    NotAContainer(Event),
}
