//! Error types for JSON parsing and document construction.

use std::fmt;

use thiserror::Error;

/// The reason a parse was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    MultipleRoots,
    BracketMismatch,
    UnexpectedSeparator,
    UnexpectedQuote,
    UnexpectedCharacter,
    ControlCharacter,
    InvalidCodepoint,
    InvalidEscape,
    UnknownIdentifier,
    BadInteger,
    BadNumber,
    MissingKey,
    MissingValue,
    UnterminatedString,
    Unclosed,
    OutOfMemory,
}

impl ParseErrorKind {
    /// Short description of the failure.
    pub const fn description(self) -> &'static str {
        match self {
            Self::MultipleRoots => "multiple root objects",
            Self::BracketMismatch => "closing brace mismatch",
            Self::UnexpectedSeparator => "unexpected separator",
            Self::UnexpectedQuote => "unexpected quote character",
            Self::UnexpectedCharacter => "unexpected character",
            Self::ControlCharacter => "unexpected control character in string",
            Self::InvalidCodepoint => "invalid unicode codepoint",
            Self::InvalidEscape => "unrecognized escape sequence",
            Self::UnknownIdentifier => "unknown identifier",
            Self::BadInteger => "bad integer value",
            Self::BadNumber => "bad number value",
            Self::MissingKey => "object member has no key",
            Self::MissingValue => "object key has no value",
            Self::UnterminatedString => "unterminated string",
            Self::Unclosed => "not all objects or arrays were closed",
            Self::OutOfMemory => "node allocation failed",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Errors that can occur when parsing or building JSON documents.
#[derive(Debug, Error)]
pub enum Error {
    /// Syntax error. `offset` is a byte offset into the input and `line` is 1-based.
    #[error("JSON parse error: {kind} at byte {offset} (line {line})")]
    Parse {
        kind: ParseErrorKind,
        offset: usize,
        line: usize,
    },

    /// Common library error.
    #[error("{0}")]
    Common(#[from] makedds_common::Error),

    /// A root node was inserted into a document that already has one.
    #[error("document already has a root node")]
    RootExists,

    /// Node id does not refer to a live node in the document.
    #[error("invalid node id {0}")]
    InvalidNode(u32),

    /// The node pool refused an allocation.
    #[error("node pool exhausted")]
    PoolExhausted,
}

impl Error {
    /// The parse failure reason, if this is a syntax error.
    pub fn parse_kind(&self) -> Option<ParseErrorKind> {
        match self {
            Self::Parse { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Result type for JSON operations.
pub type Result<T> = std::result::Result<T, Error>;
