//! Parse error types.

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::{TextRange, TextSize};

/// Errors that stop parsing a proto document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A token that does not fit the grammar at this point.
    #[error("unexpected `{found}` at {range:?}, expected {expected}")]
    UnexpectedToken {
        found: SmolStr,
        expected: &'static str,
        range: TextRange,
    },

    /// The input ended inside a declaration.
    #[error("unexpected end of input at {offset:?}, expected {expected}")]
    UnexpectedEof {
        expected: &'static str,
        offset: TextSize,
    },

    /// Input the lexer could not tokenize.
    #[error("invalid input `{text}` at {range:?}")]
    InvalidToken { text: SmolStr, range: TextRange },
}

impl ParseError {
    /// Source range the error points at.
    pub fn range(&self) -> TextRange {
        match self {
            Self::UnexpectedToken { range, .. } | Self::InvalidToken { range, .. } => *range,
            Self::UnexpectedEof { offset, .. } => TextRange::empty(*offset),
        }
    }
}
