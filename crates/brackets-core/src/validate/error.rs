//! Error types for the validator.

use std::fmt;

use thiserror::Error;

/// A source location (line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// 1-indexed line number.
    pub line: usize,
    /// 1-indexed column number, counted in characters.
    pub column: usize,
}

impl SourceLocation {
    /// Compute line and column from a byte offset in `source`.
    #[must_use]
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let mut line = 1;
        let mut column = 1;

        for (i, c) in source.char_indices() {
            if i >= offset {
                break;
            }
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }

        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Errors that can occur during validation.
///
/// An unbalanced input is not an error; it validates to `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The input contains a character that is not one of the eight brackets.
    #[error("{location}: unrecognized character {character:?}")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Byte offset of the character in the input.
        offset: usize,
        /// Line and column of the character.
        location: SourceLocation,
    },
}

impl ValidationError {
    /// Create an invalid character error with its position in `source`.
    pub(crate) fn invalid_character(source: &str, offset: usize, character: char) -> Self {
        Self::InvalidCharacter {
            character,
            offset,
            location: SourceLocation::from_offset(source, offset),
        }
    }
}
