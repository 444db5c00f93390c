//! Bracket balance validator.
//!
//! A single left-to-right pass keeps a stack of brackets that are open but not
//! yet closed. A closing bracket removes the nearest open bracket of the same
//! kind, even when brackets of other kinds were opened after it. Brackets of
//! one kind therefore nest in strict order, while different kinds may
//! interleave: `([)]` is balanced.

mod error;
mod token;

pub use error::{SourceLocation, ValidationError};
pub use token::{BracketKind, BracketToken, Side, tokenize};

use tracing::{debug, trace};

use crate::{Config, InvalidCharacters};

/// The sample inputs shown by the demonstration driver.
pub const SAMPLE_INPUTS: [&str; 5] = ["<][>", "<>[]{}()", "[]{}()", "{<[]>}", "({})"];

/// Brackets opened but not yet closed, one stack per kind, most recent last.
///
/// The nearest open bracket of a kind is always the top of that kind's stack,
/// so closing never disturbs brackets of other kinds.
#[derive(Debug, Default)]
struct OpenStack {
    open: [Vec<BracketToken>; BracketKind::ALL.len()],
}

impl OpenStack {
    fn push(&mut self, token: BracketToken) {
        debug_assert!(token.is_opening());
        self.open[token.kind.index()].push(token);
    }

    /// Remove the nearest open bracket that `close` closes.
    ///
    /// Returns `false` when there is none.
    fn close(&mut self, close: BracketToken) -> bool {
        let stack = &mut self.open[close.kind.index()];
        match stack.last() {
            Some(&open) if close.closes(open) => {
                stack.pop();
                true
            }
            _ => false,
        }
    }

    fn len(&self) -> usize {
        self.open.iter().map(Vec::len).sum()
    }

    fn is_empty(&self) -> bool {
        self.open.iter().all(Vec::is_empty)
    }

    /// Open brackets of `kind`, oldest first.
    #[cfg(test)]
    fn of_kind(&self, kind: BracketKind) -> &[BracketToken] {
        &self.open[kind.index()]
    }
}

/// Check whether `input` is balanced, rejecting anything that isn't a bracket.
///
/// # Errors
///
/// Returns an error if `input` contains a character other than the eight
/// bracket glyphs.
pub fn is_valid(input: &str) -> Result<bool, ValidationError> {
    validate(input, &Config::default())
}

/// Check whether `input` is balanced.
///
/// # Errors
///
/// Returns an error if `input` contains a character that is not a bracket and
/// the configuration rejects such characters.
pub fn validate(input: &str, config: &Config) -> Result<bool, ValidationError> {
    let mut stack = OpenStack::default();

    for (offset, c) in input.char_indices() {
        if config.ignores(c) {
            continue;
        }

        let Some(token) = BracketToken::from_char(c) else {
            match config.invalid_characters {
                InvalidCharacters::Reject => {
                    return Err(ValidationError::invalid_character(input, offset, c));
                }
                InvalidCharacters::Skip => {
                    debug!(character = ?c, offset, "skipping unrecognized character");
                    continue;
                }
            }
        };

        match token.side {
            Side::Open => {
                trace!(%token, offset, "open");
                stack.push(token);
            }
            Side::Close => {
                if !stack.close(token) {
                    debug!(%token, offset, "no open bracket to close");
                    return Ok(false);
                }
                trace!(%token, offset, "close");
            }
        }
    }

    let balanced = stack.is_empty();
    if !balanced {
        debug!(unclosed = stack.len(), "input ended with open brackets");
    }
    Ok(balanced)
}
