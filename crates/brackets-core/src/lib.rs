//! Bracket balance validation library.
//!
//! This library checks whether a string made of `[]`, `<>`, `{}` and `()`
//! is balanced.

mod config;
mod validate;

pub use config::{Config, InvalidCharacters};
pub use validate::{
    BracketKind, BracketToken, SAMPLE_INPUTS, Side, SourceLocation, ValidationError, is_valid,
    tokenize, validate,
};
