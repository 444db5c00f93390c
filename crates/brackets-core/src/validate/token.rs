//! Bracket classification.

use std::fmt;

use super::ValidationError;

/// One of the four bracket pair types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BracketKind {
    /// `[` and `]`.
    Square,
    /// `<` and `>`.
    Angle,
    /// `{` and `}`.
    Curly,
    /// `(` and `)`.
    Round,
}

impl BracketKind {
    /// All bracket kinds.
    pub const ALL: [Self; 4] = [Self::Square, Self::Angle, Self::Curly, Self::Round];

    /// Position of this kind in [`Self::ALL`].
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Square => 0,
            Self::Angle => 1,
            Self::Curly => 2,
            Self::Round => 3,
        }
    }

    /// The opening glyph of this kind.
    #[must_use]
    pub const fn open_char(self) -> char {
        match self {
            Self::Square => '[',
            Self::Angle => '<',
            Self::Curly => '{',
            Self::Round => '(',
        }
    }

    /// The closing glyph of this kind.
    #[must_use]
    pub const fn close_char(self) -> char {
        match self {
            Self::Square => ']',
            Self::Angle => '>',
            Self::Curly => '}',
            Self::Round => ')',
        }
    }
}

/// Which side of a pair a bracket is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// An opening bracket: `[`, `<`, `{` or `(`.
    Open,
    /// A closing bracket: `]`, `>`, `}` or `)`.
    Close,
}

/// A classified bracket character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BracketToken {
    /// The pair type.
    pub kind: BracketKind,
    /// Opening or closing.
    pub side: Side,
}

impl BracketToken {
    /// Create a token from its parts.
    #[must_use]
    pub const fn new(kind: BracketKind, side: Side) -> Self {
        Self { kind, side }
    }

    /// Classify a character, or `None` if it is not a bracket.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        let token = match c {
            '[' => Self::new(BracketKind::Square, Side::Open),
            ']' => Self::new(BracketKind::Square, Side::Close),
            '<' => Self::new(BracketKind::Angle, Side::Open),
            '>' => Self::new(BracketKind::Angle, Side::Close),
            '{' => Self::new(BracketKind::Curly, Side::Open),
            '}' => Self::new(BracketKind::Curly, Side::Close),
            '(' => Self::new(BracketKind::Round, Side::Open),
            ')' => Self::new(BracketKind::Round, Side::Close),
            _ => return None,
        };
        Some(token)
    }

    /// Whether this is an opening bracket.
    #[must_use]
    pub const fn is_opening(self) -> bool {
        matches!(self.side, Side::Open)
    }

    /// Whether this token closes `open`: same kind, opposite side.
    #[must_use]
    pub fn closes(self, open: Self) -> bool {
        self.kind == open.kind && self.side == Side::Close && open.side == Side::Open
    }

    /// The glyph this token was classified from.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self.side {
            Side::Open => self.kind.open_char(),
            Side::Close => self.kind.close_char(),
        }
    }
}

impl fmt::Display for BracketToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Classify every character of `input`.
///
/// # Errors
///
/// Returns an error on the first character that is not a bracket.
pub fn tokenize(input: &str) -> Result<Vec<BracketToken>, ValidationError> {
    input
        .char_indices()
        .map(|(offset, c)| {
            BracketToken::from_char(c)
                .ok_or_else(|| ValidationError::invalid_character(input, offset, c))
        })
        .collect()
}
