use serde::Deserialize;

/// How the validator treats characters that are not one of the eight brackets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum InvalidCharacters {
    /// Stop and return an error on the first unrecognized character (default).
    #[default]
    Reject,
    /// Ignore unrecognized characters.
    Skip,
}

/// Validation configuration options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// What to do with characters outside the bracket set.
    pub invalid_characters: InvalidCharacters,
    /// Ignore whitespace even when unrecognized characters are rejected.
    pub ignore_whitespace: bool,
}

impl Config {
    /// Whether `c` should be passed over without being classified.
    #[must_use]
    pub(crate) fn ignores(&self, c: char) -> bool {
        self.ignore_whitespace && c.is_whitespace()
    }
}
