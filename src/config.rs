//! Settings shared by the parser and the expander.

/// Parse and expansion settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Reject `name = value` statements instead of skipping them.
    pub strict: bool,
    /// Joiner used when resolving the all-prerequisites variable.
    pub separator: String,
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn separator(mut self, separator: &str) -> Self {
        self.separator = separator.to_string();
        self
    }
}
