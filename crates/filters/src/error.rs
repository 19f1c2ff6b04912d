use thiserror::Error;

/// Error produced when a mask cannot be compiled into a matcher.
#[derive(Debug, Error)]
#[error("failed to compile name mask '{pattern}': {source}")]
pub struct FilterError {
    pattern: String,
    #[source]
    source: regex::Error,
}

impl FilterError {
    /// Creates a new [`FilterError`] for the given pattern and source error.
    pub(crate) fn new(pattern: String, source: regex::Error) -> Self {
        Self { pattern, source }
    }

    /// Returns the offending pattern as supplied by the caller.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}
