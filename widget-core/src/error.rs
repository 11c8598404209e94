use thiserror::Error;

/// Errors shown to the user by the widget.
///
/// Neither kind is recoverable in place; the user has to submit again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Empty or whitespace-only query, rejected before any lookup.
    #[error("{}", self.message())]
    Validation,

    /// The provider failed, for whatever reason.
    #[error("{}", self.message())]
    Lookup,
}

impl SearchError {
    pub fn message(&self) -> &'static str {
        match self {
            SearchError::Validation => "Please enter a valid location.",
            SearchError::Lookup => "City not found. Please try again.",
        }
    }
}
