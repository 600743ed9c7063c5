use thiserror::Error;

/// Errors raised while parsing model values from their string forms.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    /// The path does not name any screen.
    #[error("unknown screen: {0}")]
    UnknownScreen(String),

    /// The string does not name a role.
    #[error("unknown role: {0}")]
    UnknownRole(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
