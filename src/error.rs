//! Error types carried by failed navigation, parsing and decoding.

use thiserror::Error;

pub use crate::core::tokenizer::ParseError;

/// Error held by an `Accessor` in its error state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XmlError {
    /// A path step could not be resolved
    #[error("access error: {description}")]
    Access { description: String },

    /// The document could not be read
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The input bytes could not be converted to UTF-8
    #[error("encoding error: {0}")]
    Encoding(String),
}

/// Convenience type alias for Results in this crate.
pub type Result<T> = std::result::Result<T, XmlError>;

impl XmlError {
    pub fn access(description: impl Into<String>) -> Self {
        XmlError::Access {
            description: description.into(),
        }
    }

    /// Description of a failed path step, if this is one
    pub fn description(&self) -> Option<&str> {
        match self {
            XmlError::Access { description } => Some(description),
            _ => None,
        }
    }
}
