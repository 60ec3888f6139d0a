//! Error types for JSON parsing and serialization.

use thiserror::Error;

/// Errors that can occur while parsing or serializing JSON.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JsonError {
    /// The input text was not valid JSON (parsing path).
    /// `position` is the 0-based byte offset where the violation was detected.
    #[error("JSON syntax error at byte {position}: {message}")]
    Syntax { position: usize, message: String },

    /// A container was reached again while it was still being serialized.
    /// `depth` is the nesting depth at which the repeat visit happened.
    #[error("cyclic reference detected at depth {depth}")]
    CyclicReference { depth: usize },

    /// Nesting exceeded the configured maximum depth.
    #[error("maximum nesting depth of {limit} exceeded")]
    DepthLimit { limit: usize },
}

impl JsonError {
    pub(crate) fn syntax(position: usize, message: impl Into<String>) -> Self {
        JsonError::Syntax {
            position,
            message: message.into(),
        }
    }

    /// Byte offset of a syntax error, if this is one.
    pub fn position(&self) -> Option<usize> {
        match self {
            JsonError::Syntax { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Resolve a syntax error's byte offset to a 1-based `(line, column)` pair
    /// within `text`. Columns count characters, not bytes.
    pub fn line_col(&self, text: &str) -> Option<(usize, usize)> {
        let position = self.position()?.min(text.len());
        let mut line = 1;
        let mut col = 1;
        for (i, ch) in text.char_indices() {
            if i >= position {
                break;
            }
            if ch == '\n' {
                line += 1;
                col = 1;
            } else {
                col += 1;
            }
        }
        Some((line, col))
    }
}

/// Convenience alias used throughout jsonc-core.
pub type Result<T> = std::result::Result<T, JsonError>;
