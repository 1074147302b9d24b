use std::fmt::Display;

use serde::de;
use thiserror::Error;

/// Errors produced while building or decoding a [`Shape`](crate::Shape).
///
/// Every variant is the result of bad input or configuration; none of them
/// leave a partially built tree behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A value (or key) contains an invalid percent-escape sequence,
    /// or decodes to bytes that are not valid UTF-8.
    ///
    /// `position` is always a byte offset into the encoded input: into the
    /// querystring for keys read by [`tokenize`](crate::tokenize), and into
    /// the raw value otherwise.
    #[error("malformed encoding at position {position}: {message}")]
    MalformedEncoding { position: usize, message: String },

    /// A key re-uses a leaf as a nested dictionary, or redefines a leaf
    /// with a different value.
    #[error("conflicting path: {0}")]
    ConflictingPath(String),

    /// The decoding options cannot be interpreted.
    #[error("unrecognized strategy: {0}")]
    UnrecognizedStrategy(String),

    /// Raised while projecting a shape onto a typed value.
    #[error("{0}")]
    Custom(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn malformed<T>(message: T, position: usize) -> Self
    where
        T: Display,
    {
        Error::MalformedEncoding {
            position,
            message: message.to_string(),
        }
    }

    /// Shifts the position of a `MalformedEncoding` error by `offset` bytes
    /// and prefixes its message with `context`.
    pub(crate) fn within(self, offset: usize, context: &str) -> Self {
        match self {
            Error::MalformedEncoding { position, message } => Error::MalformedEncoding {
                position: position + offset,
                message: format!("{context}: {message}"),
            },
            other => other,
        }
    }

    pub(crate) fn conflict<T>(message: T) -> Self
    where
        T: Display,
    {
        Error::ConflictingPath(message.to_string())
    }
}

impl de::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: Display,
    {
        Error::Custom(msg.to_string())
    }
}
