//! Error types for the tttai crate

use thiserror::Error;

/// Main error type for the tttai crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("cell ({row}, {col}) is out of range (rows and columns must be 0-2)")]
    OutOfRange { row: usize, col: usize },

    #[error("state '{code}' is not a canonical cache entry")]
    NotFound { code: String },

    #[error("no scored cache entry for '{code}'; recompute desirability first")]
    IncompleteData { code: String },

    #[error("malformed cache data: {message}")]
    MalformedPersistence { message: String },

    #[error("board code must be {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("illegal move from '{from}' to '{to}': expected exactly one new {mark}")]
    IllegalMove {
        from: String,
        to: String,
        mark: char,
    },

    #[error("game is already over at '{code}'")]
    GameOver { code: String },

    #[error("no moves available from '{code}'")]
    NoMovesAvailable { code: String },

    #[error("invalid mark '{mark}' (expected 'O' or 'X')")]
    InvalidMark { mark: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
