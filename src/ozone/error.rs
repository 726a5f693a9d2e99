//! Error types for loading, configuring and stepping ozone grids.

#[derive(Debug, thiserror::Error)]
pub enum OzoneError {
    #[error("malformed input at token {index}: expected {expected}, found {token:?}")]
    Malformed {
        index: usize,
        token: String,
        expected: &'static str,
    },

    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("hole ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfRange {
        row: i64,
        col: i64,
        rows: usize,
        cols: usize,
    },

    #[error("grid shape mismatch: {}x{} vs {}x{}", left.0, left.1, right.0, right.1)]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OzoneError>;
