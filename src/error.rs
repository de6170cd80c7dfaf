use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KDIndexError {
    /// A nearest-neighbor query was made against a tree holding no points.
    #[error("Nearest-neighbor query on an empty tree.")]
    EmptyTree,

    /// A coordinate buffer did not hold a whole number of points.
    #[error("Expected a multiple of {expected} coordinates, got {found}.")]
    DimensionMismatch { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, KDIndexError>;
