use thiserror::Error;

/// Errors raised by grid, color and snapshot operations.
///
/// All of these are local and recoverable: the operation that produced one
/// leaves the grid untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("invalid grid size {size} (must be between 1 and {max})")]
    InvalidSize { size: usize, max: usize },

    #[error("cell ({row}, {col}) is outside a {size}x{size} grid")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    #[error("snapshot is {found}x{found} but the grid is {expected}x{expected}")]
    ShapeMismatch { expected: usize, found: usize },
}

/// Result type for grid operations
pub type GridResult<T> = Result<T, GridError>;

/// Errors that can occur while reading or writing user preferences
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize preferences: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors that can occur while exporting the canvas to an image file
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export: the canvas has no cells")]
    EmptyGrid,

    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),
}
