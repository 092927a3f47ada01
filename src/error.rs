use thiserror::Error;

/// Errors reported by [`QuadTree`](crate::QuadTree) operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadTreeError {
    /// The point lies outside the half-open domain of the tree.
    #[error("Point ({x}, {y}) lies outside the tree domain")]
    OutOfBounds { x: f64, y: f64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, QuadTreeError>;
