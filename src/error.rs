use thiserror::Error;

/// Result type alias for region operations
pub type Result<T> = std::result::Result<T, RegionError>;

/// Errors that can occur when enumerating points inside a region
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegionError {
    #[error("grid size must be a finite value greater than zero, got {0}")]
    InvalidGridSize(f64),

    #[error("grid size {0} is too small to step across the region's coordinates")]
    GridSizeTooSmall(f64),
}
