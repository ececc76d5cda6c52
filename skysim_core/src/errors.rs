// skysim_core/src/errors.rs

use thiserror::Error;

/// Errors raised by camera model construction and the projection pipeline.
/// Malformed configuration fails here, at construction time, instead of
/// producing silent garbage measurements later.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("horizontal field of view must be in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f64),

    #[error("resolution must be non-zero in both dimensions, got {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("derived focal length must be positive, got {0}")]
    InvalidFocalLength(f64),

    #[error(
        "point {index} has non-positive camera-frame depth {depth}; \
         it lies behind or on the image plane and cannot be projected"
    )]
    NonPositiveDepth { index: usize, depth: f64 },
}
