use thiserror::Error;

use crate::math::{Quat, Vec3};

/// Error type for shape construction, mutation and configuration.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// Half-extents with a negative or non-finite component.
    #[error("half-extents must be finite and non-negative, got {0}")]
    InvalidExtents(Vec3),
    /// Negative or non-finite radius.
    #[error("radius must be finite and non-negative, got {0}")]
    InvalidRadius(f32),
    /// Negative or non-finite half-height.
    #[error("half-height must be finite and non-negative, got {0}")]
    InvalidHalfHeight(f32),
    /// Negative or non-finite collision margin.
    #[error("margin must be finite and non-negative, got {0}")]
    InvalidMargin(f32),
    /// The margin is larger than the extents it is carved out of.
    #[error("margin {margin} exceeds half-extents {half_extents}")]
    MarginExceedsExtents {
        /// Outer half-extents the margin was applied to.
        half_extents: Vec3,
        /// Rejected margin.
        margin: f32,
    },
    /// Convex hull with no points.
    #[error("convex hull needs at least one point")]
    EmptyConvexHull,
    /// Convex hull larger than the configured limit.
    #[error("convex hull has {count} points, limit is {limit}")]
    TooManyHullPoints {
        /// Number of points supplied.
        count: usize,
        /// Configured maximum.
        limit: usize,
    },
    /// Convex hull point with a non-finite component.
    #[error("convex hull point {index} is not finite: {point}")]
    InvalidHullPoint {
        /// Index of the offending point.
        index: usize,
        /// The point itself.
        point: Vec3,
    },
    /// Compound shape with no children.
    #[error("compound shape needs at least one child")]
    EmptyCompound,
    /// Negative or non-finite density.
    #[error("density must be finite and non-negative, got {0}")]
    InvalidDensity(f32),
    /// Zero, negative or non-finite scale.
    #[error("scale must be finite and positive, got {0}")]
    InvalidScale(f32),
    /// Position with a non-finite component.
    #[error("position must be finite, got {0}")]
    InvalidPosition(Vec3),
    /// Rotation that is not finite or has (near) zero length.
    #[error("rotation must be a finite, non-zero quaternion, got {0}")]
    InvalidRotation(Quat),
    /// Convex hull point limit of zero.
    #[error("convex hull point limit must be at least 1")]
    InvalidHullLimit,
    /// Configuration or description could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
    /// Configuration file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Validates a scalar dimension, mapping failures through `err`.
pub(crate) fn check_non_negative(
    value: f32,
    err: fn(f32) -> ShapeError,
) -> Result<f32, ShapeError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(err(value))
    }
}
