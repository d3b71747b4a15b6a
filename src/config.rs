//! Shape construction settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{check_non_negative, ShapeError};

/// Margin most backends wrap around boxes, cylinders and hulls.
pub const DEFAULT_MARGIN: f32 = 0.04;

/// Settings applied by [`ShapeFactory`](crate::ShapeFactory) when a
/// description leaves a value out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    /// Margin used when a description does not give one
    pub default_margin: f32,
    /// Largest accepted convex hull point cloud
    pub convex_hull_max_points: usize,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            default_margin: DEFAULT_MARGIN,
            convex_hull_max_points: 4096,
        }
    }
}

impl ShapeConfig {
    /// Parses and validates a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ShapeError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ShapeError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Rejects a negative or non-finite margin and a zero hull point limit
    pub fn validate(&self) -> Result<(), ShapeError> {
        check_non_negative(self.default_margin, ShapeError::InvalidMargin)?;
        if self.convex_hull_max_points == 0 {
            return Err(ShapeError::InvalidHullLimit);
        }
        Ok(())
    }
}
