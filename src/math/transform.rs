use serde::{Deserialize, Serialize};

use super::consts::EPSILON;
use super::{Mat3, Quat, Vec3};
use crate::error::ShapeError;

/// Places a collision shape in the world: translation, rotation and a
/// uniform scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    /// Position (translation)
    pub position: Vec3,
    /// Rotation (unit quaternion)
    pub rotation: Quat,
    /// Uniform scale, always > 0
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Identity transform (no translation, rotation or scaling)
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: 1.0,
    };

    /// Creates a new unscaled transform from position and rotation
    #[inline]
    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            scale: 1.0,
        }
    }

    /// Creates a transform with only translation
    #[inline]
    pub const fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Creates a transform with only rotation
    #[inline]
    pub const fn from_rotation(rotation: Quat) -> Self {
        Self::new(Vec3::ZERO, rotation)
    }

    /// Returns a copy of this transform with the given uniform scale.
    pub fn with_scale(self, scale: f32) -> Result<Self, ShapeError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ShapeError::InvalidScale(scale));
        }
        Ok(Self { scale, ..self })
    }

    /// Checks every field and returns the transform with a unit rotation.
    pub fn validated(self) -> Result<Self, ShapeError> {
        if !self.position.is_finite() {
            return Err(ShapeError::InvalidPosition(self.position));
        }
        let length = self.rotation.length();
        if !self.rotation.is_finite() || length <= EPSILON {
            return Err(ShapeError::InvalidRotation(self.rotation));
        }
        Self {
            rotation: self.rotation / length,
            ..self
        }
        .with_scale(self.scale)
    }

    /// Returns the rotation as a 3x3 matrix
    #[inline]
    pub fn rotation_matrix(self) -> Mat3 {
        Mat3::from_quat(self.rotation)
    }

    /// Rotation matrix with every entry replaced by its absolute value.
    ///
    /// Multiplying local half-extents by this matrix yields the half-extents
    /// of the world-space box enclosing the rotated local box.
    #[inline]
    pub fn abs_rotation_matrix(self) -> Mat3 {
        abs_rotation(self.rotation)
    }

    /// Transforms a point from local space to world space
    #[inline]
    pub fn transform_point(self, point: Vec3) -> Vec3 {
        self.rotation * (point * self.scale) + self.position
    }

    /// Transforms a direction from local space to world space.
    /// Directions ignore translation and scale.
    #[inline]
    pub fn transform_vector(self, vector: Vec3) -> Vec3 {
        self.rotation * vector
    }

    /// Inverse transforms a point from world space to local space
    #[inline]
    pub fn inverse_transform_point(self, point: Vec3) -> Vec3 {
        (self.rotation.inverse() * (point - self.position)) / self.scale
    }

    /// Inverse transforms a direction from world space to local space
    #[inline]
    pub fn inverse_transform_vector(self, vector: Vec3) -> Vec3 {
        self.rotation.inverse() * vector
    }

    /// Combines two transforms: `self * other`.
    ///
    /// The result maps `other`'s local space through `self` into world space.
    #[inline]
    pub fn compose(self, other: Self) -> Self {
        Self {
            position: self.transform_point(other.position),
            rotation: (self.rotation * other.rotation).normalize(),
            scale: self.scale * other.scale,
        }
    }

    /// Returns true if this transform is approximately equal to another
    #[inline]
    pub fn approx_eq(self, other: Self, epsilon: f32) -> bool {
        self.position.distance_squared(other.position) < epsilon * epsilon
            && self.rotation.dot(other.rotation).abs() > 1.0 - epsilon
            && (self.scale - other.scale).abs() < epsilon
    }
}

/// Absolute-value rotation matrix of `rotation`.
#[inline]
pub fn abs_rotation(rotation: Quat) -> Mat3 {
    let rot = Mat3::from_quat(rotation);
    Mat3::from_cols(rot.x_axis.abs(), rot.y_axis.abs(), rot.z_axis.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::PI;

    #[test]
    fn test_identity() {
        let t = Transform::IDENTITY;
        let p = Vec3::new(1.0, 2.0, 3.0);

        assert_abs_diff_eq!(t.transform_point(p), p, epsilon = 1e-6);
        assert_abs_diff_eq!(t.transform_vector(p), p, epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_then_translation() {
        let t = Transform::new(Vec3::X, Quat::from_axis_angle(Vec3::Z, PI / 2.0));

        // X -> Y, then shifted by (1, 0, 0)
        assert_abs_diff_eq!(t.transform_point(Vec3::X), Vec3::new(1.0, 1.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_scale_affects_points_not_vectors() {
        let t = Transform::from_position(Vec3::Y).with_scale(2.0).unwrap();
        let p = Vec3::new(1.0, 1.0, 1.0);

        assert_abs_diff_eq!(t.transform_point(p), Vec3::new(2.0, 3.0, 2.0), epsilon = 1e-6);
        assert_abs_diff_eq!(t.transform_vector(p), p, epsilon = 1e-6);
    }

    #[test]
    fn test_inverse_point_round_trip() {
        let t = Transform::new(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_axis_angle(Vec3::new(1.0, 1.0, 1.0).normalize(), PI / 4.0),
        )
        .with_scale(0.5)
        .unwrap();

        let p = Vec3::new(4.0, 5.0, 6.0);
        let back = t.inverse_transform_point(t.transform_point(p));
        assert_abs_diff_eq!(back, p, epsilon = 1e-4);
    }

    #[test]
    fn test_compose() {
        let t1 = Transform::from_position(Vec3::X);
        let t2 = Transform::from_rotation(Quat::from_axis_angle(Vec3::Z, PI / 2.0));

        let composed = t1.compose(t2);
        assert_abs_diff_eq!(composed.transform_point(Vec3::X), Vec3::new(1.0, 1.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_rejects_bad_scale() {
        assert!(matches!(
            Transform::IDENTITY.with_scale(0.0),
            Err(ShapeError::InvalidScale(_))
        ));
        assert!(Transform::IDENTITY.with_scale(f32::NAN).is_err());
        assert!(Transform::IDENTITY.with_scale(-1.0).is_err());
    }

    #[test]
    fn test_validated_normalizes_rotation() {
        let t = Transform::from_rotation(Quat::from_xyzw(0.0, 0.0, 0.0, 2.0))
            .validated()
            .unwrap();
        assert_eq!(t.rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_validated_rejects_degenerate_fields() {
        let zero = Transform::from_rotation(Quat::from_xyzw(0.0, 0.0, 0.0, 0.0));
        assert!(matches!(zero.validated(), Err(ShapeError::InvalidRotation(_))));

        let nan = Transform::from_rotation(Quat::from_xyzw(f32::NAN, 0.0, 0.0, 1.0));
        assert!(matches!(nan.validated(), Err(ShapeError::InvalidRotation(_))));

        let far = Transform::from_position(Vec3::new(f32::INFINITY, 0.0, 0.0));
        assert!(matches!(far.validated(), Err(ShapeError::InvalidPosition(_))));

        let flipped = Transform {
            scale: -1.0,
            ..Transform::IDENTITY
        };
        assert!(matches!(flipped.validated(), Err(ShapeError::InvalidScale(_))));
    }

    #[test]
    fn test_abs_rotation_quarter_turn_permutes_axes() {
        let m = abs_rotation(Quat::from_axis_angle(Vec3::Y, PI / 2.0));
        assert_abs_diff_eq!(m * Vec3::new(1.0, 2.0, 3.0), Vec3::new(3.0, 2.0, 1.0), epsilon = 1e-5);
    }
}
