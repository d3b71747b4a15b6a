use serde::{Deserialize, Serialize};

use crate::math::{Transform, Vec3};

/// An axis-aligned bounding box defined by minimum and maximum points.
///
/// Every collision shape reports its bounds as an `Aabb`, either in its own
/// local frame or placed in the world by a [`Transform`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner (smallest x, y, z values)
    pub min: Vec3,
    /// Maximum corner (largest x, y, z values)
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb {
    /// An empty AABB that contains no points
    pub const EMPTY: Self = Self {
        min: Vec3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
        max: Vec3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
    };

    /// Creates an AABB from minimum and maximum points
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Creates an AABB from center and half-extents
    #[inline]
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Creates the smallest AABB containing all `points`
    #[inline]
    pub fn from_points(points: &[Vec3]) -> Self {
        points
            .iter()
            .fold(Self::EMPTY, |aabb, &point| aabb.expand_to_include(point))
    }

    /// Returns the center of the AABB
    #[inline]
    pub fn center(self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the half-extents (half the size in each dimension)
    #[inline]
    pub fn half_extents(self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Returns the full size of the AABB
    #[inline]
    pub fn size(self) -> Vec3 {
        self.max - self.min
    }

    /// Returns the volume of the AABB
    #[inline]
    pub fn volume(self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let size = self.size();
        size.x * size.y * size.z
    }

    /// Returns true if this AABB is empty
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Returns true if this AABB contains the given point (inclusive)
    #[inline]
    pub fn contains_point(self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Returns true if this AABB fully contains another AABB
    #[inline]
    pub fn contains_aabb(self, other: Self) -> bool {
        self.min.cmple(other.min).all() && self.max.cmpge(other.max).all()
    }

    /// Returns true if this AABB intersects another AABB
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    /// Returns a new AABB that is the union of this and another AABB
    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns a new AABB expanded to include a point
    #[inline]
    pub fn expand_to_include(self, point: Vec3) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// Returns a new AABB grown by `margin` in all directions
    #[inline]
    pub fn expand(self, margin: f32) -> Self {
        let m = Vec3::splat(margin);
        Self {
            min: self.min - m,
            max: self.max + m,
        }
    }

    /// Returns the AABB enclosing this box after placing it with `transform`.
    ///
    /// The center is transformed as a point; the half-extents go through the
    /// absolute rotation matrix and the scale.
    #[inline]
    pub fn transformed(self, transform: Transform) -> Self {
        if self.is_empty() {
            return self;
        }
        let center = transform.transform_point(self.center());
        let half_extents = transform.abs_rotation_matrix() * (self.half_extents() * transform.scale);
        Self::from_center_half_extents(center, half_extents)
    }

    /// Returns the 8 corners of the AABB
    #[inline]
    pub fn corners(self) -> [Vec3; 8] {
        [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Quat;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::PI;

    #[test]
    fn test_creation() {
        let aabb = Aabb::new(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.center(), Vec3::ZERO);
        assert_eq!(aabb.half_extents(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_from_center_half_extents() {
        let aabb = Aabb::from_center_half_extents(Vec3::new(1.0, 2.0, 3.0), Vec3::ONE);
        assert_eq!(aabb.min, Vec3::new(0.0, 1.0, 2.0));
        assert_eq!(aabb.max, Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_contains_point() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(aabb.contains_point(Vec3::new(0.5, 0.5, 0.5)));
        assert!(aabb.contains_point(Vec3::ZERO));
        assert!(aabb.contains_point(Vec3::ONE));
        assert!(!aabb.contains_point(Vec3::new(2.0, 0.5, 0.5)));
    }

    #[test]
    fn test_intersects() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::splat(0.5), Vec3::splat(1.5));
        let c = Aabb::new(Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 1.0, 1.0));

        assert!(a.intersects(b));
        assert!(b.intersects(a));
        assert!(!a.intersects(c));
    }

    #[test]
    fn test_union_and_expand() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::splat(2.0), Vec3::splat(3.0));
        let u = a.union(b);

        assert_eq!(u.min, Vec3::ZERO);
        assert_eq!(u.max, Vec3::splat(3.0));
        assert!(u.contains_aabb(a));

        let expanded = a.expand(0.5);
        assert_eq!(expanded.min, Vec3::splat(-0.5));
        assert_eq!(expanded.max, Vec3::splat(1.5));
    }

    #[test]
    fn test_from_points() {
        let points = [
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-1.0, 0.0, 5.0),
            Vec3::new(0.0, -2.0, 1.0),
        ];
        let aabb = Aabb::from_points(&points);

        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 1.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 2.0, 5.0));
        assert!(Aabb::from_points(&[]).is_empty());
        assert_eq!(Aabb::EMPTY.volume(), 0.0);
    }

    #[test]
    fn test_transformed_quarter_turn() {
        let aabb = Aabb::new(Vec3::new(0.0, -1.0, -1.0), Vec3::new(4.0, 1.0, 1.0));
        let t = Transform::new(Vec3::new(10.0, 0.0, 0.0), Quat::from_axis_angle(Vec3::Z, PI / 2.0));

        // Center (2, 0, 0) rotates onto +Y; the long X extent becomes Y.
        let world = aabb.transformed(t);
        assert_abs_diff_eq!(world.center(), Vec3::new(10.0, 2.0, 0.0), epsilon = 1e-5);
        assert_abs_diff_eq!(world.half_extents(), Vec3::new(1.0, 2.0, 1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_transformed_encloses_rotated_corners() {
        let aabb = Aabb::new(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0));
        let t = Transform::new(
            Vec3::new(0.5, -1.0, 2.0),
            Quat::from_axis_angle(Vec3::new(1.0, 2.0, 0.5).normalize(), 0.7),
        )
        .with_scale(1.5)
        .unwrap();

        let world = aabb.transformed(t).expand(1e-4);
        for corner in aabb.corners() {
            assert!(world.contains_point(t.transform_point(corner)));
        }
    }
}
