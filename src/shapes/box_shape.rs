use crate::error::ShapeError;
use crate::geometry::{Aabb, MassProperties};
use crate::math::{abs_rotation, is_non_negative, select_by_sign, Quat, Vec3};

use super::{CollisionShape, ConvexShape, Shape, ShapeType};

/// A box (cuboid) collision shape.
///
/// The box is stored as its core half-extents plus a collision margin. The
/// outer surface a backend collides against sits `margin` beyond the core on
/// every axis. Both the core half-extents and the margin are always finite
/// and non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    half_extents: Vec3,
    margin: f32,
}

impl BoxShape {
    /// Creates a box with the given half-extents and no margin
    pub fn new(half_extents: Vec3) -> Result<Self, ShapeError> {
        if !is_non_negative(half_extents) {
            return Err(ShapeError::InvalidExtents(half_extents));
        }
        Ok(Self {
            half_extents,
            margin: 0.0,
        })
    }

    /// Creates a box whose outer half-extents already include `margin`.
    ///
    /// The core is shrunk by the margin so the outer surface stays where the
    /// caller put it. Fails when the margin is larger than any extent.
    pub fn with_margin(half_extents: Vec3, margin: f32) -> Result<Self, ShapeError> {
        if !margin.is_finite() || margin < 0.0 {
            return Err(ShapeError::InvalidMargin(margin));
        }
        if !is_non_negative(half_extents) {
            return Err(ShapeError::InvalidExtents(half_extents));
        }
        let core = half_extents - Vec3::splat(margin);
        if core.min_element() < 0.0 {
            return Err(ShapeError::MarginExceedsExtents {
                half_extents,
                margin,
            });
        }
        Ok(Self {
            half_extents: core,
            margin,
        })
    }

    /// Creates a box from full size dimensions
    pub fn from_size(size: Vec3) -> Result<Self, ShapeError> {
        Self::new(size * 0.5)
    }

    /// Half-extents of the core box, margin excluded
    #[inline]
    pub fn half_extents_without_margin(&self) -> Vec3 {
        self.half_extents
    }

    /// Half-extents of the outer box, margin included
    #[inline]
    pub fn half_extents_with_margin(&self) -> Vec3 {
        self.half_extents + Vec3::splat(self.margin)
    }

    /// Changes the margin while keeping the outer half-extents fixed.
    ///
    /// On error the box is left untouched.
    pub fn set_margin(&mut self, margin: f32) -> Result<(), ShapeError> {
        *self = Self::with_margin(self.half_extents_with_margin(), margin)?;
        Ok(())
    }

    /// Returns the full outer size of the box
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.half_extents_with_margin() * 2.0
    }

    /// Returns the 8 vertices of the core box in local space
    pub fn vertices(&self) -> [Vec3; 8] {
        Aabb::from_center_half_extents(Vec3::ZERO, self.half_extents).corners()
    }

    /// Returns true if `point` (local space) lies inside the outer box
    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.abs().cmple(self.half_extents_with_margin()).all()
    }
}

impl CollisionShape for BoxShape {
    #[inline]
    fn shape_type(&self) -> ShapeType {
        ShapeType::Box
    }

    #[inline]
    fn margin(&self) -> f32 {
        self.margin
    }

    #[inline]
    fn local_aabb(&self) -> Aabb {
        Aabb::from_center_half_extents(Vec3::ZERO, self.half_extents_with_margin())
    }

    /// Right-angle rotations permute the half-extents exactly; any other
    /// rotation yields the axis-aligned box enclosing the rotated core.
    fn rotated(&self, rotation: Quat) -> Shape {
        Shape::Box(Self {
            half_extents: abs_rotation(rotation) * self.half_extents,
            margin: self.margin,
        })
    }

    #[inline]
    fn volume(&self) -> f32 {
        let size = self.size();
        size.x * size.y * size.z
    }

    fn unit_mass_properties(&self) -> MassProperties {
        let size = self.size();
        let mass = self.volume();

        let x2 = size.x * size.x;
        let y2 = size.y * size.y;
        let z2 = size.z * size.z;

        let i = Vec3::new(
            (1.0 / 12.0) * mass * (y2 + z2),
            (1.0 / 12.0) * mass * (x2 + z2),
            (1.0 / 12.0) * mass * (x2 + y2),
        );

        MassProperties::new(mass, i)
    }
}

impl ConvexShape for BoxShape {
    #[inline]
    fn local_support_without_margin(&self, direction: Vec3) -> Vec3 {
        select_by_sign(direction, self.half_extents)
    }
}
