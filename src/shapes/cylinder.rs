use std::f32::consts::PI;

use crate::error::{check_non_negative, ShapeError};
use crate::geometry::{Aabb, MassProperties};
use crate::math::{Quat, Transform, Vec3};

use super::{rotate_axial, CollisionShape, ConvexShape, Shape, ShapeType};

/// A solid cylinder oriented along the local Y axis.
///
/// Stored the same way as [`BoxShape`](super::BoxShape): core radius and
/// half-height, plus a margin around them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    radius: f32,
    half_height: f32,
    margin: f32,
}

impl Cylinder {
    /// Creates a cylinder with no margin
    pub fn new(radius: f32, half_height: f32) -> Result<Self, ShapeError> {
        Ok(Self {
            radius: check_non_negative(radius, ShapeError::InvalidRadius)?,
            half_height: check_non_negative(half_height, ShapeError::InvalidHalfHeight)?,
            margin: 0.0,
        })
    }

    /// Creates a cylinder whose outer radius and half-height include `margin`
    pub fn with_margin(radius: f32, half_height: f32, margin: f32) -> Result<Self, ShapeError> {
        let margin = check_non_negative(margin, ShapeError::InvalidMargin)?;
        let outer = Self::new(radius, half_height)?;
        if radius < margin || half_height < margin {
            return Err(ShapeError::MarginExceedsExtents {
                half_extents: Vec3::new(radius, half_height, radius),
                margin,
            });
        }
        Ok(Self {
            radius: outer.radius - margin,
            half_height: outer.half_height - margin,
            margin,
        })
    }

    /// Core radius, margin excluded
    #[inline]
    pub fn radius_without_margin(&self) -> f32 {
        self.radius
    }

    /// Core half-height, margin excluded
    #[inline]
    pub fn half_height_without_margin(&self) -> f32 {
        self.half_height
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius + self.margin
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        self.half_height + self.margin
    }

    /// Changes the margin while keeping the outer dimensions fixed
    pub fn set_margin(&mut self, margin: f32) -> Result<(), ShapeError> {
        *self = Self::with_margin(self.radius(), self.half_height(), margin)?;
        Ok(())
    }
}

impl CollisionShape for Cylinder {
    #[inline]
    fn shape_type(&self) -> ShapeType {
        ShapeType::Cylinder
    }

    #[inline]
    fn margin(&self) -> f32 {
        self.margin
    }

    #[inline]
    fn local_aabb(&self) -> Aabb {
        let r = self.radius();
        Aabb::from_center_half_extents(Vec3::ZERO, Vec3::new(r, self.half_height(), r))
    }

    fn aabb(&self, transform: Transform) -> Aabb {
        // Per world axis: the axis segment contributes |a_i| * h, the cap disc
        // contributes r * sqrt(1 - a_i^2).
        let s = transform.scale;
        let axis = transform.transform_vector(Vec3::Y).abs();
        let disc = (Vec3::ONE - axis * axis).max(Vec3::ZERO);
        let disc = Vec3::new(disc.x.sqrt(), disc.y.sqrt(), disc.z.sqrt());
        let half_extents = (axis * self.half_height + disc * self.radius + Vec3::splat(self.margin)) * s;
        Aabb::from_center_half_extents(transform.position, half_extents)
    }

    fn rotated(&self, rotation: Quat) -> Shape {
        rotate_axial(Shape::Cylinder(*self), rotation)
    }

    #[inline]
    fn volume(&self) -> f32 {
        let r = self.radius();
        PI * r * r * 2.0 * self.half_height()
    }

    fn unit_mass_properties(&self) -> MassProperties {
        let r = self.radius();
        let h = self.half_height();
        let mass = self.volume();

        let i_y = 0.5 * mass * r * r;
        let i_xz = (1.0 / 12.0) * mass * (3.0 * r * r + 4.0 * h * h);

        MassProperties::new(mass, Vec3::new(i_xz, i_y, i_xz))
    }
}

impl ConvexShape for Cylinder {
    fn local_support_without_margin(&self, direction: Vec3) -> Vec3 {
        let y = if direction.y >= 0.0 {
            self.half_height
        } else {
            -self.half_height
        };
        let radial = (direction.x * direction.x + direction.z * direction.z).sqrt();
        if radial > 0.0 {
            let k = self.radius / radial;
            Vec3::new(direction.x * k, y, direction.z * k)
        } else {
            Vec3::new(self.radius, y, 0.0)
        }
    }
}
