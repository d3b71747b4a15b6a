use std::f32::consts::PI;

use crate::error::{check_non_negative, ShapeError};
use crate::geometry::{Aabb, MassProperties};
use crate::math::{Quat, Transform, Vec3};

use super::{CollisionShape, ConvexShape, Shape, ShapeType};

/// A sphere collision shape.
///
/// The whole sphere is margin: its core is the single point at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    radius: f32,
}

impl Sphere {
    /// Creates a new sphere with the given radius
    pub fn new(radius: f32) -> Result<Self, ShapeError> {
        let radius = check_non_negative(radius, ShapeError::InvalidRadius)?;
        Ok(Self { radius })
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl CollisionShape for Sphere {
    #[inline]
    fn shape_type(&self) -> ShapeType {
        ShapeType::Sphere
    }

    #[inline]
    fn margin(&self) -> f32 {
        self.radius
    }

    #[inline]
    fn local_aabb(&self) -> Aabb {
        Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(self.radius))
    }

    #[inline]
    fn aabb(&self, transform: Transform) -> Aabb {
        Aabb::from_center_half_extents(
            transform.position,
            Vec3::splat(self.radius * transform.scale),
        )
    }

    fn rotated(&self, _rotation: Quat) -> Shape {
        Shape::Sphere(*self)
    }

    #[inline]
    fn volume(&self) -> f32 {
        (4.0 / 3.0) * PI * self.radius * self.radius * self.radius
    }

    fn unit_mass_properties(&self) -> MassProperties {
        let r = self.radius;
        let mass = self.volume();
        let i = (2.0 / 5.0) * mass * r * r;
        MassProperties::new(mass, Vec3::splat(i))
    }
}

impl ConvexShape for Sphere {
    #[inline]
    fn local_support_without_margin(&self, _direction: Vec3) -> Vec3 {
        Vec3::ZERO
    }
}
