use std::f32::consts::PI;

use crate::error::{check_non_negative, ShapeError};
use crate::geometry::{Aabb, MassProperties};
use crate::math::{Quat, Transform, Vec3};

use super::{rotate_axial, CollisionShape, ConvexShape, Shape, ShapeType};

/// A capsule collision shape (cylinder with hemispherical caps), oriented
/// along the local Y axis.
///
/// Like a sphere, the radius is the margin; the core is the center segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    radius: f32,
    half_height: f32,
}

impl Capsule {
    /// Creates a new capsule with the given radius and half-height of the
    /// cylindrical segment (total height = 2 * half_height + 2 * radius)
    pub fn new(radius: f32, half_height: f32) -> Result<Self, ShapeError> {
        Ok(Self {
            radius: check_non_negative(radius, ShapeError::InvalidRadius)?,
            half_height: check_non_negative(half_height, ShapeError::InvalidHalfHeight)?,
        })
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        self.half_height
    }

    /// Returns the total height of the capsule (including caps)
    #[inline]
    pub fn total_height(&self) -> f32 {
        2.0 * self.half_height + 2.0 * self.radius
    }

    /// Returns the two endpoints of the capsule's center line
    #[inline]
    pub fn segment(&self) -> (Vec3, Vec3) {
        (
            Vec3::new(0.0, -self.half_height, 0.0),
            Vec3::new(0.0, self.half_height, 0.0),
        )
    }
}

impl CollisionShape for Capsule {
    #[inline]
    fn shape_type(&self) -> ShapeType {
        ShapeType::Capsule
    }

    #[inline]
    fn margin(&self) -> f32 {
        self.radius
    }

    #[inline]
    fn local_aabb(&self) -> Aabb {
        let r = self.radius;
        let h = self.half_height + r;
        Aabb::new(Vec3::new(-r, -h, -r), Vec3::new(r, h, r))
    }

    fn aabb(&self, transform: Transform) -> Aabb {
        // Bound the two cap centers, then grow by the radius.
        let axis = transform.transform_vector(Vec3::Y) * (self.half_height * transform.scale);
        let half_extents = axis.abs() + Vec3::splat(self.radius * transform.scale);
        Aabb::from_center_half_extents(transform.position, half_extents)
    }

    fn rotated(&self, rotation: Quat) -> Shape {
        rotate_axial(Shape::Capsule(*self), rotation)
    }

    #[inline]
    fn volume(&self) -> f32 {
        let r = self.radius;
        let h = self.half_height * 2.0;
        PI * r * r * h + (4.0 / 3.0) * PI * r * r * r
    }

    fn unit_mass_properties(&self) -> MassProperties {
        let r = self.radius;
        let h = self.half_height * 2.0; // Full cylinder height

        let cylinder_mass = PI * r * r * h;
        let sphere_mass = (4.0 / 3.0) * PI * r * r * r;
        let mass = cylinder_mass + sphere_mass;

        // Cylinder inertia (aligned along Y)
        let i_cyl_y = 0.5 * cylinder_mass * r * r;
        let i_cyl_xz = (1.0 / 12.0) * cylinder_mass * (3.0 * r * r + h * h);

        // Caps approximated as a sphere shifted to the segment ends
        let i_sphere = (2.0 / 5.0) * sphere_mass * r * r;
        let i_sphere_offset = i_sphere + sphere_mass * self.half_height * self.half_height;

        let i_y = i_cyl_y + i_sphere;
        let i_xz = i_cyl_xz + i_sphere_offset;

        MassProperties::new(mass, Vec3::new(i_xz, i_y, i_xz))
    }
}

impl ConvexShape for Capsule {
    #[inline]
    fn local_support_without_margin(&self, direction: Vec3) -> Vec3 {
        if direction.y >= 0.0 {
            Vec3::new(0.0, self.half_height, 0.0)
        } else {
            Vec3::new(0.0, -self.half_height, 0.0)
        }
    }
}
