//! Collision shapes.
//!
//! Every shape implements [`CollisionShape`]: bounds, margin, mass and
//! re-orientation. Convex shapes additionally implement [`ConvexShape`], the
//! support mapping a narrow phase would query. [`Shape`] is the closed set of
//! variants a physics backend attaches to bodies.

mod box_shape;
mod capsule;
mod compound;
mod convex_hull;
mod cylinder;
mod sphere;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ShapeError;
use crate::geometry::{Aabb, MassProperties};
use crate::math::{Quat, Transform, Vec3};

pub use box_shape::BoxShape;
pub use capsule::Capsule;
pub use compound::{Compound, CompoundChild};
pub use convex_hull::ConvexHull;
pub use cylinder::Cylinder;
pub use sphere::Sphere;

/// The type of collision shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeType {
    Sphere,
    Box,
    Capsule,
    Cylinder,
    ConvexHull,
    Compound,
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeType::Sphere => "sphere",
            ShapeType::Box => "box",
            ShapeType::Capsule => "capsule",
            ShapeType::Cylinder => "cylinder",
            ShapeType::ConvexHull => "convex_hull",
            ShapeType::Compound => "compound",
        };
        f.write_str(name)
    }
}

/// Queries shared by every collision shape.
pub trait CollisionShape {
    /// Returns the shape type
    fn shape_type(&self) -> ShapeType;

    /// Collision margin wrapped around the core geometry
    fn margin(&self) -> f32;

    /// Bounds in local space, margin included
    fn local_aabb(&self) -> Aabb;

    /// Bounds after placing the shape with `transform`
    fn aabb(&self, transform: Transform) -> Aabb {
        self.local_aabb().transformed(transform)
    }

    /// Returns an equivalent shape whose local frame is pre-rotated by `rotation`
    fn rotated(&self, rotation: Quat) -> Shape;

    /// Volume enclosed by the shape, margin included
    fn volume(&self) -> f32;

    /// Mass properties at density 1
    fn unit_mass_properties(&self) -> MassProperties;

    /// Computes mass properties (mass, center of mass, inertia tensor) given density
    fn mass_properties(&self, density: f32) -> Result<MassProperties, ShapeError> {
        if !density.is_finite() || density < 0.0 {
            return Err(ShapeError::InvalidDensity(density));
        }
        let unit = self.unit_mass_properties();
        Ok(MassProperties {
            mass: unit.mass * density,
            center_of_mass: unit.center_of_mass,
            inertia: unit.inertia * density,
        })
    }
}

/// Support mapping of a convex shape.
pub trait ConvexShape: CollisionShape {
    /// Farthest point of the core geometry (no margin) along `direction`
    fn local_support_without_margin(&self, direction: Vec3) -> Vec3;

    /// Farthest point along `direction` with the margin applied
    fn local_support(&self, direction: Vec3) -> Vec3 {
        self.local_support_without_margin(direction) + direction.normalize_or_zero() * self.margin()
    }

    /// Returns the support point in world space given a transform
    fn support_world(&self, transform: Transform, direction: Vec3) -> Vec3 {
        let local_dir = transform.inverse_transform_vector(direction);
        transform.transform_point(self.local_support(local_dir))
    }
}

/// A collision shape that can be attached to rigid bodies.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A sphere defined by its radius
    Sphere(Sphere),
    /// A box (cuboid) defined by half-extents
    Box(BoxShape),
    /// A Y-aligned capsule defined by radius and half-height
    Capsule(Capsule),
    /// A Y-aligned cylinder defined by radius and half-height
    Cylinder(Cylinder),
    /// The convex hull of a point cloud
    ConvexHull(ConvexHull),
    /// Several shapes placed relative to a common origin
    Compound(Compound),
}

impl Shape {
    /// Creates a sphere shape
    pub fn sphere(radius: f32) -> Result<Self, ShapeError> {
        Sphere::new(radius).map(Self::Sphere)
    }

    /// Creates a box shape from half-extents, without margin
    pub fn cuboid(half_extents: Vec3) -> Result<Self, ShapeError> {
        BoxShape::new(half_extents).map(Self::Box)
    }

    /// Creates a box shape from full dimensions
    pub fn cuboid_from_size(size: Vec3) -> Result<Self, ShapeError> {
        BoxShape::from_size(size).map(Self::Box)
    }

    /// Creates a capsule shape
    pub fn capsule(radius: f32, half_height: f32) -> Result<Self, ShapeError> {
        Capsule::new(radius, half_height).map(Self::Capsule)
    }

    /// Creates a cylinder shape, without margin
    pub fn cylinder(radius: f32, half_height: f32) -> Result<Self, ShapeError> {
        Cylinder::new(radius, half_height).map(Self::Cylinder)
    }

    /// Creates a convex hull shape, without margin
    pub fn convex_hull(points: Vec<Vec3>) -> Result<Self, ShapeError> {
        ConvexHull::new(points).map(Self::ConvexHull)
    }

    /// Creates a compound shape
    pub fn compound(children: Vec<CompoundChild>) -> Result<Self, ShapeError> {
        Compound::new(children).map(Self::Compound)
    }

    /// Returns the box view of this shape, if it is a box
    #[inline]
    pub fn as_box(&self) -> Option<&BoxShape> {
        match self {
            Shape::Box(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the support mapping of this shape, if it is convex
    pub fn as_convex(&self) -> Option<&dyn ConvexShape> {
        match self {
            Shape::Sphere(s) => Some(s),
            Shape::Box(b) => Some(b),
            Shape::Capsule(c) => Some(c),
            Shape::Cylinder(c) => Some(c),
            Shape::ConvexHull(h) => Some(h),
            Shape::Compound(_) => None,
        }
    }

    /// Returns true for every variant with a support mapping
    #[inline]
    pub fn is_convex(&self) -> bool {
        self.as_convex().is_some()
    }

    fn as_collision_shape(&self) -> &dyn CollisionShape {
        match self {
            Shape::Sphere(s) => s,
            Shape::Box(b) => b,
            Shape::Capsule(c) => c,
            Shape::Cylinder(c) => c,
            Shape::ConvexHull(h) => h,
            Shape::Compound(c) => c,
        }
    }
}

impl CollisionShape for Shape {
    #[inline]
    fn shape_type(&self) -> ShapeType {
        self.as_collision_shape().shape_type()
    }

    #[inline]
    fn margin(&self) -> f32 {
        self.as_collision_shape().margin()
    }

    #[inline]
    fn local_aabb(&self) -> Aabb {
        self.as_collision_shape().local_aabb()
    }

    #[inline]
    fn aabb(&self, transform: Transform) -> Aabb {
        self.as_collision_shape().aabb(transform)
    }

    fn rotated(&self, rotation: Quat) -> Shape {
        self.as_collision_shape().rotated(rotation)
    }

    #[inline]
    fn volume(&self) -> f32 {
        self.as_collision_shape().volume()
    }

    fn unit_mass_properties(&self) -> MassProperties {
        self.as_collision_shape().unit_mass_properties()
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Shape {
                fn from(shape: $ty) -> Self {
                    Shape::$variant(shape)
                }
            }
        )*
    };
}

impl_from_variant!(
    Sphere(Sphere),
    Box(BoxShape),
    Capsule(Capsule),
    Cylinder(Cylinder),
    ConvexHull(ConvexHull),
    Compound(Compound),
);

/// Rotation keeps the local Y axis on itself (up to sign).
pub(crate) fn preserves_y_axis(rotation: Quat) -> bool {
    let axis = rotation * Vec3::Y;
    axis.abs().abs_diff_eq(Vec3::Y, 1e-5)
}

/// Rotates a Y-aligned shape: unchanged when the axis survives, otherwise
/// wrapped in a single-child compound carrying the rotation.
pub(crate) fn rotate_axial(shape: Shape, rotation: Quat) -> Shape {
    if preserves_y_axis(rotation) {
        shape
    } else {
        Shape::Compound(Compound::single(Transform::from_rotation(rotation), shape))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::PI;

    #[test]
    fn test_shape_enum() {
        assert_eq!(Shape::sphere(2.0).unwrap().shape_type(), ShapeType::Sphere);
        assert_eq!(Shape::cuboid(Vec3::ONE).unwrap().shape_type(), ShapeType::Box);
        assert_eq!(Shape::capsule(1.0, 2.0).unwrap().shape_type(), ShapeType::Capsule);
        assert_eq!(Shape::cylinder(1.0, 2.0).unwrap().shape_type(), ShapeType::Cylinder);
        assert_eq!(
            Shape::convex_hull(vec![Vec3::ZERO, Vec3::X]).unwrap().shape_type(),
            ShapeType::ConvexHull
        );
    }

    #[test]
    fn test_as_box_only_for_boxes() {
        let b = Shape::cuboid(Vec3::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(
            b.as_box().map(BoxShape::half_extents_without_margin),
            Some(Vec3::new(1.0, 2.0, 3.0))
        );
        assert!(Shape::sphere(1.0).unwrap().as_box().is_none());
    }

    #[test]
    fn test_compound_is_not_convex() {
        let child = CompoundChild::new(Transform::IDENTITY, Shape::sphere(1.0).unwrap()).unwrap();
        let compound = Shape::compound(vec![child]).unwrap();

        assert!(!compound.is_convex());
        assert!(Shape::cuboid(Vec3::ONE).unwrap().is_convex());
    }

    #[test]
    fn test_support_world() {
        let shape = Shape::sphere(1.0).unwrap();
        let transform = Transform::from_position(Vec3::new(5.0, 0.0, 0.0));

        let support = shape.as_convex().unwrap().support_world(transform, Vec3::X);
        assert_abs_diff_eq!(support, Vec3::new(6.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_rejects_negative_density() {
        let shape = Shape::cuboid(Vec3::ONE).unwrap();
        assert!(matches!(
            shape.mass_properties(-1.0),
            Err(ShapeError::InvalidDensity(_))
        ));
        assert_abs_diff_eq!(shape.mass_properties(0.5).unwrap().mass, 4.0);
    }

    #[test]
    fn test_axial_rotation_wraps_only_when_axis_moves() {
        let capsule = Shape::capsule(0.5, 1.0).unwrap();

        let spun = capsule.rotated(Quat::from_axis_angle(Vec3::Y, 0.3));
        assert_eq!(spun, capsule);

        let flipped = capsule.rotated(Quat::from_axis_angle(Vec3::X, PI));
        assert_eq!(flipped, capsule);

        let tipped = capsule.rotated(Quat::from_axis_angle(Vec3::Z, PI / 2.0));
        assert_eq!(tipped.shape_type(), ShapeType::Compound);
        assert_abs_diff_eq!(
            tipped.local_aabb().half_extents(),
            Vec3::new(1.5, 0.5, 0.5),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_shape_type_display() {
        assert_eq!(ShapeType::ConvexHull.to_string(), "convex_hull");
        assert_eq!(ShapeType::Box.to_string(), "box");
    }
}
