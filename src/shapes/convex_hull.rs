use crate::error::{check_non_negative, ShapeError};
use crate::geometry::{Aabb, MassProperties};
use crate::math::{Mat3, Quat, Transform, Vec3};

use super::{CollisionShape, ConvexShape, Shape, ShapeType};

/// The convex hull of a local-space point cloud, with a margin around it.
///
/// Points are kept as given; interior points are harmless for the support
/// mapping. Volume and mass use the bounding box of the points.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexHull {
    points: Vec<Vec3>,
    margin: f32,
}

impl ConvexHull {
    /// Creates a hull with no margin
    pub fn new(points: Vec<Vec3>) -> Result<Self, ShapeError> {
        Self::with_margin(points, 0.0)
    }

    /// Creates a hull whose margin is added outside the points
    pub fn with_margin(points: Vec<Vec3>, margin: f32) -> Result<Self, ShapeError> {
        let margin = check_non_negative(margin, ShapeError::InvalidMargin)?;
        if points.is_empty() {
            return Err(ShapeError::EmptyConvexHull);
        }
        if let Some((index, &point)) = points.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(ShapeError::InvalidHullPoint { index, point });
        }
        Ok(Self { points, margin })
    }

    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn set_margin(&mut self, margin: f32) -> Result<(), ShapeError> {
        self.margin = check_non_negative(margin, ShapeError::InvalidMargin)?;
        Ok(())
    }

    fn core_aabb(&self) -> Aabb {
        Aabb::from_points(&self.points)
    }
}

impl CollisionShape for ConvexHull {
    #[inline]
    fn shape_type(&self) -> ShapeType {
        ShapeType::ConvexHull
    }

    #[inline]
    fn margin(&self) -> f32 {
        self.margin
    }

    fn local_aabb(&self) -> Aabb {
        self.core_aabb().expand(self.margin)
    }

    fn aabb(&self, transform: Transform) -> Aabb {
        self.points
            .iter()
            .fold(Aabb::EMPTY, |aabb, &p| aabb.expand_to_include(transform.transform_point(p)))
            .expand(self.margin * transform.scale)
    }

    fn rotated(&self, rotation: Quat) -> Shape {
        Shape::ConvexHull(Self {
            points: self.points.iter().map(|&p| rotation * p).collect(),
            margin: self.margin,
        })
    }

    fn volume(&self) -> f32 {
        self.local_aabb().volume()
    }

    fn unit_mass_properties(&self) -> MassProperties {
        let bounds = self.local_aabb();
        let size = bounds.size();
        let mass = bounds.volume();

        let x2 = size.x * size.x;
        let y2 = size.y * size.y;
        let z2 = size.z * size.z;

        MassProperties {
            mass,
            center_of_mass: bounds.center(),
            inertia: Mat3::from_diagonal(
                Vec3::new(y2 + z2, x2 + z2, x2 + y2) * (mass / 12.0),
            ),
        }
    }
}

impl ConvexShape for ConvexHull {
    fn local_support_without_margin(&self, direction: Vec3) -> Vec3 {
        self.points
            .iter()
            .copied()
            .fold((Vec3::ZERO, f32::NEG_INFINITY), |(best, best_dot), p| {
                let d = p.dot(direction);
                if d > best_dot {
                    (p, d)
                } else {
                    (best, best_dot)
                }
            })
            .0
    }
}
