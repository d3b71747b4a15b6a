use crate::error::ShapeError;
use crate::geometry::{Aabb, MassProperties};
use crate::math::{Quat, Transform};

use super::{CollisionShape, Shape, ShapeType};

/// A child of a [`Compound`]: a shape placed relative to the compound origin.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundChild {
    transform: Transform,
    shape: Shape,
}

impl CompoundChild {
    /// Places `shape` at `transform`; the rotation is stored normalized
    pub fn new(transform: Transform, shape: Shape) -> Result<Self, ShapeError> {
        Ok(Self {
            transform: transform.validated()?,
            shape,
        })
    }

    #[inline]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

/// Several shapes rigidly attached to one body.
///
/// A compound has no margin of its own; each child keeps its margin.
#[derive(Debug, Clone, PartialEq)]
pub struct Compound {
    children: Vec<CompoundChild>,
}

impl Compound {
    /// Creates a compound from at least one child
    pub fn new(children: Vec<CompoundChild>) -> Result<Self, ShapeError> {
        if children.is_empty() {
            return Err(ShapeError::EmptyCompound);
        }
        Ok(Self { children })
    }

    pub(crate) fn single(transform: Transform, shape: Shape) -> Self {
        Self {
            children: vec![CompoundChild { transform, shape }],
        }
    }

    #[inline]
    pub fn children(&self) -> &[CompoundChild] {
        &self.children
    }

    pub fn add_child(&mut self, transform: Transform, shape: Shape) -> Result<(), ShapeError> {
        self.children.push(CompoundChild::new(transform, shape)?);
        Ok(())
    }
}

impl CollisionShape for Compound {
    #[inline]
    fn shape_type(&self) -> ShapeType {
        ShapeType::Compound
    }

    #[inline]
    fn margin(&self) -> f32 {
        0.0
    }

    fn local_aabb(&self) -> Aabb {
        self.aabb(Transform::IDENTITY)
    }

    fn aabb(&self, transform: Transform) -> Aabb {
        self.children.iter().fold(Aabb::EMPTY, |aabb, child| {
            aabb.union(child.shape.aabb(transform.compose(child.transform)))
        })
    }

    fn rotated(&self, rotation: Quat) -> Shape {
        let frame = Transform::from_rotation(rotation);
        Shape::Compound(Self {
            children: self
                .children
                .iter()
                .map(|child| CompoundChild {
                    transform: frame.compose(child.transform),
                    shape: child.shape.clone(),
                })
                .collect(),
        })
    }

    /// Sum of the children's volumes; overlaps are counted twice.
    fn volume(&self) -> f32 {
        self.children
            .iter()
            .map(|child| child.shape.volume() * child.transform.scale.powi(3))
            .sum()
    }

    fn unit_mass_properties(&self) -> MassProperties {
        let parts: Vec<MassProperties> = self
            .children
            .iter()
            .map(|child| child.shape.unit_mass_properties().transformed(child.transform))
            .collect();
        MassProperties::combine(&parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::FRAC_PI_2;

    fn dumbbell() -> Compound {
        let ball = Shape::sphere(1.0).unwrap();
        Compound::new(vec![
            CompoundChild::new(Transform::from_position(Vec3::new(-2.0, 0.0, 0.0)), ball.clone()).unwrap(),
            CompoundChild::new(Transform::from_position(Vec3::new(2.0, 0.0, 0.0)), ball).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(Compound::new(Vec::new()), Err(ShapeError::EmptyCompound)));
    }

    #[test]
    fn test_local_aabb_is_union_of_children() {
        let aabb = dumbbell().local_aabb();
        assert_eq!(aabb.min, Vec3::new(-3.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vec3::new(3.0, 1.0, 1.0));
    }

    #[test]
    fn test_world_aabb_follows_transform() {
        let t = Transform::new(Vec3::new(0.0, 10.0, 0.0), Quat::from_axis_angle(Vec3::Z, FRAC_PI_2));
        let aabb = dumbbell().aabb(t);

        assert_abs_diff_eq!(aabb.center(), Vec3::new(0.0, 10.0, 0.0), epsilon = 1e-5);
        assert_abs_diff_eq!(aabb.half_extents(), Vec3::new(1.0, 3.0, 1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_rotated_matches_world_rotation() {
        let rotation = Quat::from_axis_angle(Vec3::Y, FRAC_PI_2);
        let compound = dumbbell();

        let pre_rotated = compound.rotated(rotation).local_aabb();
        let placed = compound.aabb(Transform::from_rotation(rotation));
        assert_abs_diff_eq!(pre_rotated.min, placed.min, epsilon = 1e-5);
        assert_abs_diff_eq!(pre_rotated.max, placed.max, epsilon = 1e-5);
    }

    #[test]
    fn test_mass_properties_combine_children() {
        let props = dumbbell().mass_properties(1.0).unwrap();
        let ball_mass = (4.0 / 3.0) * std::f32::consts::PI;

        assert_abs_diff_eq!(props.mass, 2.0 * ball_mass, epsilon = 1e-4);
        assert_abs_diff_eq!(props.center_of_mass, Vec3::ZERO, epsilon = 1e-5);
        // Each ball: 2/5 m r^2 about its center, plus m * 2^2 offset about Y and Z.
        let about_y = 2.0 * (0.4 * ball_mass + ball_mass * 4.0);
        assert_abs_diff_eq!(props.inertia.y_axis.y, about_y, epsilon = 1e-3);
        assert_abs_diff_eq!(props.inertia.x_axis.x, 2.0 * 0.4 * ball_mass, epsilon = 1e-4);
    }

    #[test]
    fn test_child_transform_is_validated() {
        let ball = Shape::sphere(1.0).unwrap();
        let mirrored = Transform {
            scale: -1.0,
            ..Transform::IDENTITY
        };
        assert!(matches!(
            CompoundChild::new(mirrored, ball.clone()),
            Err(ShapeError::InvalidScale(_))
        ));

        let mut compound = dumbbell();
        let degenerate = Transform::from_rotation(Quat::from_xyzw(0.0, 0.0, 0.0, 0.0));
        assert!(matches!(
            compound.add_child(degenerate, ball),
            Err(ShapeError::InvalidRotation(_))
        ));
        assert_eq!(compound.children().len(), 2);
    }

    #[test]
    fn test_child_rotation_is_normalized() {
        let half_turn = Quat::from_xyzw(0.0, 0.0, 3.0, 0.0);
        let child = CompoundChild::new(
            Transform::from_rotation(half_turn),
            Shape::cuboid(Vec3::new(1.0, 2.0, 3.0)).unwrap(),
        )
        .unwrap();

        assert_abs_diff_eq!(child.transform().rotation.length(), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(
            child.shape().aabb(child.transform()).half_extents(),
            Vec3::new(1.0, 2.0, 3.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_add_child_extends_volume() {
        let mut compound = dumbbell();
        let before = compound.volume();
        compound
            .add_child(Transform::IDENTITY, Shape::cuboid(Vec3::splat(0.5)).unwrap())
            .unwrap();

        assert_eq!(compound.children().len(), 3);
        assert_abs_diff_eq!(compound.volume(), before + 1.0, epsilon = 1e-4);
    }
}
