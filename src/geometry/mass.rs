use crate::math::{consts::EPSILON, Mat3, Transform, Vec3};

/// Mass properties of a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassProperties {
    /// Total mass
    pub mass: f32,
    /// Center of mass in local coordinates (zero for symmetric primitives)
    pub center_of_mass: Vec3,
    /// Inertia tensor about the center of mass, in local axes
    pub inertia: Mat3,
}

impl Default for MassProperties {
    fn default() -> Self {
        Self::ZERO
    }
}

impl MassProperties {
    /// Zero mass, used for massless shapes
    pub const ZERO: Self = Self {
        mass: 0.0,
        center_of_mass: Vec3::ZERO,
        inertia: Mat3::ZERO,
    };

    /// Creates centered mass properties from mass and inertia diagonal
    #[inline]
    pub fn new(mass: f32, inertia_diagonal: Vec3) -> Self {
        Self {
            mass,
            center_of_mass: Vec3::ZERO,
            inertia: Mat3::from_diagonal(inertia_diagonal),
        }
    }

    /// Returns the inverse mass (0 for infinite mass)
    #[inline]
    pub fn inv_mass(&self) -> f32 {
        if self.mass > 0.0 {
            1.0 / self.mass
        } else {
            0.0
        }
    }

    /// Returns the inverse inertia tensor, or zero when it is singular
    #[inline]
    pub fn inv_inertia(&self) -> Mat3 {
        if self.inertia.determinant().abs() > EPSILON {
            self.inertia.inverse()
        } else {
            Mat3::ZERO
        }
    }

    /// Expresses these properties in the parent frame of `transform`.
    ///
    /// Mass scales with volume (`s^3`), inertia with `s^5`.
    pub fn transformed(&self, transform: Transform) -> Self {
        let s = transform.scale;
        let mass = self.mass * s * s * s;
        let rot = transform.rotation_matrix();
        Self {
            mass,
            center_of_mass: transform.transform_point(self.center_of_mass),
            inertia: rot * (self.inertia * (s * s * s * s * s)) * rot.transpose(),
        }
    }

    /// Combines several parts, all expressed in the same frame, into one body.
    ///
    /// Inertia is shifted to the combined center of mass with the parallel
    /// axis theorem.
    pub fn combine(parts: &[MassProperties]) -> Self {
        let mass: f32 = parts.iter().map(|p| p.mass).sum();
        if mass <= 0.0 {
            return Self::ZERO;
        }

        let center_of_mass = parts
            .iter()
            .fold(Vec3::ZERO, |acc, p| acc + p.center_of_mass * p.mass)
            / mass;

        let inertia = parts.iter().fold(Mat3::ZERO, |acc, p| {
            let d = p.center_of_mass - center_of_mass;
            let outer = Mat3::from_cols(d * d.x, d * d.y, d * d.z);
            let shift = (Mat3::IDENTITY * d.length_squared() - outer) * p.mass;
            acc + p.inertia + shift
        });

        Self {
            mass,
            center_of_mass,
            inertia,
        }
    }
}
