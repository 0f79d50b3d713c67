use std::f32::consts::PI;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use log::trace;
use nalgebra::vector;

use crate::error::{GeometryError, Result};

/// A point or direction in 3D space.
///
/// `Vector3` is `Copy`: binding a constant such as [`Vector3::UP`] to a local
/// yields an independent value, so the in-place operations below only ever
/// touch a vector the caller owns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector3(nalgebra::Vector3<f32>);

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3(vector![0.0, 0.0, 0.0]);
    pub const UP: Vector3 = Vector3(vector![0.0, 1.0, 0.0]);
    pub const DOWN: Vector3 = Vector3(vector![0.0, -1.0, 0.0]);
    pub const RIGHT: Vector3 = Vector3(vector![1.0, 0.0, 0.0]);
    pub const LEFT: Vector3 = Vector3(vector![-1.0, 0.0, 0.0]);
    pub const FORWARD: Vector3 = Vector3(vector![0.0, 0.0, 1.0]);
    pub const BACK: Vector3 = Vector3(vector![0.0, 0.0, -1.0]);

    /// Non-finite components are stored as zero.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Vector3(vector![finite_or_zero(x), finite_or_zero(y), finite_or_zero(z)])
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn y(&self) -> f32 {
        self.0.y
    }

    pub fn z(&self) -> f32 {
        self.0.z
    }

    pub fn set(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        *self = Vector3::new(x, y, z);
        self
    }

    pub fn copy_from(&mut self, other: &Vector3) -> &mut Self {
        *self = *other;
        self
    }

    pub fn negate(&mut self) -> &mut Self {
        self.0 = -self.0;
        self
    }

    /// Adds `offset` to this vector in place.
    pub fn translate(&mut self, offset: &Vector3) -> &mut Self {
        self.0 += offset.0;
        self
    }

    pub fn subtract(&mut self, other: &Vector3) -> &mut Self {
        self.0 -= other.0;
        self
    }

    pub fn scale(&mut self, scalar: f32) -> &mut Self {
        self.0 *= scalar;
        self
    }

    pub fn length(&self) -> f32 {
        self.0.magnitude()
    }

    pub fn length_squared(&self) -> f32 {
        self.0.magnitude_squared()
    }

    /// Scales to unit length. A zero vector is left untouched.
    pub fn normalize(&mut self) -> &mut Self {
        let magnitude = self.length();
        if magnitude > 0.0 {
            self.0 /= magnitude;
        }
        self
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Sets the length to `length` keeping the direction. A negative length
    /// flips the direction; a zero vector is left untouched.
    pub fn rescale(&mut self, length: f32) -> &mut Self {
        let current = self.length();
        if current != 0.0 {
            self.0 *= length / current;
        }
        self
    }

    pub fn rescaled(mut self, length: f32) -> Self {
        self.rescale(length);
        self
    }

    pub fn distance(&self, other: &Vector3) -> f32 {
        (self.0 - other.0).magnitude()
    }

    pub fn dot(&self, other: &Vector3) -> f32 {
        self.0.dot(&other.0)
    }

    pub fn cross(&self, other: &Vector3) -> Vector3 {
        Vector3(self.0.cross(&other.0))
    }

    /// The vector pointing from `from` to `to`.
    pub fn from_to(from: &Vector3, to: &Vector3) -> Vector3 {
        Vector3(to.0 - from.0)
    }

    /// The unit vector pointing from `from` to `to`.
    ///
    /// Fails with [`GeometryError::CoincidentPoints`] when the two points are
    /// the same, since no direction exists between them.
    pub fn from_to_normalized(from: &Vector3, to: &Vector3) -> Result<Vector3> {
        let distance = from.distance(to);
        if distance == 0.0 {
            return Err(GeometryError::CoincidentPoints(*from));
        }
        Ok(Vector3((to.0 - from.0) / distance))
    }

    /// Angle to `other` in degrees, or 0 if either vector has zero length.
    pub fn angle(&self, other: &Vector3) -> f32 {
        let length = self.length() * other.length();
        if length <= 0.0 {
            return 0.0;
        }
        (self.dot(other) / length).clamp(-1.0, 1.0).acos().to_degrees()
    }

    /// Projection of this vector onto `onto`, or `None` if `onto` has zero length.
    pub fn project(&self, onto: &Vector3) -> Option<Vector3> {
        let length = onto.length();
        if length <= 0.0 {
            return None;
        }
        Some(onto.rescaled(self.dot(onto) / length))
    }

    /// Mirror reflection about a unit `normal`.
    pub fn reflect(&self, normal: &Vector3) -> Vector3 {
        Vector3(self.0 - normal.0 * (2.0 * self.dot(normal)))
    }

    /// Refraction through a surface with unit `normal` by Snell's law, where
    /// `eta` is the ratio of the refractive index being left to the one being
    /// entered.
    ///
    /// The normal is flipped when it faces the same way as this vector, so it
    /// always opposes the incoming direction. Returns `None` on total internal
    /// reflection.
    pub fn refract(&self, normal: &Vector3, eta: f32) -> Option<Vector3> {
        let mut cos_theta = self.dot(normal).clamp(-1.0, 1.0);
        let mut normal = *normal;
        if cos_theta < 0.0 {
            cos_theta = -cos_theta;
        } else {
            normal.negate();
        }

        let parallel_squared = 1.0 - eta * eta * (1.0 - cos_theta * cos_theta);
        if parallel_squared < 0.0 {
            trace!(target: "raytrace", "Total internal reflection of {} (eta {})", self, eta);
            return None;
        }

        let perpendicular = (self.0 + normal.0 * cos_theta) * eta;
        let parallel = normal.0 * -parallel_squared.sqrt();
        Some(Vector3(perpendicular + parallel))
    }

    /// A uniformly distributed unit vector, drawn from the global generator.
    pub fn random_unit() -> Vector3 {
        sample_unit(fastrand::f32)
    }

    pub fn random_unit_with(rng: &mut fastrand::Rng) -> Vector3 {
        sample_unit(|| rng.f32())
    }

    /// A uniformly distributed unit vector on the hemisphere around `normal`.
    pub fn random_hemisphere(normal: &Vector3) -> Vector3 {
        into_hemisphere(Vector3::random_unit(), normal)
    }

    pub fn random_hemisphere_with(normal: &Vector3, rng: &mut fastrand::Rng) -> Vector3 {
        into_hemisphere(Vector3::random_unit_with(rng), normal)
    }
}

// uniform z and azimuth give a uniform distribution over the sphere
fn sample_unit(mut uniform: impl FnMut() -> f32) -> Vector3 {
    let theta = uniform() * 2.0 * PI;
    let z = uniform() * 2.0 - 1.0;
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vector3::new(r * theta.cos(), r * theta.sin(), z)
}

fn into_hemisphere(mut sample: Vector3, normal: &Vector3) -> Vector3 {
    if sample.dot(normal) < 0.0 {
        sample.negate();
    }
    sample
}

impl Default for Vector3 {
    fn default() -> Self {
        Vector3::ZERO
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x(), self.y(), self.z())
    }
}

impl From<nalgebra::Vector3<f32>> for Vector3 {
    fn from(value: nalgebra::Vector3<f32>) -> Self {
        Vector3::new(value.x, value.y, value.z)
    }
}

impl From<Vector3> for nalgebra::Vector3<f32> {
    fn from(value: Vector3) -> Self {
        value.0
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Vector3::new(x, y, z)
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Self) -> Self::Output {
        Vector3(self.0 + rhs.0)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector3(self.0 - rhs.0)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Self::Output {
        Vector3(-self.0)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f32) -> Self::Output {
        Vector3(self.0 * rhs)
    }
}

impl Mul<Vector3> for f32 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Self::Output {
        rhs * self
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl MulAssign<f32> for Vector3 {
    fn mul_assign(&mut self, rhs: f32) {
        self.0 *= rhs;
    }
}
