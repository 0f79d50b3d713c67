use crate::error::Result;
use crate::light::Light;
use crate::object::Surface;
use crate::vector::Vector3;

/// Distance a secondary ray's origin is pushed along its direction so it does
/// not immediately hit the surface it leaves.
pub const RAY_EPSILON: f32 = 0.001;

/// A half-line with a unit direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vector3,
    direction: Vector3,
}

impl Ray {
    /// The direction is normalized whatever its magnitude; a zero direction
    /// stays zero and such a ray hits nothing.
    pub fn new(origin: Vector3, direction: Vector3) -> Self {
        Self {
            origin,
            direction: direction.normalized(),
        }
    }

    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    pub fn at(&self, t: f32) -> Vector3 {
        self.origin + self.direction * t
    }

    /// Advances the origin by [`RAY_EPSILON`] along the direction.
    pub fn offset_origin(&mut self) -> &mut Self {
        self.origin += self.direction * RAY_EPSILON;
        self
    }

    fn offset(mut self) -> Self {
        self.offset_origin();
        self
    }
}

impl Default for Ray {
    fn default() -> Self {
        Ray::new(Vector3::ZERO, Vector3::FORWARD)
    }
}

/// Result of casting a ray at a [`Surface`].
///
/// The record is filled in even on a miss (zero point, normal and distance),
/// so `hit` must be checked before the geometry is used.
#[derive(Clone, Copy, Debug)]
pub struct Intersection<'a> {
    pub hit: bool,
    pub point: Vector3,
    pub normal: Vector3,
    /// Direction of the ray that produced this record.
    pub incoming: Vector3,
    pub distance: f32,
    /// The surface that was tested, owned by the caller's scene.
    pub surface: &'a Surface,
}

impl<'a> Intersection<'a> {
    pub(crate) fn miss(surface: &'a Surface, ray: &Ray) -> Self {
        Intersection {
            hit: false,
            point: Vector3::ZERO,
            normal: Vector3::ZERO,
            incoming: ray.direction(),
            distance: 0.0,
            surface,
        }
    }

    pub(crate) fn hit_at(surface: &'a Surface, ray: &Ray, distance: f32, normal: Vector3) -> Self {
        Intersection {
            hit: true,
            point: ray.at(distance),
            normal,
            incoming: ray.direction(),
            distance,
            surface,
        }
    }

    /// The mirror ray leaving the hit point, already offset from the surface.
    pub fn reflected_ray(&self) -> Ray {
        Ray::new(self.point, self.incoming.reflect(&self.normal)).offset()
    }

    /// The transmitted ray leaving the hit point, already offset from the
    /// surface, or `None` on total internal reflection.
    pub fn refracted_ray(&self, eta: f32) -> Option<Ray> {
        self.incoming
            .refract(&self.normal, eta)
            .map(|direction| Ray::new(self.point, direction).offset())
    }

    /// The ray from the hit point toward `light`, already offset from the surface.
    pub fn shadow_ray(&self, light: &Light) -> Result<Ray> {
        let direction = light.direction(&self.point)?;
        Ok(Ray::new(self.point, direction).offset())
    }
}
