use float_ord::FloatOrd;
use log::warn;

use crate::color::Color;
use crate::ray::{Intersection, Ray};
use crate::vector::Vector3;

/// Attributes shared by every surface kind.
///
/// `reflectivity` and `transparency` are meant to lie in `0.0..=1.0` but are
/// not checked; they are only read back by the shading loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Object3D {
    pub position: Vector3,
    pub color: Color,
    pub reflectivity: f32,
    pub transparency: f32,
}

impl Object3D {
    pub fn new(position: Vector3, color: Color, reflectivity: f32, transparency: f32) -> Self {
        Object3D {
            position,
            color,
            reflectivity,
            transparency,
        }
    }
}

impl Default for Object3D {
    fn default() -> Self {
        Object3D::new(Vector3::ZERO, Color::BLACK, 0.0, 0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub base: Object3D,
    pub radius: f32,
}

impl Sphere {
    pub fn new(base: Object3D, radius: f32) -> Self {
        if radius <= 0.0 || radius.is_nan() {
            warn!(target: "raytrace", "Sphere at {} has radius {} and can never be hit", base.position, radius);
        }
        Sphere { base, radius }
    }

    /// Ray parameter of the nearest intersection in front of the origin.
    /// A sphere without a positive radius is never hit.
    pub fn nearest_root(&self, ray: &Ray) -> Option<f32> {
        if self.radius <= 0.0 || self.radius.is_nan() {
            return None;
        }
        let direction = ray.direction();
        let oc = ray.origin - self.base.position;

        // 1 for any ray with a usable direction
        let a = direction.length_squared();
        if a == 0.0 {
            return None;
        }
        let b = 2.0 * direction.dot(&oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        // take the near root unless it lies behind the origin
        let near = (-b - sqrtd) / (2.0 * a);
        let root = if near >= 0.0 { near } else { (-b + sqrtd) / (2.0 * a) };
        (root >= 0.0).then_some(root)
    }

    /// Outward unit normal at a point on the sphere.
    pub fn normal_at(&self, point: &Vector3) -> Vector3 {
        Vector3::from_to(&self.base.position, point).normalized()
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Sphere::new(Object3D::default(), 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub base: Object3D,
    normal: Vector3,
}

impl Plane {
    /// A plane through `base.position`; `normal` is normalized.
    pub fn new(base: Object3D, normal: Vector3) -> Self {
        let normal = normal.normalized();
        if normal == Vector3::ZERO {
            warn!(target: "raytrace", "Plane at {} has no normal and can never be hit", base.position);
        }
        Plane { base, normal }
    }

    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    /// Ray parameter where the ray meets the front face, if strictly ahead
    /// of the origin. Rays that are parallel or travel along the normal miss.
    pub fn front_distance(&self, ray: &Ray) -> Option<f32> {
        let denominator = self.normal.dot(&ray.direction());
        if denominator >= 0.0 {
            return None;
        }
        let numerator = self.normal.dot(&self.base.position) - self.normal.dot(&ray.origin);
        let t = numerator / denominator;
        (t > 0.0).then_some(t)
    }
}

impl Default for Plane {
    fn default() -> Self {
        Plane::new(Object3D::default(), Vector3::UP)
    }
}

/// A surface a ray can be cast at.
#[derive(Clone, Debug, PartialEq)]
pub enum Surface {
    Sphere(Sphere),
    Plane(Plane),
}

impl Surface {
    pub fn base(&self) -> &Object3D {
        match self {
            Surface::Sphere(sphere) => &sphere.base,
            Surface::Plane(plane) => &plane.base,
        }
    }

    pub fn position(&self) -> Vector3 {
        self.base().position
    }

    pub fn color(&self) -> Color {
        self.base().color
    }

    pub fn reflectivity(&self) -> f32 {
        self.base().reflectivity
    }

    pub fn transparency(&self) -> f32 {
        self.base().transparency
    }

    /// Casts `ray` at this surface. Never fails: degenerate geometry and
    /// misses both come back with `hit` unset.
    pub fn raycast(&self, ray: &Ray) -> Intersection<'_> {
        let hit = match self {
            Surface::Sphere(sphere) => sphere.nearest_root(ray).map(|t| {
                let normal = sphere.normal_at(&ray.at(t));
                Intersection::hit_at(self, ray, t, normal)
            }),
            Surface::Plane(plane) => plane
                .front_distance(ray)
                .map(|t| Intersection::hit_at(self, ray, t, plane.normal())),
        };
        hit.unwrap_or_else(|| Intersection::miss(self, ray))
    }

    pub fn hit(&self, ray: &Ray) -> Option<Intersection<'_>> {
        Some(self.raycast(ray)).filter(|intersection| intersection.hit)
    }
}

impl From<Sphere> for Surface {
    fn from(value: Sphere) -> Self {
        Surface::Sphere(value)
    }
}

impl From<Plane> for Surface {
    fn from(value: Plane) -> Self {
        Surface::Plane(value)
    }
}

/// The closest hit among `surfaces`, by a linear scan.
pub fn nearest_hit<'a>(surfaces: &'a [Surface], ray: &Ray) -> Option<Intersection<'a>> {
    surfaces.iter()
        .filter_map(|surface| surface.hit(ray))
        .min_by_key(|hit| FloatOrd(hit.distance))
}
