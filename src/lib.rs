//! Geometric core of a simple ray-tracing renderer: vectors, clamped colors,
//! rays, lights and ray-surface intersection.
//!
//! A caller builds [`Ray`]s (typically one per pixel sample), casts them at
//! [`Surface`]s, keeps the nearest [`Intersection`] and shades it with
//! [`Light::direction`] and [`Light::lit_color`]. Building the scene, the
//! camera model and the recursive shading loop are left to the caller.
//!
//! Diagnostics go through the `log` facade under the `raytrace` target; no
//! logger is installed by this crate.

mod cast;
mod color;
mod error;
mod light;
mod object;
mod ray;
mod vector;

pub use cast::{cast_rays, RAYS_PER_WORK};
pub use color::{Color, Rgba8};
pub use error::{GeometryError, Result};
pub use light::{Light, Source};
pub use object::{nearest_hit, Object3D, Plane, Sphere, Surface};
pub use ray::{Intersection, Ray, RAY_EPSILON};
pub use vector::Vector3;

#[cfg(test)]
pub(crate) fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
