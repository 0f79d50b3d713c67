use log::trace;
use rayon::prelude::*;

use crate::object::{nearest_hit, Surface};
use crate::ray::{Intersection, Ray};

/// Number of rays handed to a worker at a time.
pub const RAYS_PER_WORK: usize = 1024;

/// Finds the nearest hit of every ray in parallel.
///
/// The result has one entry per ray, in the order of `rays`. Surfaces are
/// only read, so the same slice is shared by all workers.
pub fn cast_rays<'a>(rays: &[Ray], surfaces: &'a [Surface]) -> Vec<Option<Intersection<'a>>> {
    rays.par_chunks(RAYS_PER_WORK)
        .flat_map_iter(|chunk| {
            trace!(target: "raytrace", "Casting chunk of {} rays", chunk.len());
            chunk.iter().map(move |ray| nearest_hit(surfaces, ray))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::light::Light;
    use crate::object::{Object3D, Plane, Sphere};
    use crate::vector::Vector3;

    fn scene() -> Vec<Surface> {
        vec![
            Plane::new(
                Object3D::new(Vector3::new(0.0, -1.0, 0.0), Color::WHITE, 0.0, 0.0),
                Vector3::UP,
            )
            .into(),
            Sphere::new(
                Object3D::new(Vector3::new(0.0, 0.0, 5.0), Color::RED, 0.5, 0.0),
                1.0,
            )
            .into(),
            Sphere::new(
                Object3D::new(Vector3::new(2.5, 0.5, 8.0), Color::BLUE, 0.0, 0.8),
                1.5,
            )
            .into(),
        ]
    }

    fn camera_rays(width: u32, height: u32) -> Vec<Ray> {
        (0..width * height)
            .map(|i| (i % width, i / width))
            .map(|(x, y)| {
                let u = x as f32 / (width - 1) as f32 * 2.0 - 1.0;
                let v = y as f32 / (height - 1) as f32 * 2.0 - 1.0;
                Ray::new(Vector3::ZERO, Vector3::new(u, v, 1.0))
            })
            .collect()
    }

    #[test]
    fn test_cast_matches_sequential() {
        crate::init_test_logger();
        let surfaces = scene();
        let rays = camera_rays(64, 48);
        assert!(rays.len() > RAYS_PER_WORK);

        let parallel = cast_rays(&rays, &surfaces);
        assert_eq!(parallel.len(), rays.len());

        for (ray, hit) in rays.iter().zip(&parallel) {
            let expected = nearest_hit(&surfaces, ray);
            match (hit, expected) {
                (Some(hit), Some(expected)) => {
                    assert!(std::ptr::eq(hit.surface, expected.surface));
                    assert_eq!(hit.distance, expected.distance);
                }
                (None, None) => {}
                _ => panic!("parallel and sequential casts disagree for {:?}", ray),
            }
        }
        assert!(parallel.iter().any(|hit| hit.is_none()));
        assert!(parallel.iter().flatten().any(|hit| hit.surface.color() == Color::RED));
        assert!(parallel.iter().flatten().any(|hit| hit.surface.color() == Color::WHITE));
    }

    #[test]
    fn test_cast_empty() {
        let surfaces = scene();
        assert!(cast_rays(&[], &surfaces).is_empty());

        let rays = camera_rays(4, 4);
        assert!(cast_rays(&rays, &[]).iter().all(Option::is_none));
    }

    #[test]
    fn test_direct_lighting_flow() {
        // what a shading loop does with the pieces of this crate
        let surfaces = scene();
        let lights = [
            Light::positional(Vector3::new(0.0, 10.0, 5.0), Color::WHITE, 1.0),
            Light::directional(Vector3::DOWN, Color::new(255.0, 255.0, 0.0), 0.5),
        ];

        let ray = Ray::new(Vector3::ZERO, Vector3::FORWARD);
        let hits = cast_rays(&[ray], &surfaces);
        let hit = hits[0].expect("camera ray should reach the red sphere");
        assert_eq!(hit.surface.color(), Color::RED);
        assert!((hit.distance - 4.0).abs() < 1e-5);

        let shaded: Color = lights
            .iter()
            .map(|light| {
                let toward = light.direction(&hit.point).unwrap();
                let shadow = hit.shadow_ray(light).unwrap();
                if nearest_hit(&surfaces, &shadow).is_some() {
                    return Color::BLACK;
                }
                let cosine = hit.normal.dot(&toward).max(0.0);
                light.lit_color(&hit.surface.color(), cosine)
            })
            .sum();

        // the hit point faces the camera, so both lights graze it at 90 degrees
        assert!(shaded.r() < 1.0);
        assert_eq!(shaded.b(), 0.0);

        // the top of the sphere faces both lights head on
        let from_above = Ray::new(Vector3::new(0.0, 5.0, 5.0), Vector3::DOWN);
        let top = nearest_hit(&surfaces, &from_above).unwrap();
        let shaded: Color = lights
            .iter()
            .map(|light| {
                let toward = light.direction(&top.point).unwrap();
                light.lit_color(&top.surface.color(), top.normal.dot(&toward).max(0.0))
            })
            .sum();
        assert!((shaded.r() - 255.0).abs() < 1e-3);
        assert_eq!(shaded.g(), 0.0);
    }
}
