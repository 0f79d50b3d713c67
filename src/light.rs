use log::debug;

use crate::color::Color;
use crate::error::Result;
use crate::vector::Vector3;

/// Where a light's rays come from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Source {
    /// Emits from a point; the incident direction depends on the lit point.
    Positional { position: Vector3 },
    /// Emits along `direction` everywhere in the scene.
    Directional { direction: Vector3 },
}

/// A light source. Neither kind attenuates with distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    source: Source,
    color: Color,
    intensity: f32,
    factors: [f32; 3],
}

impl Light {
    pub fn new(source: Source, color: Color, intensity: f32) -> Self {
        let factors = color.channels().map(|channel| channel / 255.0 * intensity);
        debug!(target: "raytrace", "New light {:?} with channel factors {:?}", source, factors);
        Light {
            source,
            color,
            intensity,
            factors,
        }
    }

    pub fn positional(position: Vector3, color: Color, intensity: f32) -> Self {
        Light::new(Source::Positional { position }, color, intensity)
    }

    pub fn directional(direction: Vector3, color: Color, intensity: f32) -> Self {
        Light::new(Source::Directional { direction }, color, intensity)
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn is_directional(&self) -> bool {
        matches!(self.source, Source::Directional { .. })
    }

    /// Per-channel multipliers: light channel / 255 scaled by intensity.
    pub fn factors(&self) -> [f32; 3] {
        self.factors
    }

    /// Direction from `point` toward the light.
    ///
    /// For a directional light this is the reversed light direction. For a
    /// positional light it is the unit vector to its position, which fails
    /// if `point` is the light's position.
    pub fn direction(&self, point: &Vector3) -> Result<Vector3> {
        match self.source {
            Source::Directional { direction } => Ok(-direction),
            Source::Positional { position } => Vector3::from_to_normalized(point, &position),
        }
    }

    /// Contribution of this light to a surface of `surface_color`, scaled by
    /// `intensity` (typically the cosine between normal and light direction).
    pub fn lit_color(&self, surface_color: &Color, intensity: f32) -> Color {
        let [r, g, b] = self.factors;
        Color::new(
            surface_color.r() * r * intensity,
            surface_color.g() * g * intensity,
            surface_color.b() * b * intensity,
        )
    }
}

impl Default for Light {
    fn default() -> Self {
        Light::positional(Vector3::ZERO, Color::WHITE, 1.0)
    }
}
