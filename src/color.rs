use std::iter::Sum;
use std::ops::{Add, Mul};

use bytemuck_derive::{AnyBitPattern, NoUninit};

/// An RGB color with channels kept in `0.0..=255.0`.
///
/// Every constructor and every operation that can push a channel out of range
/// clamps it back. Non-finite channels clamp to the nearest bound, NaN to 0.
/// Channels are read through [`Color::r`], [`Color::g`] and [`Color::b`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    r: f32,
    g: f32,
    b: f32,
}

fn clamp_channel(value: f32) -> f32 {
    // f32::max discards NaN, so NaN lands on the lower bound
    value.max(0.0).min(255.0)
}

impl Color {
    pub const WHITE: Color = Color { r: 255.0, g: 255.0, b: 255.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };
    pub const RED: Color = Color { r: 255.0, g: 0.0, b: 0.0 };
    pub const GREEN: Color = Color { r: 0.0, g: 255.0, b: 0.0 };
    pub const BLUE: Color = Color { r: 0.0, g: 0.0, b: 255.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        let mut color = Color { r, g, b };
        color.clamp_to_range();
        color
    }

    pub fn r(&self) -> f32 {
        self.r
    }

    pub fn g(&self) -> f32 {
        self.g
    }

    pub fn b(&self) -> f32 {
        self.b
    }

    pub fn channels(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn clamp_to_range(&mut self) -> &mut Self {
        self.r = clamp_channel(self.r);
        self.g = clamp_channel(self.g);
        self.b = clamp_channel(self.b);
        self
    }

    /// Adds `other` channel-wise, saturating at 255.
    pub fn accumulate(&mut self, other: &Color) -> &mut Self {
        self.r += other.r;
        self.g += other.g;
        self.b += other.b;
        self.clamp_to_range()
    }

    /// Scales every channel by `factor`, saturating at 255. Negative and NaN
    /// factors leave the color unchanged.
    pub fn multiply(&mut self, factor: f32) -> &mut Self {
        if factor < 0.0 || factor.is_nan() {
            return self;
        }
        self.r *= factor;
        self.g *= factor;
        self.b *= factor;
        self.clamp_to_range()
    }

    /// Divides every channel by `factor`, saturating at 255. Non-positive and
    /// NaN factors leave the color unchanged.
    pub fn divide(&mut self, factor: f32) -> &mut Self {
        if factor <= 0.0 || factor.is_nan() {
            return self;
        }
        self.r /= factor;
        self.g /= factor;
        self.b /= factor;
        self.clamp_to_range()
    }

    /// Moves toward `other` by `coefficient`: 0 keeps this color, 1 takes
    /// `other`. Coefficients outside `0.0..=1.0` leave the color unchanged.
    pub fn add_with_coefficient(&mut self, other: &Color, coefficient: f32) -> &mut Self {
        if !(0.0..=1.0).contains(&coefficient) {
            return self;
        }
        let keep = 1.0 - coefficient;
        self.r = self.r * keep + other.r * coefficient;
        self.g = self.g * keep + other.g * coefficient;
        self.b = self.b * keep + other.b * coefficient;
        self.clamp_to_range()
    }

    /// Unweighted average of four colors, as used when downsampling a 2x2 block.
    pub fn mix_four(c1: &Color, c2: &Color, c3: &Color, c4: &Color) -> Color {
        Color::new(
            (c1.r + c2.r + c3.r + c4.r) / 4.0,
            (c1.g + c2.g + c3.g + c4.g) / 4.0,
            (c1.b + c2.b + c3.b + c4.b) / 4.0,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl Sum for Color {
    fn sum<I: Iterator<Item=Self>>(iter: I) -> Self {
        let mut acc = Color::BLACK;
        for color in iter {
            acc.accumulate(&color);
        }
        acc
    }
}

impl Add for Color {
    type Output = Color;

    fn add(mut self, rhs: Self) -> Self::Output {
        self.accumulate(&rhs);
        self
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    fn mul(mut self, rhs: f32) -> Self::Output {
        self.multiply(rhs);
        self
    }
}

impl Mul<Color> for f32 {
    type Output = Color;

    fn mul(self, rhs: Color) -> Self::Output {
        rhs * self
    }
}

/// An opaque 8-bit-per-channel pixel, castable to bytes with `bytemuck`.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, AnyBitPattern, NoUninit)]
#[repr(C)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba8 { r, g, b, a }
    }
}

fn quantize(value: f32) -> u8 {
    clamp_channel(value).round() as u8
}

impl From<Color> for Rgba8 {
    fn from(value: Color) -> Self {
        Rgba8::new(quantize(value.r), quantize(value.g), quantize(value.b), u8::MAX)
    }
}
