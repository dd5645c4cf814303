use std::f32::consts::{PI, TAU};

use crate::color::Rgb;

/// Fraction of the base lightness kept by a face turned fully away.
pub const SHADOW_LIGHTNESS: f32 = 0.75;

/// Direction the intro's light shines from, as a horizontal angle.
pub const LIGHT_ANGLE: f32 = 3.0 * PI / 8.0;

/// Flat per-face shading from a single directional light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    base: Rgb,
    light_angle: f32,
}

impl Lighting {
    pub fn new(base: Rgb, light_angle: f32) -> Self {
        Self { base, light_angle }
    }

    /// Shade the base color for a face whose absolute normal points at
    /// `normal_angle`. Hue and saturation are preserved.
    pub fn shade(&self, normal_angle: f32) -> Rgb {
        let mut hsl = self.base.to_hsl();
        hsl.l = lightness(hsl.l, self.light_angle, normal_angle);
        hsl.to_rgb()
    }
}

/// Lightness of a face at `normal_angle` lit from `light_angle`.
///
/// Full `base` when facing the light, `SHADOW_LIGHTNESS * base` when facing
/// directly away, linear in the angular distance in between.
pub fn lightness(base: f32, light_angle: f32, normal_angle: f32) -> f32 {
    let distance = angular_distance(light_angle, normal_angle);
    let t = distance / PI;
    base * (1.0 - (1.0 - SHADOW_LIGHTNESS) * t)
}

/// Shortest angle between `a` and `b`, in `[0, π]`.
pub fn angular_distance(a: f32, b: f32) -> f32 {
    let d = (b - a).rem_euclid(TAU);
    if d > PI {
        TAU - d
    } else {
        d
    }
}
