//! Colours, the wireframe material and the scene's two lights
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Linear RGB colour with channels in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(from = "u32", into = "u32")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a colour from a `0xRRGGBB` value
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    pub fn to_hex(&self) -> u32 {
        let (r, g, b) = self.to_rgb8();
        (r as u32) << 16 | (g as u32) << 8 | b as u32
    }

    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (channel(self.r), channel(self.g), channel(self.b))
    }

    /// CSS `rgb()` notation, for canvas stroke styles
    pub fn to_css(&self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("rgb({}, {}, {})", r, g, b)
    }

    /// Perceived brightness (Rec. 709 weights)
    pub fn luminance(&self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }

    pub fn scale(&self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }

    pub fn modulate(&self, other: &Color) -> Self {
        Self::new(self.r * other.r, self.g * other.g, self.b * other.b)
    }

    pub fn plus(&self, other: &Color) -> Self {
        Self::new(self.r + other.r, self.g + other.g, self.b + other.b)
    }

    pub fn clamped(&self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Surface description for the crystal's edges
///
/// Metals reflect little diffuse light, so `metalness` dims the base colour.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Material {
    pub color: Color,
    pub emissive: Color,
    pub metalness: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::from_hex(0x00ffff),
            emissive: Color::from_hex(0x0a0a1a),
            metalness: 0.1,
        }
    }
}

/// Uniform light reaching every surface
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            intensity: 0.1,
        }
    }
}

/// Omnidirectional light fading out to zero at `distance`
///
/// A `distance` of 0 means the light never fades.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
    pub distance: f32,
    pub decay: f32,
    pub position: [f32; 3],
}

impl PointLight {
    pub fn position(&self) -> Point3<f32> {
        Point3::from(self.position)
    }

    /// Fraction of the light's intensity left after travelling `distance`
    pub fn attenuation(&self, distance: f32) -> f32 {
        if self.distance <= 0.0 {
            return 1.0;
        }
        (1.0 - distance / self.distance).clamp(0.0, 1.0).powf(self.decay)
    }

    /// Light arriving at a surface point with the given normal
    pub fn irradiance(&self, point: &Point3<f32>, normal: &Vector3<f32>) -> Color {
        let to_light = self.position() - point;
        let distance = to_light.norm();
        if distance <= f32::EPSILON {
            return self.color.scale(self.intensity);
        }

        let lambert = normal.dot(&(to_light / distance)).max(0.0);
        self.color
            .scale(self.intensity * lambert * self.attenuation(distance))
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            color: Color::from_hex(0x00ffff),
            intensity: 3.0,
            distance: 10.0,
            decay: 2.0,
            position: [2.0, 3.0, 4.0],
        }
    }
}

/// Shade a surface point of `material` under both lights
pub fn shade(
    material: &Material,
    ambient: &AmbientLight,
    light: &PointLight,
    point: &Point3<f32>,
    normal: &Vector3<f32>,
) -> Color {
    let diffuse = material.color.scale(1.0 - material.metalness);
    let incoming = ambient
        .color
        .scale(ambient.intensity)
        .plus(&light.irradiance(point, normal));

    diffuse.modulate(&incoming).plus(&material.emissive).clamped()
}
