//! Pointer position mapping
use crate::config::PointerConfig;
use crate::tween::Axis;
use crate::viewport::Viewport;

/// Pointer position in normalized device space
///
/// Both axes run from -1 to 1 with the origin at the centre of the viewport
/// and +y pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPointer {
    pub x: f32,
    pub y: f32,
}

impl NormalizedPointer {
    /// Map a client-space position (origin top-left, +y down)
    pub fn from_client(client_x: f32, client_y: f32, viewport: Viewport) -> Self {
        Self {
            x: (client_x / viewport.width() as f32) * 2.0 - 1.0,
            y: -(client_y / viewport.height() as f32) * 2.0 + 1.0,
        }
    }

    /// Where the crystal's rotation heads: pointer height tilts around x,
    /// horizontal position turns around y
    pub fn rotation_destination(&self, config: &PointerConfig) -> [(Axis, f64); 2] {
        [
            (Axis::X, f64::from(self.y * config.rotation_scale)),
            (Axis::Y, f64::from(self.x * config.rotation_scale)),
        ]
    }

    /// Where the camera heads: a small pan following the pointer
    pub fn camera_destination(&self, config: &PointerConfig) -> [(Axis, f64); 2] {
        [
            (Axis::X, f64::from(self.x * config.camera_scale)),
            (Axis::Y, f64::from(self.y * config.camera_scale)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners() {
        let viewport = Viewport::new(800, 600).unwrap();
        assert_eq!(
            NormalizedPointer::from_client(0.0, 0.0, viewport),
            NormalizedPointer { x: -1.0, y: 1.0 }
        );
        assert_eq!(
            NormalizedPointer::from_client(800.0, 600.0, viewport),
            NormalizedPointer { x: 1.0, y: -1.0 }
        );
    }

    #[test]
    fn test_centre_heads_to_zero() {
        let viewport = Viewport::new(800, 600).unwrap();
        let pointer = NormalizedPointer::from_client(400.0, 300.0, viewport);
        let config = PointerConfig::default();
        assert_eq!(pointer.rotation_destination(&config), [(Axis::X, 0.0), (Axis::Y, 0.0)]);
        assert_eq!(pointer.camera_destination(&config), [(Axis::X, 0.0), (Axis::Y, 0.0)]);
    }

    #[test]
    fn test_scales() {
        let pointer = NormalizedPointer { x: 1.0, y: -0.5 };
        let config = PointerConfig::default();
        assert_eq!(
            pointer.rotation_destination(&config),
            [(Axis::X, -0.25), (Axis::Y, 0.5)]
        );
        let camera = pointer.camera_destination(&config);
        assert!((camera[0].1 - 0.2).abs() < 1e-6);
        assert!((camera[1].1 + 0.1).abs() < 1e-6);
    }
}
