//! Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

use crate::viewport::Viewport;

/// A point after projection, in viewport units with the origin top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    /// Normalized device depth, -1 at the near plane and 1 at the far plane
    pub depth: f32,
}

/// Perspective camera with a fixed viewing direction
///
/// Moving the camera pans the view; it does not re-aim at the origin.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub direction: Vector3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            direction: -Vector3::z(),
            up: Vector3::y(),
            fov: 75.0_f32.to_radians(),
            aspect: viewport.aspect(),
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Match the projection to a new output size
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let target = self.position + self.direction;
        Matrix4::look_at_rh(&self.position, &target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world-space point through a combined view-projection matrix
    ///
    /// Returns `None` for points in front of the near plane (including
    /// anything behind the camera). Points outside the viewport are still
    /// returned so callers can draw edges that cross the border.
    pub fn project(
        &self,
        point: &Point3<f32>,
        view_projection: &Matrix4<f32>,
        viewport: Viewport,
    ) -> Option<ScreenPoint> {
        let clip = view_projection * point.to_homogeneous();

        // For a perspective projection w is the distance in front of the camera
        if clip.w < self.near {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let depth = clip.z / clip.w;

        Some(ScreenPoint {
            x: (ndc_x + 1.0) * 0.5 * viewport.width() as f32,
            y: (1.0 - ndc_y) * 0.5 * viewport.height() as f32,
            depth,
        })
    }
}
