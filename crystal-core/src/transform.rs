//! 3D transformation matrices, rotation and pose records
use std::f64::consts::TAU;

use nalgebra::{Matrix4, Point3, Vector3};

use crate::tween::{Animatable, Axis};

/// Rotation state around three axes (in radians)
///
/// Angles accumulate without wrapping, so they are kept in `f64` to stay
/// precise enough for a per-frame spin after days of running.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

impl Animatable for RotationState {
    fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
    }
}

impl Animatable for Point3<f32> {
    fn get(&self, axis: Axis) -> f64 {
        let value = match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        };
        f64::from(value)
    }

    fn set(&mut self, axis: Axis, value: f64) {
        let value = value as f32;
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
    }
}

/// Rotation and position of an object in the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub rotation: RotationState,
    pub position: Point3<f32>,
}

impl Pose {
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Transform::translation_matrix(self.position.x, self.position.y, self.position.z)
            * Transform::rotation_matrix(&self.rotation)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            rotation: RotationState::zero(),
            position: Point3::origin(),
        }
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a rotation matrix from a rotation state
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        // Wrap before narrowing so large angles keep their fractional turn
        let angle = |radians: f64| radians.rem_euclid(TAU) as f32;
        let rx = Matrix4::new_rotation(Vector3::new(angle(rotation.x), 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, angle(rotation.y), 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, angle(rotation.z)));

        // Intrinsic X, then Y, then Z
        rx * ry * rz
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state.x, 0.0);
        assert_eq!(state.y, 0.0);
        assert_eq!(state.z, 0.0);

        state.rotate(0.1, 0.2, 0.3);
        assert!((state.x - 0.1).abs() < 1e-6);
        assert!((state.y - 0.2).abs() < 1e-6);
        assert!((state.z - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_identity_rotation() {
        let rotation = RotationState::zero();
        let matrix = Transform::rotation_matrix(&rotation);
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_rotation_fields_are_animatable() {
        let mut state = RotationState::zero();
        state.set(Axis::Y, 0.25);
        assert_eq!(state.get(Axis::Y), 0.25);
        assert_eq!(state.get(Axis::X), 0.0);
    }

    #[test]
    fn test_pose_translates_after_rotating() {
        let pose = Pose {
            rotation: RotationState::new(0.0, std::f64::consts::FRAC_PI_2, 0.0),
            position: Point3::new(0.0, 0.0, -3.0),
        };
        // +X rotated a quarter turn about Y lands on -Z, then shifts by -3
        let moved = pose.model_matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert!(moved.x.abs() < 1e-6);
        assert!((moved.z + 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_large_angles_keep_turning() {
        let mut state = RotationState::new(32768.0, 0.0, 0.0);
        let before = state.x;
        state.rotate(0.001, 0.0, 0.0);
        assert!(state.x > before);

        // The step still shows up in the matrix
        let difference = Transform::rotation_matrix(&state)
            - Transform::rotation_matrix(&RotationState::new(before, 0.0, 0.0));
        assert!(difference.norm() > 1e-4);
    }
}
