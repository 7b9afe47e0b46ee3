//! The scene context shared by every event handler
//!
//! A [`Scene`] owns the camera, the crystal, its lights and the running tweens.
//! Hosts hold one scene and hand it to their resize, pointer and frame
//! callbacks in turn.

use std::time::Duration;

use nalgebra::{Point3, Vector3};

use crate::config::SceneConfig;
use crate::error::Result;
use crate::geometry::{Edge, Mesh};
use crate::lighting::{self, AmbientLight, Material, PointLight};
use crate::pointer::NormalizedPointer;
use crate::projection::Camera;
use crate::render::{Segment, Wireframe};
use crate::transform::{Pose, RotationState};
use crate::tween::{Tween, Tweener};
use crate::viewport::Viewport;

/// The wireframe object at the centre of the scene
#[derive(Debug, Clone)]
pub struct Crystal {
    pub mesh: Mesh,
    pub material: Material,
    pub pose: Pose,
    edges: Vec<Edge>,
}

impl Crystal {
    pub fn new(mesh: Mesh, material: Material) -> Self {
        let edges = mesh.edges();
        Self {
            mesh,
            material,
            pose: Pose::default(),
            edges,
        }
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

#[derive(Debug)]
pub struct Scene {
    config: SceneConfig,
    viewport: Viewport,
    camera: Camera,
    crystal: Crystal,
    ambient: AmbientLight,
    light: PointLight,
    rotation_tweens: Tweener<RotationState>,
    camera_tweens: Tweener<Point3<f32>>,
    frames: u64,
}

impl Scene {
    /// Bootstrap the camera, crystal and lights for an output of `viewport` size
    pub fn new(config: SceneConfig, viewport: Viewport) -> Self {
        let mut camera = Camera::new(viewport);
        camera.fov = config.camera.fov_degrees.to_radians();
        camera.near = config.camera.near;
        camera.far = config.camera.far;
        camera.position = Point3::from(config.camera.position);

        let crystal = Crystal::new(
            Mesh::icosahedron(config.crystal.radius),
            config.crystal.material,
        );

        tracing::info!(
            width = viewport.width(),
            height = viewport.height(),
            edges = crystal.edges().len(),
            "scene created"
        );

        Self {
            ambient: config.ambient_light,
            light: config.point_light,
            config,
            viewport,
            camera,
            crystal,
            rotation_tweens: Tweener::new(),
            camera_tweens: Tweener::new(),
            frames: 0,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn crystal(&self) -> &Crystal {
        &self.crystal
    }

    pub fn rotation(&self) -> RotationState {
        self.crystal.pose.rotation
    }

    /// Number of frames advanced so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Number of tweens still running, across rotation and camera
    pub fn active_tweens(&self) -> usize {
        self.rotation_tweens.len() + self.camera_tweens.len()
    }

    /// Match the camera aspect and output size to new dimensions
    ///
    /// Zero dimensions are rejected and leave the scene untouched.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<Viewport> {
        let viewport = Viewport::new(width, height)?;
        self.viewport = viewport;
        self.camera.set_viewport(viewport);
        tracing::info!(width, height, aspect = viewport.aspect(), "viewport resized");
        Ok(viewport)
    }

    /// Start rotation and camera tweens towards the pointer
    ///
    /// Every call starts two new tweens; earlier ones keep running.
    pub fn pointer_moved(&mut self, client_x: f32, client_y: f32) -> NormalizedPointer {
        let pointer = NormalizedPointer::from_client(client_x, client_y, self.viewport);
        let settings = &self.config.pointer;

        self.rotation_tweens.start(Tween::to(
            &self.crystal.pose.rotation,
            &pointer.rotation_destination(settings),
            settings.duration(),
            settings.ease,
        ));
        self.camera_tweens.start(Tween::to(
            &self.camera.position,
            &pointer.camera_destination(settings),
            settings.duration(),
            settings.ease,
        ));

        pointer
    }

    /// Run tweens for time `now`, then apply the idle spin
    pub fn advance(&mut self, now: Duration) {
        self.rotation_tweens
            .tick(&mut self.crystal.pose.rotation, now);
        self.camera_tweens.tick(&mut self.camera.position, now);

        let spin = f64::from(self.config.idle_spin);
        self.crystal.pose.rotation.rotate(spin, spin, 0.0);
        self.frames += 1;

        tracing::trace!(
            frame = self.frames,
            rotation_x = self.crystal.pose.rotation.x,
            rotation_y = self.crystal.pose.rotation.y,
            "frame advanced"
        );
    }

    /// Project the crystal's edges for the current viewport
    pub fn wireframe(&self) -> Wireframe {
        let model = self.crystal.pose.model_matrix();
        let view_projection = self.camera.view_projection();
        let vertices = &self.crystal.mesh.vertices;

        let segments = self
            .crystal
            .edges()
            .iter()
            .filter_map(|&(a, b)| {
                let start = model.transform_point(&vertices[a].position);
                let end = model.transform_point(&vertices[b].position);

                let from = self.camera.project(&start, &view_projection, self.viewport)?;
                let to = self.camera.project(&end, &view_projection, self.viewport)?;

                let midpoint = Point3::from((start.coords + end.coords) * 0.5);
                let normal = edge_normal(
                    &model.transform_vector(&vertices[a].normal),
                    &model.transform_vector(&vertices[b].normal),
                );
                let color = lighting::shade(
                    &self.crystal.material,
                    &self.ambient,
                    &self.light,
                    &midpoint,
                    &normal,
                );

                Some(Segment { from, to, color })
            })
            .collect();

        Wireframe {
            viewport: self.viewport,
            segments,
        }
    }
}

fn edge_normal(a: &Vector3<f32>, b: &Vector3<f32>) -> Vector3<f32> {
    (a + b).try_normalize(f32::EPSILON).unwrap_or_else(Vector3::z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Scene::new(SceneConfig::default(), Viewport::new(800, 600).unwrap())
    }

    fn secs(seconds: f32) -> Duration {
        Duration::from_secs_f32(seconds)
    }

    #[test]
    fn test_bootstrap() {
        let scene = scene();
        assert_eq!(scene.crystal().edges().len(), 30);
        assert_eq!(scene.camera().position, Point3::new(0.0, 0.0, 5.0));
        assert_eq!(scene.rotation(), RotationState::zero());
        assert_eq!(scene.active_tweens(), 0);
    }

    #[test]
    fn test_idle_spin_increases_every_frame() {
        let mut scene = scene();
        let mut previous = scene.rotation();
        for frame in 0..100 {
            scene.advance(secs(frame as f32 / 60.0));
            let current = scene.rotation();
            assert!(current.x > previous.x);
            assert!(current.y > previous.y);
            assert_eq!(current.z, 0.0);
            previous = current;
        }
        assert_eq!(scene.frames(), 100);
    }

    #[test]
    fn test_idle_spin_continues_at_large_angles() {
        let mut scene = scene();
        scene.crystal.pose.rotation = RotationState::new(32768.0, 32768.0, 0.0);
        let before = scene.rotation();
        scene.advance(secs(0.0));
        assert!(scene.rotation().x > before.x);
        assert!(scene.rotation().y > before.y);
    }

    #[test]
    fn test_pointer_starts_two_tweens_each_move() {
        let mut scene = scene();
        scene.pointer_moved(100.0, 100.0);
        scene.pointer_moved(200.0, 100.0);
        assert_eq!(scene.active_tweens(), 4);
    }

    #[test]
    fn test_pointer_tweens_reach_destination() {
        let mut scene = scene();
        // Right edge, vertical centre
        scene.pointer_moved(800.0, 300.0);

        scene.advance(secs(1.0));
        scene.advance(secs(2.0));
        scene.advance(secs(2.5));

        assert_eq!(scene.active_tweens(), 0);
        let spin = f64::from(scene.config().idle_spin);
        let rotation = scene.rotation();
        assert!((rotation.y - (0.5 + spin)).abs() < 1e-6);
        assert!((rotation.x - spin).abs() < 1e-6);
        assert!((scene.camera().position.x - 0.2).abs() < 1e-6);
        assert!(scene.camera().position.y.abs() < 1e-6);
        assert_eq!(scene.camera().position.z, 5.0);
    }

    #[test]
    fn test_centre_pointer_heads_to_origin() {
        let mut scene = scene();
        scene.pointer_moved(800.0, 0.0);
        scene.advance(secs(0.0));
        scene.advance(secs(1.5));

        scene.pointer_moved(400.0, 300.0);
        scene.advance(secs(2.0));
        scene.advance(secs(3.5));

        let camera = scene.camera().position;
        assert!(camera.x.abs() < 1e-6);
        assert!(camera.y.abs() < 1e-6);
        let spin = f64::from(scene.config().idle_spin);
        assert!((scene.rotation().x - spin).abs() < 1e-6);
        assert!((scene.rotation().y - spin).abs() < 1e-6);
    }

    #[test]
    fn test_resize_updates_aspect_and_viewport() {
        let mut scene = scene();
        let viewport = scene.resize(1280, 720).unwrap();
        assert_eq!(viewport, Viewport::new(1280, 720).unwrap());
        assert_eq!(scene.viewport(), viewport);
        assert!((scene.camera().aspect - 1280.0 / 720.0).abs() < 1e-6);
        assert_eq!(scene.wireframe().viewport, viewport);
    }

    #[test]
    fn test_resize_to_zero_keeps_previous_state() {
        let mut scene = scene();
        assert!(scene.resize(0, 720).is_err());
        assert_eq!(scene.viewport(), Viewport::new(800, 600).unwrap());
        assert!((scene.camera().aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_wireframe_draws_every_edge_in_view() {
        let scene = scene();
        let wireframe = scene.wireframe();
        assert_eq!(wireframe.segments.len(), 30);
        for segment in &wireframe.segments {
            for point in [segment.from, segment.to] {
                assert!(point.x > 0.0 && point.x < 800.0);
                assert!(point.y > 0.0 && point.y < 600.0);
            }
            assert!(segment.color.luminance() > 0.0);
        }
    }
}
