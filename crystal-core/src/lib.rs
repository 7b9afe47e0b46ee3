//! Crystal Core Library - scene state, tweening and wireframe projection
//!
//! This library holds everything about the rotating crystal backdrop that
//! does not depend on where it is drawn: the scene context, the tween
//! runner, pointer mapping, section reveal tracking and edge projection.

pub mod config;
pub mod easing;
pub mod error;
pub mod geometry;
pub mod lighting;
pub mod pointer;
pub mod projection;
pub mod render;
pub mod scene;
pub mod transform;
pub mod tween;
pub mod viewport;
pub mod visibility;

// Re-export commonly used types
pub use config::SceneConfig;
pub use easing::Easing;
pub use error::{Error, Result};
pub use geometry::{Mesh, Vertex};
pub use lighting::Color;
pub use projection::{Camera, ScreenPoint};
pub use render::{render_frame, Segment, Surface, Wireframe};
pub use scene::Scene;
pub use transform::{Pose, RotationState, Transform};
pub use tween::{Animatable, Axis, Tween, Tweener};
pub use viewport::Viewport;
pub use visibility::{Reveal, VisibilityTracker};
