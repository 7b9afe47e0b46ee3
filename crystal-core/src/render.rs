//! Frame output and the per-frame loop body
//!
//! Hosts implement [`Surface`] for whatever they draw on and call
//! [`render_frame`] once per display refresh.

use std::time::Duration;

use crate::error::Result;
use crate::lighting::Color;
use crate::projection::ScreenPoint;
use crate::scene::Scene;
use crate::viewport::Viewport;

/// One projected, lit edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: ScreenPoint,
    pub to: ScreenPoint,
    pub color: Color,
}

/// Everything a surface needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Wireframe {
    pub viewport: Viewport,
    pub segments: Vec<Segment>,
}

/// Something a wireframe can be drawn onto
pub trait Surface {
    type Error;

    /// Change the output size; subsequent frames are drawn at this size
    fn resize(&mut self, viewport: Viewport);

    /// Replace the surface contents with `frame`
    fn present(&mut self, frame: &Wireframe) -> std::result::Result<(), Self::Error>;
}

/// Advance the scene to `now` and draw it
pub fn render_frame<S: Surface>(
    scene: &mut Scene,
    surface: &mut S,
    now: Duration,
) -> std::result::Result<(), S::Error> {
    scene.advance(now);
    surface.present(&scene.wireframe())
}

/// Resize the scene and its surface together
pub fn resize<S: Surface>(
    scene: &mut Scene,
    surface: &mut S,
    width: u32,
    height: u32,
) -> Result<Viewport> {
    let viewport = scene.resize(width, height)?;
    surface.resize(viewport);
    Ok(viewport)
}
