//! 2D canvas surface for the wireframe
use crystal_core::{Surface, Viewport, Wireframe};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

/// Stroke width in CSS pixels
const LINE_WIDTH: f64 = 1.0;

/// A transparent canvas the crystal is stroked onto
///
/// The backing store is scaled by the device pixel ratio while drawing
/// happens in CSS pixels, so the scene's viewport stays in CSS pixels.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    pixel_ratio: f64,
    viewport: Option<Viewport>,
}

impl CanvasSurface {
    pub fn new(document: &Document, pixel_ratio: f64) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d canvas context is not available"))?
            .dyn_into()?;

        Ok(Self {
            canvas,
            context,
            pixel_ratio: sanitize_pixel_ratio(pixel_ratio),
            viewport: None,
        })
    }

    pub fn element(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn apply_size(&self, viewport: Viewport) -> Result<(), JsValue> {
        let (width, height) = backing_size(viewport, self.pixel_ratio);
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.canvas.set_attribute(
            "style",
            &format!(
                "display:block;width:{}px;height:{}px",
                viewport.width(), viewport.height()
            ),
        )?;
        // Resizing resets the context state, including the transform
        self.context
            .set_transform(self.pixel_ratio, 0.0, 0.0, self.pixel_ratio, 0.0, 0.0)
    }
}

impl Surface for CanvasSurface {
    type Error = JsValue;

    fn resize(&mut self, viewport: Viewport) {
        if let Err(err) = self.apply_size(viewport) {
            tracing::warn!(?err, "failed to resize canvas");
        }
        self.viewport = Some(viewport);
    }

    fn present(&mut self, frame: &Wireframe) -> Result<(), JsValue> {
        if self.viewport != Some(frame.viewport) {
            self.apply_size(frame.viewport)?;
            self.viewport = Some(frame.viewport);
        }

        let context = &self.context;
        context.clear_rect(
            0.0,
            0.0,
            frame.viewport.width() as f64,
            frame.viewport.height() as f64,
        );
        context.set_line_width(LINE_WIDTH);

        for segment in &frame.segments {
            context.begin_path();
            context.set_stroke_style_str(&segment.color.to_css());
            context.move_to(segment.from.x as f64, segment.from.y as f64);
            context.line_to(segment.to.x as f64, segment.to.y as f64);
            context.stroke();
        }
        Ok(())
    }
}

fn sanitize_pixel_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

/// Backing store size in device pixels for a viewport in CSS pixels
pub(crate) fn backing_size(viewport: Viewport, pixel_ratio: f64) -> (u32, u32) {
    let scale = |value: u32| ((value as f64 * pixel_ratio).round() as u32).max(1);
    (scale(viewport.width()), scale(viewport.height()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backing_size_scales_by_ratio() {
        let viewport = Viewport::new(800, 600).unwrap();
        assert_eq!(backing_size(viewport, 1.0), (800, 600));
        assert_eq!(backing_size(viewport, 2.0), (1600, 1200));
        assert_eq!(backing_size(viewport, 1.5), (1200, 900));
    }

    #[test]
    fn test_bad_pixel_ratio_falls_back() {
        assert_eq!(sanitize_pixel_ratio(0.0), 1.0);
        assert_eq!(sanitize_pixel_ratio(f64::NAN), 1.0);
        assert_eq!(sanitize_pixel_ratio(2.0), 2.0);
    }
}
