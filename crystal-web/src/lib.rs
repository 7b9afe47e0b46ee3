//! Crystal Web - WASM host for the crystal backdrop
//!
//! Appends a transparent canvas to the page's container element, draws the
//! crystal on every animation frame, steers it from `mousemove`, follows
//! window resizes, and reveals page sections as they scroll into view.
//!
//! ```js
//! import init, { start } from "./crystal_web.js";
//! await init();
//! const backdrop = start();
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crystal_core::{render, Reveal, Scene, SceneConfig, Surface, Viewport, VisibilityTracker};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    MouseEvent, Window,
};

mod canvas;

pub use canvas::CanvasSurface;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Handle to a running backdrop
///
/// Dropping (or calling `free()` from JavaScript) stops the animation and
/// detaches every listener.
#[wasm_bindgen]
pub struct CrystalBackdrop {
    window: Window,
    scene: Rc<RefCell<Scene>>,
    sections: Rc<RefCell<VisibilityTracker>>,
    running: Rc<Cell<bool>>,
    frame_request: Rc<Cell<Option<i32>>>,
    frame_callback: Rc<RefCell<Option<FrameCallback>>>,
    on_resize: Closure<dyn FnMut()>,
    on_mouse_move: Closure<dyn FnMut(MouseEvent)>,
    observer: IntersectionObserver,
    _on_intersect: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

/// Start the backdrop with the default scene
#[wasm_bindgen]
pub fn start() -> Result<CrystalBackdrop, JsValue> {
    CrystalBackdrop::start(SceneConfig::default())
}

/// Start the backdrop with a JSON scene config
#[wasm_bindgen]
pub fn start_with_config(config_json: &str) -> Result<CrystalBackdrop, JsValue> {
    let config = SceneConfig::from_json_str(config_json).map_err(to_js)?;
    CrystalBackdrop::start(config)
}

#[wasm_bindgen]
impl CrystalBackdrop {
    /// Frames drawn so far
    pub fn frames(&self) -> f64 {
        self.scene.borrow().frames() as f64
    }

    /// Number of watched sections revealed so far
    #[wasm_bindgen(js_name = visibleSections)]
    pub fn visible_sections(&self) -> u32 {
        self.sections.borrow().visible_count() as u32
    }

    /// Whether the section at `index` in document order has been revealed
    #[wasm_bindgen(js_name = isSectionVisible)]
    pub fn is_section_visible(&self, index: u32) -> bool {
        self.sections
            .borrow()
            .is_visible(&section_key(index as usize))
            .unwrap_or(false)
    }
}

impl CrystalBackdrop {
    fn start(config: SceneConfig) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;

        let page = config.page.clone();
        let container = document
            .get_element_by_id(&page.container_id)
            .ok_or_else(|| {
                JsValue::from_str(&format!("container #{} not found", page.container_id))
            })?;

        let viewport = window_viewport(&window)?;
        let mut surface = CanvasSurface::new(&document, window.device_pixel_ratio())?;
        surface.resize(viewport);
        container.append_child(surface.element())?;

        let scene = Rc::new(RefCell::new(Scene::new(config, viewport)));
        let surface = Rc::new(RefCell::new(surface));

        let on_resize = {
            let window = window.clone();
            let scene = scene.clone();
            let surface = surface.clone();
            Closure::<dyn FnMut()>::new(move || {
                let size = window_size(&window);
                let result = size.and_then(|(width, height)| {
                    render::resize(
                        &mut scene.borrow_mut(),
                        &mut *surface.borrow_mut(),
                        width,
                        height,
                    )
                    .map_err(to_js)
                });
                if let Err(err) = result {
                    tracing::warn!(?err, "ignoring resize");
                }
            })
        };
        window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

        let on_mouse_move = {
            let scene = scene.clone();
            Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                scene
                    .borrow_mut()
                    .pointer_moved(event.client_x() as f32, event.client_y() as f32);
            })
        };
        document.add_event_listener_with_callback(
            "mousemove",
            on_mouse_move.as_ref().unchecked_ref(),
        )?;

        let running = Rc::new(Cell::new(true));
        let frame_request = Rc::new(Cell::new(None));
        let frame_callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        {
            let window = window.clone();
            let scene = scene.clone();
            let running = running.clone();
            let frame_request = frame_request.clone();
            let next = frame_callback.clone();
            *frame_callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
                if !running.get() {
                    return;
                }
                let now = frame_time(timestamp);
                if let Err(err) =
                    render::render_frame(&mut scene.borrow_mut(), &mut *surface.borrow_mut(), now)
                {
                    tracing::warn!(?err, "frame failed");
                }
                if let Some(callback) = next.borrow().as_ref() {
                    frame_request.set(
                        window
                            .request_animation_frame(callback.as_ref().unchecked_ref())
                            .ok(),
                    );
                }
            }));
        }
        if let Some(callback) = frame_callback.borrow().as_ref() {
            frame_request.set(Some(
                window.request_animation_frame(callback.as_ref().unchecked_ref())?,
            ));
        }

        let sections = Rc::new(RefCell::new(VisibilityTracker::new(page.threshold)));
        let elements = watched_sections(&document, &page.sections)?;
        for index in 0..elements.len() {
            sections.borrow_mut().watch(section_key(index));
        }
        let observed = elements.clone();

        let on_intersect = {
            let sections = sections.clone();
            let visible_class = page.visible_class.clone();
            Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
                move |entries: js_sys::Array, _observer: IntersectionObserver| {
                    for entry in entries.iter() {
                        let entry: IntersectionObserverEntry = entry.unchecked_into();
                        if !entry.is_intersecting() {
                            continue;
                        }
                        let target = entry.target();
                        let Some(index) = elements.iter().position(|element| *element == target)
                        else {
                            continue;
                        };

                        let key = section_key(index);
                        let ratio = entry.intersection_ratio() as f32;
                        if sections.borrow_mut().update(&key, ratio) == Reveal::Revealed {
                            if let Err(err) = target.class_list().add_1(&visible_class) {
                                tracing::warn!(?err, section = %key, "failed to mark section");
                            }
                        }
                    }
                },
            )
        };

        let options = IntersectionObserverInit::new();
        options.set_root_margin("0px");
        options.set_threshold(&JsValue::from_f64(page.threshold as f64));
        let observer =
            IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options)?;
        for element in &observed {
            observer.observe(element);
        }

        tracing::info!(
            width = viewport.width(),
            height = viewport.height(),
            sections = sections.borrow().len(),
            "backdrop started"
        );

        Ok(Self {
            window,
            scene,
            sections,
            running,
            frame_request,
            frame_callback,
            on_resize,
            on_mouse_move,
            observer,
            _on_intersect: on_intersect,
        })
    }
}

impl Drop for CrystalBackdrop {
    fn drop(&mut self) {
        self.running.set(false);
        if let Some(id) = self.frame_request.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // The frame callback holds a handle to itself; release it
        self.frame_callback.borrow_mut().take();
        let _ = self.window.remove_event_listener_with_callback(
            "resize",
            self.on_resize.as_ref().unchecked_ref(),
        );
        if let Some(document) = self.window.document() {
            let _ = document.remove_event_listener_with_callback(
                "mousemove",
                self.on_mouse_move.as_ref().unchecked_ref(),
            );
        }
        self.observer.disconnect();
    }
}

fn to_js(err: crystal_core::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn window_size(window: &Window) -> Result<(u32, u32), JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((css_pixels(width), css_pixels(height)))
}

fn window_viewport(window: &Window) -> Result<Viewport, JsValue> {
    let (width, height) = window_size(window)?;
    Viewport::new(width, height).map_err(to_js)
}

fn watched_sections(document: &web_sys::Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Whole CSS pixels for a window dimension; negative or NaN becomes 0
fn css_pixels(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round() as u32
    } else {
        0
    }
}

/// Animation frame timestamps are milliseconds since page load
fn frame_time(timestamp_ms: f64) -> Duration {
    if timestamp_ms.is_finite() && timestamp_ms > 0.0 {
        Duration::from_secs_f64(timestamp_ms / 1000.0)
    } else {
        Duration::ZERO
    }
}

/// Sections are tracked by their position in the selector's match list,
/// so elements sharing an id are still revealed separately
fn section_key(index: usize) -> String {
    format!("section-{}", index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_key() {
        assert_eq!(section_key(0), "section-0");
        assert_eq!(section_key(3), "section-3");
    }

    #[test]
    fn test_sections_with_same_id_reveal_separately() {
        // Two matched elements, both `id="hero"`
        let mut tracker = VisibilityTracker::new(0.1);
        for index in 0..2 {
            tracker.watch(section_key(index));
        }
        assert_eq!(tracker.len(), 2);

        assert_eq!(tracker.update(&section_key(0), 0.5), Reveal::Revealed);
        assert_eq!(tracker.update(&section_key(1), 0.5), Reveal::Revealed);
        assert_eq!(tracker.visible_count(), 2);
    }

    #[test]
    fn test_frame_time() {
        assert_eq!(frame_time(1500.0), Duration::from_millis(1500));
        assert_eq!(frame_time(-4.0), Duration::ZERO);
        assert_eq!(frame_time(f64::NAN), Duration::ZERO);
    }

    #[test]
    fn test_css_pixels() {
        assert_eq!(css_pixels(1280.4), 1280);
        assert_eq!(css_pixels(-1.0), 0);
        assert_eq!(css_pixels(f64::INFINITY), 0);
    }
}
