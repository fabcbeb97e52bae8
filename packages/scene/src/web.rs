//! Browser driver: canvas surface, `requestAnimationFrame` loop and resize
//! listener.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::render_loop::{FrameOutcome, RenderLoop, StopHandle};
use crate::renderer::{Segment, Surface};

const CANVAS_STYLE: &str = "position:fixed;top:0;left:0;width:100%;height:100%;\
pointer-events:none;background:transparent;";

/// A 2D canvas with a transparent background.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SceneError> {
        let context = canvas
            .get_context("2d")?
            .ok_or(SceneError::UnsupportedContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SceneError::UnsupportedContext)?;
        Ok(Self { canvas, context })
    }
}

impl Surface for CanvasSurface {
    fn set_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear(&mut self) {
        self.context.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn stroke(&mut self, segments: &[Segment], color: &str) {
        let ctx = &self.context;
        ctx.set_stroke_style_str(color);
        ctx.set_line_width(1.0);
        ctx.begin_path();
        for segment in segments {
            ctx.move_to(segment.from.x as f64, segment.from.y as f64);
            ctx.line_to(segment.to.x as f64, segment.to.y as f64);
        }
        ctx.stroke();
    }
}

fn viewport(window: &Window) -> (u32, u32) {
    let dimension = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(1.0).max(1.0) as u32
    };
    (dimension(window.inner_width()), dimension(window.inner_height()))
}

/// Mount the scene canvas into the configured container and start rendering.
///
/// Runs until the returned handle is stopped. The resize listener lives for
/// the rest of the page.
pub fn start(config: &SceneConfig) -> Result<StopHandle, SceneError> {
    let window = web_sys::window().ok_or(SceneError::NoWindow)?;
    let document = window.document().ok_or(SceneError::NoDocument)?;
    let container = document
        .get_element_by_id(&config.container_id)
        .ok_or_else(|| SceneError::MissingContainer(config.container_id.clone()))?;

    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| SceneError::Js("created element is not a canvas".into()))?;
    canvas.set_attribute("style", CANVAS_STYLE)?;
    container.append_child(&canvas)?;

    let (width, height) = viewport(&window);
    let surface = CanvasSurface::new(canvas)?;
    let render_loop = Rc::new(RefCell::new(RenderLoop::new(config, surface, width, height)));
    let stop = render_loop.borrow().stop_handle();

    let on_resize = {
        let render_loop = render_loop.clone();
        let window = window.clone();
        Closure::wrap(Box::new(move || {
            let (width, height) = viewport(&window);
            if render_loop.borrow_mut().resize(width, height) {
                tracing::debug!(width, height, "scene resized");
            }
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    // The frame closure reschedules itself through this slot.
    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let first = frame.clone();
    {
        let window = window.clone();
        *first.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if render_loop.borrow_mut().advance() == FrameOutcome::Stopped {
                tracing::info!("scene stopped");
                return;
            }
            if let Some(callback) = frame.borrow().as_ref() {
                if let Err(err) = window.request_animation_frame(callback.as_ref().unchecked_ref())
                {
                    tracing::error!("requestAnimationFrame failed: {err:?}");
                }
            }
        }) as Box<dyn FnMut()>));
    }

    if let Some(callback) = first.borrow().as_ref() {
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }

    tracing::info!(width, height, "scene started");
    Ok(stop)
}
