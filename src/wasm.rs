//! WASM API module for browser/JS interop
//!
//! Exposes the token codec and the emoji rain to JavaScript:
//!
//! ```js
//! import init, { encode, decode, createAnimation } from "emojirain";
//!
//! await init();
//! location.hash = encode({ tab: "settings", zoom: 2 });
//! const state = decode(location.hash.slice(1));
//!
//! const rain = createAnimation(); // needs <div id="animate"> to be visible
//! rain.stop();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::animation::{translate3d, Animation, RenderableSprite, SpriteSurface, CONTAINER_ID};
use crate::color::Hue;
use crate::codec::{compress, decompress};

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Encode a JSON-serializable JS value into a URL-safe token.
///
/// Throws when `JSON.stringify` does (cycles, BigInt) or produces nothing
/// (`undefined`, functions).
#[wasm_bindgen]
pub fn encode(value: &JsValue) -> Result<String, JsValue> {
    let json = js_sys::JSON::stringify(value)?;
    let json = JsValue::from(json)
        .as_string()
        .ok_or_else(|| JsValue::from(js_sys::TypeError::new("value is not JSON-serializable")))?;
    Ok(compress(&json))
}

/// Decode a token produced by [`encode`]. Throws on invalid tokens.
#[wasm_bindgen]
pub fn decode(token: &str) -> Result<JsValue, JsValue> {
    let json = decompress(token)
        .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))?;
    js_sys::JSON::parse(&json)
}

/// A `<span>` in the page, or nothing if it could not be created.
pub struct DomSprite {
    element: Option<HtmlElement>,
}

impl DomSprite {
    fn set_style(&self, property: &str, value: &str) {
        if let Some(element) = &self.element {
            if let Err(err) = element.style().set_property(property, value) {
                log::warn!("failed to set {} on sprite: {:?}", property, err);
            }
        }
    }
}

impl RenderableSprite for DomSprite {
    fn set_position(&mut self, x: f64, y: f64) {
        self.set_style("transform", &translate3d(x, y));
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.set_style("opacity", &opacity.to_string());
    }

    fn set_color(&mut self, hue: Hue) {
        self.set_style("color", &hue.css());
    }

    fn set_font_size(&mut self, px: u32) {
        self.set_style("font-size", &format!("{}px", px));
    }
}

/// Creates sprite spans inside `#animate`.
///
/// Without the container, spans are still created but never attached.
pub struct DomSurface {
    document: Document,
    container: Option<Element>,
}

impl DomSurface {
    pub fn new(document: Document) -> Self {
        let container = document.get_element_by_id(CONTAINER_ID);
        Self { document, container }
    }

    fn create_span(&self, glyph: &str) -> Result<HtmlElement, JsValue> {
        let span = self.document.create_element("span")?.dyn_into::<HtmlElement>()?;
        span.style().set_property("position", "absolute")?;
        span.set_text_content(Some(glyph));
        if let Some(container) = &self.container {
            container.append_child(&span)?;
        }
        Ok(span)
    }
}

impl SpriteSurface for DomSurface {
    type Sprite = DomSprite;

    fn create_sprite(&mut self, glyph: &str) -> DomSprite {
        match self.create_span(glyph) {
            Ok(element) => DomSprite { element: Some(element) },
            Err(err) => {
                log::warn!("failed to create sprite element: {:?}", err);
                DomSprite { element: None }
            }
        }
    }

    fn is_attached(&self) -> bool {
        self.container.is_some()
    }
}

type FrameCallback = Closure<dyn FnMut(f64)>;

struct FrameLoop {
    animation: Animation<DomSurface>,
    /// `performance.now()` at creation; elapsed time is measured from here.
    /// Falls back to the first frame's timestamp without a `Performance`.
    origin: Option<f64>,
    frame_id: Option<i32>,
    callback: Option<FrameCallback>,
}

impl FrameLoop {
    fn request_frame(&mut self, window: &Window) {
        let Some(callback) = &self.callback else {
            return;
        };
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => self.frame_id = Some(id),
            Err(err) => log::warn!("requestAnimationFrame failed: {:?}", err),
        }
    }

    fn on_frame(&mut self, window: &Window, timestamp: f64) {
        if self.animation.is_stopped() {
            return;
        }
        let origin = *self.origin.get_or_insert(timestamp);
        self.animation.advance(elapsed_since(origin, timestamp));
        self.request_frame(window);
    }
}

/// Milliseconds from `origin` to a frame timestamp, never negative.
fn elapsed_since(origin: f64, timestamp: f64) -> f64 {
    (timestamp - origin).max(0.0)
}

/// A running emoji rain. Call `stop()` to end it.
#[wasm_bindgen]
pub struct AnimationHandle {
    window: Window,
    state: Rc<RefCell<FrameLoop>>,
}

#[wasm_bindgen]
impl AnimationHandle {
    /// Cancel the frame loop. Sprites stay where they are.
    pub fn stop(&self) {
        let callback = {
            let mut state = self.state.borrow_mut();
            state.animation.stop();
            if let Some(id) = state.frame_id.take() {
                if let Err(err) = self.window.cancel_animation_frame(id) {
                    log::warn!("cancelAnimationFrame failed: {:?}", err);
                }
            }
            state.callback.take()
        };
        // Dropping the closure breaks the state <-> closure cycle
        drop(callback);
    }

    #[wasm_bindgen(getter, js_name = isStopped)]
    pub fn is_stopped(&self) -> bool {
        self.state.borrow().animation.is_stopped()
    }

    /// Sprites created so far
    #[wasm_bindgen(getter, js_name = spriteCount)]
    pub fn sprite_count(&self) -> usize {
        self.state.borrow().animation.active_count()
    }

    /// Sprites still waiting for their creation time
    #[wasm_bindgen(getter, js_name = pendingCount)]
    pub fn pending_count(&self) -> usize {
        self.state.borrow().animation.pending_count()
    }

    /// Whether `#animate` was found
    #[wasm_bindgen(getter)]
    pub fn attached(&self) -> bool {
        self.state.borrow().animation.surface().is_attached()
    }
}

/// Start the emoji rain in `#animate`.
///
/// A missing container is not an error: sprites are created but not shown.
#[wasm_bindgen(js_name = createAnimation)]
pub fn create_animation() -> Result<AnimationHandle, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("window has no document"))?;

    // Wave delays count from this call, not from the first frame
    let origin = window.performance().map(|performance| performance.now());
    let animation = Animation::start_with_thread_rng(DomSurface::new(document));
    let state = Rc::new(RefCell::new(FrameLoop {
        animation,
        origin,
        frame_id: None,
        callback: None,
    }));

    let callback = {
        let state = Rc::clone(&state);
        let window = window.clone();
        Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
            state.borrow_mut().on_frame(&window, timestamp);
        })
    };

    {
        let mut frame_loop = state.borrow_mut();
        frame_loop.callback = Some(callback);
        frame_loop.request_frame(&window);
    }

    Ok(AnimationHandle { window, state })
}
