//! Browser host: requestAnimationFrame scheduling and the `WebGame` export

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::{FrameHandle, FrameScheduler};
use crate::engine::{GameEngine, GameEvent};
use crate::renderer::CanvasSurface;
use crate::settings::Settings;
use crate::viewport::Viewport;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Schedules engine frames with `window.requestAnimationFrame`.
///
/// One shared callback serves every request; `due` remembers which handle the
/// next animation frame belongs to.
pub struct RafScheduler {
    window: Window,
    callback: Rc<RefCell<Option<FrameCallback>>>,
    due: Rc<Cell<Option<FrameHandle>>>,
    raf_id: Option<i32>,
    next_id: u64,
}

impl RafScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: Rc::new(RefCell::new(None)),
            due: Rc::new(Cell::new(None)),
            raf_id: None,
            next_id: 0,
        }
    }

    /// Install the animation callback (set once the engine exists)
    pub fn set_callback(&self, callback: FrameCallback) {
        *self.callback.borrow_mut() = Some(callback);
    }

    /// Slot holding the handle of the next animation frame
    pub fn due_cell(&self) -> Rc<Cell<Option<FrameHandle>>> {
        self.due.clone()
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);

        let callback = self.callback.borrow();
        match callback.as_ref() {
            Some(cb) => match self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                Ok(id) => {
                    self.raf_id = Some(id);
                    self.due.set(Some(handle));
                }
                Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
            },
            None => log::warn!("Frame requested before the callback was installed"),
        }
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.due.get() != Some(handle) {
            return;
        }
        if let Some(id) = self.raf_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        self.due.set(None);
    }
}

pub type WebEngine = GameEngine<RafScheduler, CanvasSurface>;
type SharedListener = Rc<RefCell<Option<Box<dyn FnMut(&GameEvent)>>>>;

/// The game bound to one `<canvas>`, as exported to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    engine: Rc<RefCell<WebEngine>>,
    listener: SharedListener,
}

#[wasm_bindgen]
impl WebGame {
    /// Bind to the canvas with the given element id
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebGame, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let settings = Settings::load();

        let surface = CanvasSurface::from_element_id(canvas_id)?;
        let canvas = surface.canvas();
        let viewport = Viewport::fit(
            canvas.client_width() as f32,
            canvas.client_height() as f32,
            &settings,
        );
        surface.set_size(viewport.width, viewport.height);

        let scheduler = RafScheduler::new(window);
        let due = scheduler.due_cell();
        let engine = Rc::new(RefCell::new(GameEngine::new(settings, scheduler)));
        engine.borrow_mut().init(surface);

        let listener: SharedListener = Rc::new(RefCell::new(None));
        let callback = frame_callback(Rc::downgrade(&engine), due, listener.clone());
        engine.borrow().scheduler().set_callback(callback);

        Ok(WebGame { engine, listener })
    }

    pub fn start(&self) {
        self.engine.borrow_mut().start();
    }

    pub fn stop(&self) {
        self.engine.borrow_mut().stop();
    }

    #[wasm_bindgen(js_name = togglePause)]
    pub fn toggle_pause(&self) {
        self.engine.borrow_mut().toggle_pause();
    }

    pub fn jump(&self) -> bool {
        self.engine.borrow_mut().jump()
    }

    /// Returns false for an unknown feature name
    #[wasm_bindgen(js_name = setFeature)]
    pub fn set_feature(&self, name: &str, enabled: bool) -> bool {
        let mut engine = self.engine.borrow_mut();
        let known = engine.set_feature_by_name(name, enabled);
        if known {
            engine.settings().save();
        }
        known
    }

    /// Register `callback(type, payload)`, replacing any previous listener
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&self, callback: js_sys::Function) {
        self.set_listener(move |event| {
            let name = JsValue::from_str(event.name());
            let payload = JsValue::from_f64(event.payload());
            if let Err(e) = callback.call2(&JsValue::NULL, &name, &payload) {
                log::warn!("Event listener threw: {:?}", e);
            }
        });
    }

    /// Refit the canvas to a new container size
    pub fn resize(&self, container_width: f32, container_height: f32) {
        let mut engine = self.engine.borrow_mut();
        let viewport = Viewport::fit(container_width, container_height, engine.settings());
        if let Some(surface) = engine.target_mut() {
            surface.set_size(viewport.width, viewport.height);
        }
        engine.resize();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.engine.borrow().is_running()
    }
}

impl WebGame {
    /// Rust-side listener registration
    pub fn set_listener(&self, listener: impl FnMut(&GameEvent) + 'static) {
        *self.listener.borrow_mut() = Some(Box::new(listener));
    }

    pub fn engine(&self) -> &Rc<RefCell<WebEngine>> {
        &self.engine
    }
}

/// Animation callback: run the due frame, then hand its events to the
/// listener once the engine is no longer borrowed. Without a listener the
/// frame's events are dropped.
fn frame_callback(
    engine: Weak<RefCell<WebEngine>>,
    due: Rc<Cell<Option<FrameHandle>>>,
    listener: SharedListener,
) -> FrameCallback {
    Closure::new(move |_time: f64| {
        let Some(handle) = due.take() else {
            return;
        };
        let Some(engine) = engine.upgrade() else {
            return;
        };

        let events = {
            let mut engine = engine.borrow_mut();
            engine.on_frame(handle);
            engine.drain_events()
        };
        if events.is_empty() {
            return;
        }

        // Taken out while it runs so the listener may replace itself
        let taken = listener.borrow_mut().take();
        if let Some(mut callback) = taken {
            for event in &events {
                callback(event);
            }
            let mut slot = listener.borrow_mut();
            if slot.is_none() {
                *slot = Some(callback);
            }
        }
    })
}

/// Install the panic hook and console logger
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("Logger already installed");
    }
}
