//! requestAnimationFrame loop with cancel-on-drop

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A running frame loop. Dropping it cancels the pending frame and frees
/// the callback; nothing runs after that.
pub struct FrameLoop {
    callback: FrameCallback,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    /// Call `on_frame` with the frame timestamp (ms) every animation frame
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        // The closure re-arms itself through a weak handle so the loop
        // doesn't keep itself alive
        let weak = Rc::downgrade(&callback);
        let pending_inner = pending.clone();
        *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
            pending_inner.set(None);
            on_frame(time);

            let Some(callback) = weak.upgrade() else {
                return;
            };
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Some(cb) = callback.borrow().as_ref() {
                match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => pending_inner.set(Some(id)),
                    Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
                }
            }
        }));

        if let Some(cb) = callback.borrow().as_ref() {
            let id = window.request_animation_frame(cb.as_ref().unchecked_ref())?;
            pending.set(Some(id));
        }

        Ok(Self { callback, pending })
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let (Some(id), Some(window)) = (self.pending.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
        self.callback.borrow_mut().take();
    }
}
