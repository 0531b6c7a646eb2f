//! DOM input subscription.
//!
//! Keyboard listeners go on `window` so keys arrive regardless of focus;
//! pointer listeners go on the canvas only.

use crate::js_error;
use cs_core::{KeyAction, Modifiers, PointerAction, RawKeyInput, RawPointerInput, Result};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};

const POINTER_EVENTS: [&str; 3] = ["mousedown", "mouseup", "mousemove"];
const KEY_EVENTS: [&str; 3] = ["keydown", "keyup", "keypress"];

/// Live DOM subscriptions. The closures must outlive the registrations, so
/// they are owned here until `unsubscribe`.
pub(crate) struct Listeners {
    window: Window,
    canvas: HtmlCanvasElement,
    pointer: Closure<dyn FnMut(MouseEvent)>,
    key: Closure<dyn FnMut(KeyboardEvent)>,
}

impl Listeners {
    pub(crate) fn subscribe(
        window: Window,
        canvas: HtmlCanvasElement,
        mut on_pointer: impl FnMut(RawPointerInput) + 'static,
        mut on_key: impl FnMut(RawKeyInput) + 'static,
    ) -> Result<Self> {
        let pointer = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            if let Some(raw) = raw_pointer(&event) {
                on_pointer(raw);
            }
        });
        let key = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if let Some(raw) = raw_key(&event) {
                on_key(raw);
            }
        });
        let listeners = Self {
            window,
            canvas,
            pointer,
            key,
        };
        for ty in POINTER_EVENTS {
            add(&listeners.canvas, ty, listeners.pointer.as_ref().unchecked_ref())?;
        }
        for ty in KEY_EVENTS {
            add(&listeners.window, ty, listeners.key.as_ref().unchecked_ref())?;
        }
        log::debug!("input listeners attached");
        Ok(listeners)
    }

    pub(crate) fn unsubscribe(self) {
        for ty in POINTER_EVENTS {
            remove(&self.canvas, ty, self.pointer.as_ref().unchecked_ref());
        }
        for ty in KEY_EVENTS {
            remove(&self.window, ty, self.key.as_ref().unchecked_ref());
        }
        log::debug!("input listeners detached");
    }
}

fn add(target: &EventTarget, ty: &str, callback: &js_sys::Function) -> Result<()> {
    target
        .add_event_listener_with_callback(ty, callback)
        .map_err(js_error)
}

fn remove(target: &EventTarget, ty: &str, callback: &js_sys::Function) {
    if let Err(err) = target.remove_event_listener_with_callback(ty, callback) {
        log::warn!("removeEventListener({ty}) failed: {err:?}");
    }
}

fn raw_pointer(event: &MouseEvent) -> Option<RawPointerInput> {
    let action = PointerAction::from_dom_type(&event.type_())?;
    Some(RawPointerInput {
        action,
        client_x: f64::from(event.client_x()),
        client_y: f64::from(event.client_y()),
        button: event.button(),
        modifiers: Modifiers {
            alt: event.alt_key(),
            ctrl: event.ctrl_key(),
            shift: event.shift_key(),
        },
    })
}

fn raw_key(event: &KeyboardEvent) -> Option<RawKeyInput> {
    let action = KeyAction::from_dom_type(&event.type_())?;
    Some(RawKeyInput {
        action,
        key: event.key(),
        key_code: event.key_code(),
        repeat: event.repeat(),
        modifiers: Modifiers {
            alt: event.alt_key(),
            ctrl: event.ctrl_key(),
            shift: event.shift_key(),
        },
    })
}
