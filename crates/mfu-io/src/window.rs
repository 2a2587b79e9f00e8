//! Window-level drag-and-drop guard.
//!
//! A file dropped anywhere outside the drop zone makes the browser
//! navigate to it, discarding the page. [`DefaultPreventionGuard`]
//! suppresses the default action of `drop` and `dragover` on the whole
//! window for as long as it lives, and removes its listeners when
//! dropped.

use std::fmt;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Window events whose default action is suppressed.
const GUARDED_EVENTS: [&str; 2] = ["drop", "dragover"];

/// Errors that can occur when installing the window listeners.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// A browser API call returned an error.
    #[error("window listener error: {0}")]
    JsError(String),
}

impl From<JsValue> for ListenerError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Keeps the window's `drop`/`dragover` default actions suppressed.
///
/// The listener closure must outlive its registration, so the guard
/// owns it and unregisters both events in [`Drop`].
pub struct DefaultPreventionGuard {
    window: web_sys::Window,
    listener: Closure<dyn FnMut(web_sys::Event)>,
}

impl DefaultPreventionGuard {
    /// Register the listeners on the global window.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::JsError`] if there is no global window
    /// or a listener cannot be added. Listeners added before the
    /// failure are removed again.
    pub fn install() -> Result<Self, ListenerError> {
        let window =
            web_sys::window().ok_or_else(|| ListenerError::JsError("no global window".into()))?;
        let listener =
            Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
                event.prevent_default();
                event.stop_propagation();
            });

        // Build the guard first so an early return unregisters whatever
        // was already added.
        let guard = Self { window, listener };
        for name in GUARDED_EVENTS {
            guard
                .window
                .add_event_listener_with_callback(name, guard.listener.as_ref().unchecked_ref())?;
        }
        Ok(guard)
    }

    /// Remove the listeners now.
    pub fn dispose(self) {
        drop(self);
    }
}

impl Drop for DefaultPreventionGuard {
    fn drop(&mut self) {
        for name in GUARDED_EVENTS {
            // Removing a listener that was never added is a no-op.
            let _ = self
                .window
                .remove_event_listener_with_callback(name, self.listener.as_ref().unchecked_ref());
        }
    }
}

impl fmt::Debug for DefaultPreventionGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultPreventionGuard")
            .field("events", &GUARDED_EVENTS)
            .finish_non_exhaustive()
    }
}
