//! Browser backends (wasm32 only).
//!
//! Each submodule implements one capability from `crate::theme::ports`
//! against `web-sys`; `bindings` wires them together at page load and
//! exports the JavaScript surface.

mod bindings;
pub mod dom;
pub mod media;
pub mod storage;
pub mod timer;

pub use bindings::{set_theme, start, toggle_theme};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Window};

use crate::error::ThemeError;
use crate::ready::ReadyGate;

/// Describe a thrown JS value for logging.
pub(crate) fn js_detail(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", err))
}

pub(crate) fn js_error(context: &str, err: JsValue) -> ThemeError {
    ThemeError::Dom(format!("{}: {}", context, js_detail(&err)))
}

pub(crate) fn window() -> Result<Window, ThemeError> {
    web_sys::window().ok_or_else(|| ThemeError::Dom("no global window".into()))
}

pub(crate) fn document() -> Result<Document, ThemeError> {
    window()?
        .document()
        .ok_or_else(|| ThemeError::Dom("window has no document".into()))
}

/// Run `gate` now, or on `DOMContentLoaded` if the document is still loading.
pub(crate) fn when_ready(document: &Document, gate: ReadyGate) -> Result<(), ThemeError> {
    let loading = document.ready_state() == "loading";
    let mut result = Ok(());
    gate.run_when_ready(loading, |trigger| {
        let listener = Closure::once_into_js(move || trigger());
        result = document
            .add_event_listener_with_callback("DOMContentLoaded", listener.unchecked_ref())
            .map_err(|e| js_error("DOMContentLoaded listener", e));
    });
    result
}
