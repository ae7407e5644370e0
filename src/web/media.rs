//! `prefers-color-scheme` via `matchMedia`.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{MediaQueryList, MediaQueryListEvent};

use super::{js_error, window};
use crate::error::ThemeError;
use crate::theme::{SchemeHandler, SystemScheme, Theme};

pub struct MediaScheme {
    query: MediaQueryList,
}

impl MediaScheme {
    /// `query` should match when the host prefers dark,
    /// e.g. `(prefers-color-scheme: dark)`.
    pub fn new(query: &str) -> Result<Self, ThemeError> {
        let query = window()?
            .match_media(query)
            .map_err(|e| js_error("matchMedia", e))?
            .ok_or_else(|| ThemeError::Dom("matchMedia returned null".into()))?;
        Ok(Self { query })
    }
}

impl SystemScheme for MediaScheme {
    fn current(&self) -> Theme {
        Theme::from_prefers_dark(self.query.matches())
    }

    fn watch(&self, handler: SchemeHandler) -> Result<(), ThemeError> {
        let listener = Closure::<dyn FnMut(MediaQueryListEvent)>::new(
            move |event: MediaQueryListEvent| handler(Theme::from_prefers_dark(event.matches())),
        );
        self.query
            .add_event_listener_with_callback("change", listener.as_ref().unchecked_ref())
            .map_err(|e| js_error("matchMedia change listener", e))?;
        // Lives as long as the page
        listener.forget();
        Ok(())
    }
}
