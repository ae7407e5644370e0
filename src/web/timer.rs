//! `setTimeout` timer.

use std::time::Duration;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::{js_error, window};
use crate::error::ThemeError;
use crate::theme::Timer;

pub struct WindowTimer;

impl Timer for WindowTimer {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Result<(), ThemeError> {
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let callback = Closure::once_into_js(move || task());
        window()?
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                millis,
            )
            .map_err(|e| js_error("setTimeout", e))?;
        Ok(())
    }
}
