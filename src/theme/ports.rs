//! Capabilities the theme controller depends on.
//!
//! The browser implementations live in `crate::web` (wasm32 only); the
//! in-memory ones in [`super::memory`] back tests and native consumers.
//! Everything is single-threaded: handlers run on the UI event loop, so the
//! traits take `&self` and carry no `Send` bounds.

use std::time::Duration;

use super::model::{Icon, Theme};
use crate::error::ThemeError;

/// Callback for toggle activation. Returns `true` when the event was
/// consumed and the caller should suppress the browser default.
pub type ActivationHandler = Box<dyn Fn(&Activation) -> bool>;

/// Callback for system colour-scheme changes.
pub type SchemeHandler = Box<dyn Fn(Theme)>;

/// User input received by the toggle control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Activation {
    Click,
    /// Keydown while focused, carrying `KeyboardEvent.key`
    Key(String),
}

impl Activation {
    pub fn key(key: impl Into<String>) -> Self {
        Activation::Key(key.into())
    }

    /// Click, Enter and Space toggle; every other key is left alone.
    pub fn is_toggle(&self) -> bool {
        match self {
            Activation::Click => true,
            Activation::Key(key) => key == "Enter" || key == " ",
        }
    }
}

/// Document-level theme marker that stylesheets key off.
pub trait ThemeSink {
    /// Raw marker value, if one is set.
    fn current(&self) -> Option<String>;

    fn apply(&self, theme: Theme) -> Result<(), ThemeError>;
}

/// The optional toggle button.
pub trait ToggleControl {
    /// Show `icon` and hide the other one. No-op when the control lacks icons.
    fn show_icon(&self, icon: Icon) -> Result<(), ThemeError>;

    /// Pressed-state visual feedback.
    fn set_pressed(&self, pressed: bool) -> Result<(), ThemeError>;

    fn on_activate(&self, handler: ActivationHandler) -> Result<(), ThemeError>;
}

/// Durable per-origin key/value slot holding the explicit user choice.
pub trait PreferenceStore {
    fn load(&self) -> Result<Option<String>, ThemeError>;

    fn save(&self, value: &str) -> Result<(), ThemeError>;
}

/// Host colour-scheme signal.
pub trait SystemScheme {
    fn current(&self) -> Theme;

    fn watch(&self, handler: SchemeHandler) -> Result<(), ThemeError>;
}

/// One-shot delayed tasks on the event loop.
pub trait Timer {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Result<(), ThemeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_space_and_click_toggle() {
        assert!(Activation::Click.is_toggle());
        assert!(Activation::key("Enter").is_toggle());
        assert!(Activation::key(" ").is_toggle());
    }

    #[test]
    fn other_keys_do_not_toggle() {
        assert!(!Activation::key("Tab").is_toggle());
        assert!(!Activation::key("Escape").is_toggle());
        assert!(!Activation::key("Spacebar").is_toggle());
        assert!(!Activation::key("enter").is_toggle());
    }
}
