//! Memoir website - client-side behaviour
//!
//! Browser-side code for the memoir static site, compiled to WebAssembly.
//!
//! This library provides:
//! - Site bootstrap stub, run once the document is ready
//! - Console logging through the Dioxus logger
//! - Light/dark theme controller with localStorage persistence
//! - Browser backends and the exported `setTheme`/`toggleTheme` surface (wasm32)
//! - Dioxus `ThemeToggle` component rendering the toggle markup

pub mod components;
pub mod config;
pub mod error;
pub mod logging;
pub mod ready;
pub mod site;
pub mod theme;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::ThemeConfig;
pub use error::ThemeError;
pub use theme::{Theme, ThemeController};
