//! Light/dark theme preference with localStorage persistence.
//!
//! - model: `Theme` and the toggle `Icon`
//! - ports: capability traits the controller is built on
//! - memory: in-memory backends for tests and non-browser hosts
//! - controller: the preference state machine

pub mod controller;
pub mod memory;
pub mod model;
pub mod ports;

pub use controller::{Lifecycle, ThemeBackends, ThemeController};
pub use model::{Icon, Theme};
pub use ports::{
    Activation, ActivationHandler, PreferenceStore, SchemeHandler, SystemScheme, ThemeSink, Timer,
    ToggleControl,
};
