//! Page entry point and the JavaScript surface.
//!
//! `start` runs when the wasm module loads. It installs the console logger
//! and publishes `window.ThemeToggle` right away; the site bootstrap and the
//! theme controller each wait for the document through their own
//! [`ReadyGate`], bootstrap first. Once the controller exists it is kept in
//! a thread-local so `setTheme`/`toggleTheme` can reach it.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{info, warn, Level};
use wasm_bindgen::prelude::*;

use super::dom::{DomDocument, DomToggle};
use super::media::MediaScheme;
use super::storage::LocalStorage;
use super::timer::WindowTimer;
use super::{document, js_error, when_ready, window};
use crate::config::ThemeConfig;
use crate::error::ThemeError;
use crate::logging::init_logging;
use crate::ready::ReadyGate;
use crate::site;
use crate::theme::memory::MemorySystemScheme;
use crate::theme::{SystemScheme, Theme, ThemeBackends, ThemeController, ToggleControl};

/// Global object for plain `<script>` callers.
const GLOBAL_NAME: &str = "ThemeToggle";

thread_local! {
    static CONTROLLER: RefCell<Option<Rc<ThemeController>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    init_logging(Level::INFO);

    if let Err(e) = expose_global() {
        warn!("Failed to publish window.{}: {}", GLOBAL_NAME, e);
    }

    let document = match document() {
        Ok(document) => document,
        Err(e) => {
            warn!("Memoir scripts disabled: {}", e);
            return;
        }
    };

    if let Err(e) = when_ready(&document, ReadyGate::new(site::init_site)) {
        warn!("Failed to schedule site init: {}", e);
    }

    let theme_gate = ReadyGate::new(|| {
        if let Err(e) = init_theme(&ThemeConfig::default()) {
            warn!("Theme toggle disabled: {}", e);
        }
    });
    if let Err(e) = when_ready(&document, theme_gate) {
        warn!("Failed to schedule theme init: {}", e);
    }
}

/// `window.ThemeToggle = { setTheme, toggleTheme }`
fn expose_global() -> Result<(), ThemeError> {
    let api = js_sys::Object::new();

    let set = Closure::<dyn Fn(String) -> Result<(), JsError>>::new(|theme: String| {
        set_theme(&theme)
    });
    let toggle = Closure::<dyn Fn() -> Result<String, JsError>>::new(toggle_theme);

    js_sys::Reflect::set(&api, &JsValue::from_str("setTheme"), set.as_ref())
        .map_err(|e| js_error("ThemeToggle.setTheme", e))?;
    js_sys::Reflect::set(&api, &JsValue::from_str("toggleTheme"), toggle.as_ref())
        .map_err(|e| js_error("ThemeToggle.toggleTheme", e))?;
    let window: JsValue = window()?.into();
    js_sys::Reflect::set(&window, &JsValue::from_str(GLOBAL_NAME), &api)
        .map_err(|e| js_error("window.ThemeToggle", e))?;

    // Callable for the lifetime of the page
    set.forget();
    toggle.forget();
    Ok(())
}

fn build_controller(config: &ThemeConfig) -> Result<Rc<ThemeController>, ThemeError> {
    let document = document()?;

    let system: Rc<dyn SystemScheme> = match MediaScheme::new(&config.dark_media_query) {
        Ok(scheme) => Rc::new(scheme),
        Err(e) => {
            info!("No colour-scheme media query, assuming light: {}", e);
            Rc::new(MemorySystemScheme::new(Theme::Light))
        }
    };

    let backends = ThemeBackends {
        document: Rc::new(DomDocument::new(&document, config)?),
        store: Rc::new(LocalStorage::new(config.storage_key.clone())),
        system,
        timer: Rc::new(WindowTimer),
        toggle: DomToggle::find(&document, config).map(|t| Rc::new(t) as Rc<dyn ToggleControl>),
    };

    Ok(ThemeController::new(backends, config))
}

fn init_theme(config: &ThemeConfig) -> Result<(), ThemeError> {
    let controller = build_controller(config)?;
    controller.initialize();
    CONTROLLER.with(|slot| *slot.borrow_mut() = Some(controller));
    Ok(())
}

/// The page controller, or a detached one for calls that arrive before the
/// document is ready. A detached controller acts on whatever the document
/// holds so far and registers no listeners.
fn current() -> Result<Rc<ThemeController>, ThemeError> {
    match CONTROLLER.with(|slot| slot.borrow().clone()) {
        Some(controller) => Ok(controller),
        None => build_controller(&ThemeConfig::default()),
    }
}

/// Apply `theme` ("light" or "dark") without storing it as the user's choice.
#[wasm_bindgen(js_name = setTheme)]
pub fn set_theme(theme: &str) -> Result<(), JsError> {
    let theme: Theme = theme.parse()?;
    current()?.apply_theme(theme);
    Ok(())
}

/// Flip the theme and remember it. Returns the new theme token.
#[wasm_bindgen(js_name = toggleTheme)]
pub fn toggle_theme() -> Result<String, JsError> {
    let theme = current()?.toggle_theme();
    Ok(theme.as_str().to_string())
}
