//! In-memory implementations of the theme capabilities.
//!
//! Used by the test suite and by native consumers that render pages
//! without a browser. `MemorySystemScheme` doubles as the fallback scheme
//! when the browser has no `matchMedia`.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use super::model::{Icon, Theme};
use super::ports::{
    Activation, ActivationHandler, PreferenceStore, SchemeHandler, SystemScheme, ThemeSink,
    Timer, ToggleControl,
};
use crate::error::ThemeError;

// =============================================================================
// Preference store
// =============================================================================

#[derive(Default)]
pub struct MemoryStore {
    value: RefCell<Option<String>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a raw value, valid or not.
    pub fn with_value(value: &str) -> Self {
        let store = Self::default();
        *store.value.borrow_mut() = Some(value.to_string());
        store
    }

    pub fn value(&self) -> Option<String> {
        self.value.borrow().clone()
    }

    /// Simulates an external clear (devtools, privacy settings).
    pub fn clear(&self) {
        *self.value.borrow_mut() = None;
    }

    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, ThemeError> {
        if self.fail_reads.get() {
            return Err(ThemeError::StorageUnavailable);
        }
        Ok(self.value.borrow().clone())
    }

    fn save(&self, value: &str) -> Result<(), ThemeError> {
        if self.fail_writes.get() {
            return Err(ThemeError::Storage("quota exceeded".into()));
        }
        *self.value.borrow_mut() = Some(value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

// =============================================================================
// Document marker
// =============================================================================

#[derive(Default)]
pub struct MemoryDocument {
    marker: RefCell<Option<String>>,
    history: RefCell<Vec<Theme>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document whose markup already carries a (possibly bogus) marker.
    pub fn with_marker(marker: &str) -> Self {
        let doc = Self::default();
        *doc.marker.borrow_mut() = Some(marker.to_string());
        doc
    }

    pub fn marker(&self) -> Option<String> {
        self.marker.borrow().clone()
    }

    /// Every theme applied so far, in order.
    pub fn history(&self) -> Vec<Theme> {
        self.history.borrow().clone()
    }
}

impl ThemeSink for MemoryDocument {
    fn current(&self) -> Option<String> {
        self.marker()
    }

    fn apply(&self, theme: Theme) -> Result<(), ThemeError> {
        *self.marker.borrow_mut() = Some(theme.as_str().to_string());
        self.history.borrow_mut().push(theme);
        Ok(())
    }
}

// =============================================================================
// Toggle control
// =============================================================================

pub struct MemoryToggle {
    has_icons: bool,
    icon: Cell<Option<Icon>>,
    pressed: Cell<bool>,
    handler: RefCell<Option<ActivationHandler>>,
}

impl Default for MemoryToggle {
    fn default() -> Self {
        Self {
            has_icons: true,
            icon: Cell::new(None),
            pressed: Cell::new(false),
            handler: RefCell::new(None),
        }
    }
}

impl MemoryToggle {
    pub fn new() -> Self {
        Self::default()
    }

    /// A toggle button missing its sun/moon children.
    pub fn without_icons() -> Self {
        Self {
            has_icons: false,
            ..Self::default()
        }
    }

    pub fn icon(&self) -> Option<Icon> {
        self.icon.get()
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed.get()
    }

    pub fn is_bound(&self) -> bool {
        self.handler.borrow().is_some()
    }

    /// Deliver an activation to the bound handler.
    /// Returns whether the default action would be prevented.
    pub fn activate(&self, activation: &Activation) -> bool {
        match self.handler.borrow().as_ref() {
            Some(handler) => handler(activation),
            None => false,
        }
    }

    pub fn click(&self) -> bool {
        self.activate(&Activation::Click)
    }

    pub fn press_key(&self, key: &str) -> bool {
        self.activate(&Activation::key(key))
    }
}

impl ToggleControl for MemoryToggle {
    fn show_icon(&self, icon: Icon) -> Result<(), ThemeError> {
        if self.has_icons {
            self.icon.set(Some(icon));
        }
        Ok(())
    }

    fn set_pressed(&self, pressed: bool) -> Result<(), ThemeError> {
        self.pressed.set(pressed);
        Ok(())
    }

    fn on_activate(&self, handler: ActivationHandler) -> Result<(), ThemeError> {
        *self.handler.borrow_mut() = Some(handler);
        Ok(())
    }
}

// =============================================================================
// System colour scheme
// =============================================================================

pub struct MemorySystemScheme {
    theme: Cell<Theme>,
    handlers: RefCell<Vec<SchemeHandler>>,
}

impl MemorySystemScheme {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme: Cell::new(theme),
            handlers: RefCell::new(Vec::new()),
        }
    }

    pub fn watcher_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Flip the host preference and notify watchers.
    pub fn emit(&self, theme: Theme) {
        self.theme.set(theme);
        for handler in self.handlers.borrow().iter() {
            handler(theme);
        }
    }
}

impl SystemScheme for MemorySystemScheme {
    fn current(&self) -> Theme {
        self.theme.get()
    }

    fn watch(&self, handler: SchemeHandler) -> Result<(), ThemeError> {
        self.handlers.borrow_mut().push(handler);
        Ok(())
    }
}

// =============================================================================
// Timer
// =============================================================================

/// Timer that queues tasks until the test runs them.
#[derive(Default)]
pub struct ManualTimer {
    queue: RefCell<Vec<(Duration, Box<dyn FnOnce()>)>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.queue.borrow().iter().map(|(delay, _)| *delay).collect()
    }

    /// Run every queued task in scheduling order. Returns how many ran.
    pub fn run_all(&self) -> usize {
        // Take the queue first so tasks may schedule more work
        let tasks = std::mem::take(&mut *self.queue.borrow_mut());
        let count = tasks.len();
        for (_, task) in tasks {
            task();
        }
        count
    }
}

impl Timer for ManualTimer {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Result<(), ThemeError> {
        self.queue.borrow_mut().push((delay, task));
        Ok(())
    }
}
