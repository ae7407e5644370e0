//! Theme preference controller.
//!
//! Decides which theme is active from three inputs: the stored user choice,
//! the host colour-scheme preference, and toggle activations. An explicit
//! choice always wins; without one the document follows the system live.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::model::Theme;
use super::ports::{Activation, PreferenceStore, SystemScheme, ThemeSink, Timer, ToggleControl};
use crate::config::ThemeConfig;

/// Capabilities injected into the controller.
#[derive(Clone)]
pub struct ThemeBackends {
    pub document: Rc<dyn ThemeSink>,
    pub store: Rc<dyn PreferenceStore>,
    pub system: Rc<dyn SystemScheme>,
    pub timer: Rc<dyn Timer>,
    /// `None` when the page has no toggle button
    pub toggle: Option<Rc<dyn ToggleControl>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Ready,
}

pub struct ThemeController {
    backends: ThemeBackends,
    feedback: Duration,
    lifecycle: Cell<Lifecycle>,
    /// Explicit choice that could not be persisted; lives for the page session
    session_override: Cell<Option<Theme>>,
}

impl ThemeController {
    pub fn new(backends: ThemeBackends, config: &ThemeConfig) -> Rc<Self> {
        Rc::new(Self {
            backends,
            feedback: config.feedback(),
            lifecycle: Cell::new(Lifecycle::Uninitialized),
            session_override: Cell::new(None),
        })
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.get()
    }

    /// Resolve and apply the initial theme, then start listening for
    /// system changes and toggle activations.
    ///
    /// Runs once; later calls return `false` and change nothing.
    pub fn initialize(self: &Rc<Self>) -> bool {
        if self.lifecycle.get() == Lifecycle::Ready {
            debug!("Theme controller already initialized");
            return false;
        }
        self.lifecycle.set(Lifecycle::Ready);

        let stored = self.stored_preference();
        let theme = stored.unwrap_or_else(|| self.backends.system.current());
        self.apply_theme(theme);

        let weak = Rc::downgrade(self);
        let watch = self.backends.system.watch(Box::new(move |system| {
            if let Some(controller) = weak.upgrade() {
                controller.handle_system_change(system);
            }
        }));
        if let Err(e) = watch {
            warn!("Failed to watch system colour scheme: {}", e);
        }

        if let Some(toggle) = &self.backends.toggle {
            let weak = Rc::downgrade(self);
            let bind = toggle.on_activate(Box::new(move |activation| {
                weak.upgrade()
                    .is_some_and(|controller| controller.handle_activation(activation))
            }));
            if let Err(e) = bind {
                warn!("Failed to bind theme toggle: {}", e);
            }
        }

        info!(
            theme = theme.as_str(),
            explicit = stored.is_some(),
            toggle = self.backends.toggle.is_some(),
            "Theme controller initialized"
        );
        true
    }

    /// The explicit user choice, if any.
    ///
    /// Unknown stored values and read failures count as no choice.
    pub fn stored_preference(&self) -> Option<Theme> {
        if let Some(theme) = self.session_override.get() {
            return Some(theme);
        }
        match self.backends.store.load() {
            Ok(Some(value)) => {
                let theme = Theme::parse(&value);
                if theme.is_none() {
                    debug!(value = %value, "Ignoring unknown stored theme");
                }
                theme
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read theme preference: {}", e);
                None
            }
        }
    }

    /// Theme currently marked on the document.
    pub fn active_theme(&self) -> Option<Theme> {
        self.backends
            .document
            .current()
            .and_then(|value| Theme::parse(&value))
    }

    /// Set the document marker and toggle icon. Never touches storage.
    pub fn apply_theme(&self, theme: Theme) {
        if let Err(e) = self.backends.document.apply(theme) {
            warn!("Failed to apply theme {}: {}", theme, e);
        }
        if let Some(toggle) = &self.backends.toggle {
            if let Err(e) = toggle.show_icon(theme.icon()) {
                warn!("Failed to update theme toggle icon: {}", e);
            }
        }
        debug!(theme = theme.as_str(), "Theme applied");
    }

    /// Flip the active theme and persist it as the explicit choice.
    pub fn toggle_theme(&self) -> Theme {
        // Anything but "dark" (including no marker) toggles to dark
        let next = match self.active_theme() {
            Some(Theme::Dark) => Theme::Light,
            _ => Theme::Dark,
        };

        self.apply_theme(next);
        self.persist(next);
        self.pulse();
        next
    }

    /// React to a host colour-scheme flip. Ignored once the user has chosen.
    pub fn handle_system_change(&self, system: Theme) {
        if let Some(stored) = self.stored_preference() {
            debug!(
                system = system.as_str(),
                stored = stored.as_str(),
                "Ignoring system scheme change, explicit choice wins"
            );
            return;
        }
        self.apply_theme(system);
    }

    /// Returns `true` when the activation toggled and the default browser
    /// action (scrolling on Space) should be suppressed.
    pub fn handle_activation(&self, activation: &Activation) -> bool {
        if !activation.is_toggle() {
            return false;
        }
        self.toggle_theme();
        true
    }

    fn persist(&self, theme: Theme) {
        match self.backends.store.save(theme.as_str()) {
            Ok(()) => self.session_override.set(None),
            Err(e) => {
                warn!(
                    "Failed to persist theme {}, keeping it for this session: {}",
                    theme, e
                );
                self.session_override.set(Some(theme));
            }
        }
    }

    fn pulse(&self) {
        let Some(toggle) = self.backends.toggle.clone() else {
            return;
        };
        if let Err(e) = toggle.set_pressed(true) {
            warn!("Failed to press theme toggle: {}", e);
            return;
        }

        let release = toggle.clone();
        let scheduled = self.backends.timer.schedule(
            self.feedback,
            Box::new(move || {
                if let Err(e) = release.set_pressed(false) {
                    warn!("Failed to release theme toggle: {}", e);
                }
            }),
        );
        if let Err(e) = scheduled {
            warn!("Failed to schedule toggle release: {}", e);
            if let Err(e) = toggle.set_pressed(false) {
                warn!("Failed to release theme toggle: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ThemeError;
    use crate::theme::memory::{
        ManualTimer, MemoryDocument, MemoryStore, MemorySystemScheme, MemoryToggle,
    };

    struct FailingTimer;

    impl Timer for FailingTimer {
        fn schedule(&self, _: Duration, _: Box<dyn FnOnce()>) -> Result<(), ThemeError> {
            Err(ThemeError::Dom("setTimeout unavailable".into()))
        }
    }

    /// Presses fine but cannot be released.
    #[derive(Default)]
    struct StuckToggle {
        releases: Cell<usize>,
    }

    impl ToggleControl for StuckToggle {
        fn show_icon(&self, _: crate::theme::Icon) -> Result<(), ThemeError> {
            Ok(())
        }

        fn set_pressed(&self, pressed: bool) -> Result<(), ThemeError> {
            if pressed {
                return Ok(());
            }
            self.releases.set(self.releases.get() + 1);
            Err(ThemeError::Dom("style is read-only".into()))
        }

        fn on_activate(&self, _: crate::theme::ActivationHandler) -> Result<(), ThemeError> {
            Ok(())
        }
    }

    fn backends(
        store: Rc<MemoryStore>,
        toggle: Option<Rc<MemoryToggle>>,
        timer: Rc<dyn Timer>,
    ) -> (ThemeBackends, Rc<MemoryDocument>) {
        let document = Rc::new(MemoryDocument::new());
        let backends = ThemeBackends {
            document: document.clone(),
            store,
            system: Rc::new(MemorySystemScheme::new(Theme::Light)),
            timer,
            toggle: toggle.map(|t| t as Rc<dyn ToggleControl>),
        };
        (backends, document)
    }

    #[test]
    fn initialize_runs_once() {
        let store = Rc::new(MemoryStore::new());
        let (backends, document) = backends(store, None, Rc::new(ManualTimer::new()));
        let controller = ThemeController::new(backends, &ThemeConfig::default());

        assert_eq!(controller.lifecycle(), Lifecycle::Uninitialized);
        assert!(controller.initialize());
        assert!(!controller.initialize());
        assert_eq!(controller.lifecycle(), Lifecycle::Ready);
        assert_eq!(document.history(), vec![Theme::Light]);
    }

    #[test]
    fn initialize_does_not_write_storage() {
        let store = Rc::new(MemoryStore::new());
        let (backends, _) = backends(store.clone(), None, Rc::new(ManualTimer::new()));
        ThemeController::new(backends, &ThemeConfig::default()).initialize();

        assert_eq!(store.write_count(), 0);
        assert_eq!(store.value(), None);
    }

    #[test]
    fn unreadable_store_falls_back_to_system() {
        let store = Rc::new(MemoryStore::with_value("dark"));
        store.fail_reads(true);
        let (backends, _) = backends(store, None, Rc::new(ManualTimer::new()));
        let controller = ThemeController::new(backends, &ThemeConfig::default());
        controller.initialize();

        assert_eq!(controller.stored_preference(), None);
        assert_eq!(controller.active_theme(), Some(Theme::Light));
    }

    #[test]
    fn unwritable_store_keeps_choice_for_session() {
        let store = Rc::new(MemoryStore::new());
        store.fail_writes(true);
        let (backends, _) = backends(store.clone(), None, Rc::new(ManualTimer::new()));
        let controller = ThemeController::new(backends, &ThemeConfig::default());
        controller.initialize();

        assert_eq!(controller.toggle_theme(), Theme::Dark);
        assert_eq!(store.value(), None);
        assert_eq!(controller.stored_preference(), Some(Theme::Dark));

        controller.handle_system_change(Theme::Light);
        assert_eq!(controller.active_theme(), Some(Theme::Dark));

        // Once the store recovers the override moves into it
        store.fail_writes(false);
        controller.toggle_theme();
        assert_eq!(store.value().as_deref(), Some("light"));
        assert_eq!(controller.stored_preference(), Some(Theme::Light));
    }

    #[test]
    fn failed_schedule_releases_immediately() {
        let toggle = Rc::new(MemoryToggle::new());
        let (backends, _) = backends(
            Rc::new(MemoryStore::new()),
            Some(toggle.clone()),
            Rc::new(FailingTimer),
        );
        let controller = ThemeController::new(backends, &ThemeConfig::default());
        controller.initialize();

        controller.toggle_theme();
        assert!(!toggle.is_pressed());
    }

    #[test]
    fn failed_release_is_logged_not_fatal() {
        let toggle = Rc::new(StuckToggle::default());
        let store = Rc::new(MemoryStore::new());
        let (mut backends, document) =
            backends(store.clone(), None, Rc::new(FailingTimer));
        backends.toggle = Some(toggle.clone() as Rc<dyn ToggleControl>);
        let controller = ThemeController::new(backends, &ThemeConfig::default());
        controller.initialize();

        assert_eq!(controller.toggle_theme(), Theme::Dark);
        assert_eq!(toggle.releases.get(), 1);
        assert_eq!(document.history(), vec![Theme::Light, Theme::Dark]);
        assert_eq!(store.value().as_deref(), Some("dark"));
    }

    #[test]
    fn feedback_delay_comes_from_config() {
        let toggle = Rc::new(MemoryToggle::new());
        let timer = Rc::new(ManualTimer::new());
        let (backends, _) = backends(Rc::new(MemoryStore::new()), Some(toggle), timer.clone());
        let config = ThemeConfig {
            feedback_ms: 40,
            ..ThemeConfig::default()
        };
        let controller = ThemeController::new(backends, &config);

        controller.toggle_theme();
        assert_eq!(timer.delays(), vec![Duration::from_millis(40)]);
    }

    #[test]
    fn dropped_controller_stops_listening() {
        let toggle = Rc::new(MemoryToggle::new());
        let store = Rc::new(MemoryStore::new());
        let (backends, document) =
            backends(store.clone(), Some(toggle.clone()), Rc::new(ManualTimer::new()));
        let controller = ThemeController::new(backends, &ThemeConfig::default());
        controller.initialize();
        drop(controller);

        assert!(!toggle.click());
        assert_eq!(document.history(), vec![Theme::Light]);
        assert_eq!(store.write_count(), 0);
    }
}
