//! Log output for the page.
//!
//! Installs the Dioxus logger as the global `tracing` subscriber: the
//! browser console on wasm32, stdout elsewhere.

use tracing::{debug, Level};

/// Install the global subscriber.
///
/// Returns `false` when one was already installed; the existing
/// subscriber is left in place.
pub fn init_logging(level: Level) -> bool {
    match dioxus::logger::init(level) {
        Ok(()) => true,
        Err(e) => {
            debug!("Logger already installed: {}", e);
            false
        }
    }
}
