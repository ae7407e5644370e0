//! Site bootstrap.
//!
//! Runs once the document is ready, before the theme controller starts.
//! Page-wide setup that is not theme related belongs here.

use tracing::info;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn init_site() {
    info!(version = VERSION, "Memoir website initialized");
}
