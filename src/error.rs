//! Error type shared by the theme controller and its backends.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    #[error("preference storage is not available")]
    StorageUnavailable,

    #[error("preference storage error: {0}")]
    Storage(String),

    #[error("document error: {0}")]
    Dom(String),

    #[error("unknown theme {0:?} (expected \"light\" or \"dark\")")]
    UnknownTheme(String),

    #[error("invalid theme config: {0}")]
    Config(String),
}
