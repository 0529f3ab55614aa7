use thiserror::Error;

use crate::logging::LoggingError;

/// Unified result type for the navigation crate.
pub type Result<T> = std::result::Result<T, NavError>;

/// Errors surfaced by screens and the helpers around the stack.
///
/// Stack mutations never fail; these variants come from collaborators such as
/// a screen whose `init` hook refuses to come up.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("screen `{screen}` failed to initialise: {reason}")]
    ScreenInit { screen: String, reason: String },
    #[error("terminal backend error: {0}")]
    Backend(String),
    #[error(transparent)]
    Logging(#[from] LoggingError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl NavError {
    pub fn screen_init(screen: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ScreenInit {
            screen: screen.into(),
            reason: reason.into(),
        }
    }
}
