use std::sync::Mutex;

use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};

use super::listener::StackListener;
use super::screen::{ScreenRef, same_screen};

/// Drives screen lifecycle from stack notifications.
///
/// Pushed screens are initialised then started. A popped screen is stopped and
/// the revealed one restarted. A late registration starts the current top.
/// Screens whose `init` fails are never started, not even when a pop reveals
/// them again; the failure is logged and kept for [`failures`](Self::failures).
///
/// [`NavigationStack::clear`](super::NavigationStack::clear) goes through the
/// same pop path, so clearing `[a, b, c]` runs
/// `stop c, start b, stop b, start a, stop a`.
#[derive(Default)]
pub struct LifecycleListener {
    logger: Option<Logger>,
    failures: Mutex<Vec<String>>,
    uninitialised: Mutex<Vec<ScreenRef>>,
}

impl LifecycleListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logger(logger: Logger) -> Self {
        Self {
            logger: Some(logger),
            ..Self::default()
        }
    }

    /// Rendered init errors, oldest first.
    pub fn failures(&self) -> Vec<String> {
        self.failures
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn report(&self, screen: &ScreenRef, err: &crate::NavError) {
        if let Some(logger) = &self.logger {
            let event = event_with_fields(
                LogLevel::Error,
                "room::nav.lifecycle",
                "screen_init_failed",
                [
                    json_kv("screen", screen.name()),
                    json_kv("error", err.to_string()),
                ],
            );
            let _ = logger.log_event(event);
        }
        if let Ok(mut guard) = self.failures.lock() {
            guard.push(err.to_string());
        }
        if let Ok(mut guard) = self.uninitialised.lock() {
            guard.push(screen.clone());
        }
    }

    fn is_uninitialised(&self, screen: &ScreenRef) -> bool {
        self.uninitialised
            .lock()
            .map(|guard| guard.iter().any(|s| same_screen(s, screen)))
            .unwrap_or(false)
    }

    fn forget(&self, screen: &ScreenRef) {
        if let Ok(mut guard) = self.uninitialised.lock() {
            guard.retain(|s| !same_screen(s, screen));
        }
    }

    fn start_initialised(&self, screen: &ScreenRef) {
        if !self.is_uninitialised(screen) {
            screen.start();
        }
    }
}

impl StackListener for LifecycleListener {
    fn stack_pushed(&self, screen: &ScreenRef) {
        match screen.init() {
            Ok(()) => {
                self.forget(screen);
                screen.start();
            }
            Err(err) => self.report(screen, &err),
        }
    }

    fn stack_popped(&self, popped: &ScreenRef, top: Option<&ScreenRef>) {
        popped.stop();
        // The same screen may sit lower in the stack; only its topmost entry left.
        if !top.is_some_and(|top| same_screen(top, popped)) {
            self.forget(popped);
        }
        if let Some(top) = top {
            self.start_initialised(top);
        }
    }

    fn stack_top(&self, top: &ScreenRef) {
        self.start_initialised(top);
    }
}
