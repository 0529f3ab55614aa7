use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::Result;

/// Shared handle to a screen held by the stack.
///
/// Identity is the allocation, not the name: two screens called `pods` are
/// distinct entries.
pub type ScreenRef = Arc<dyn Screen>;

/// Minimal contract a view must satisfy to live on a [`NavigationStack`](super::NavigationStack).
///
/// Drawing, focus, and input routing belong to the UI layer and stay out of
/// this trait. Hooks take `&self`; screens keep their own interior state.
pub trait Screen: Send + Sync {
    fn name(&self) -> &str;

    fn init(&self) -> Result<()> {
        Ok(())
    }

    fn start(&self) {}

    fn stop(&self) {}
}

/// Pointer identity of two screen handles.
pub fn same_screen(a: &ScreenRef, b: &ScreenRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Plain named screen that tracks whether it is running.
#[derive(Debug, Default)]
pub struct NamedScreen {
    name: String,
    running: AtomicBool,
}

impl NamedScreen {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            running: AtomicBool::new(false),
        }
    }

    pub fn shared(name: impl Into<String>) -> ScreenRef {
        Arc::new(Self::new(name))
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Screen for NamedScreen {
    fn name(&self) -> &str {
        &self.name
    }

    fn start(&self) {
        self.running.store(true, Ordering::SeqCst);
    }

    fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}
