use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::core::{NavigationStack, StackConfig};
use super::listener::ListenerRef;
use super::screen::ScreenRef;

/// Cloneable handle for hosts that touch the stack from more than one thread.
///
/// Each call takes the lock once and fires its notifications while holding it,
/// so listener ordering matches the single-threaded stack. Listeners must not
/// call back into the same handle from inside a hook; that would deadlock.
#[derive(Clone, Default)]
pub struct SharedNavigationStack {
    inner: Arc<Mutex<NavigationStack>>,
}

impl SharedNavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StackConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(NavigationStack::with_config(config))),
        }
    }

    fn lock(&self) -> MutexGuard<'_, NavigationStack> {
        // A panicking listener must not wedge navigation for the rest of the app.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access, for multi-step transitions.
    pub fn with<R>(&self, f: impl FnOnce(&mut NavigationStack) -> R) -> R {
        f(&mut *self.lock())
    }

    pub fn push(&self, screen: ScreenRef) {
        self.lock().push(screen);
    }

    pub fn pop(&self) -> Option<ScreenRef> {
        self.lock().pop()
    }

    pub fn top(&self) -> Option<ScreenRef> {
        self.lock().top().cloned()
    }

    pub fn previous(&self) -> Option<ScreenRef> {
        self.lock().previous().cloned()
    }

    pub fn is_last(&self) -> bool {
        self.lock().is_last()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn flatten(&self) -> Vec<String> {
        self.lock().flatten()
    }

    pub fn peek(&self) -> Vec<ScreenRef> {
        self.lock().peek()
    }

    pub fn clear(&self) -> usize {
        self.lock().clear()
    }

    pub fn add_listener(&self, listener: ListenerRef) -> bool {
        self.lock().add_listener(listener)
    }

    pub fn remove_listener(&self, listener: &ListenerRef) -> bool {
        self.lock().remove_listener(listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::listener::{RecordingListener, StackAction};
    use crate::stack::screen::NamedScreen;
    use std::thread;

    #[test]
    fn pushes_from_threads_are_all_notified() {
        let stack = SharedNavigationStack::new();
        let recorder = RecordingListener::shared();
        stack.add_listener(recorder.clone());

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let stack = stack.clone();
                thread::spawn(move || {
                    for i in 0..10 {
                        stack.push(NamedScreen::shared(format!("w{worker}-{i}")));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker");
        }

        assert_eq!(stack.len(), 40);
        assert_eq!(recorder.count(StackAction::Push), 40);
        assert_eq!(recorder.trail().len(), stack.flatten().len());
    }

    #[test]
    fn queries_return_owned_handles() {
        let stack = SharedNavigationStack::new();
        stack.push(NamedScreen::shared("a"));
        stack.push(NamedScreen::shared("b"));
        assert_eq!(stack.top().map(|s| s.name().to_string()), Some("b".into()));
        assert_eq!(
            stack.previous().map(|s| s.name().to_string()),
            Some("a".into())
        );
        assert!(!stack.is_last());
        let popped = stack.with(|inner| inner.pop());
        assert_eq!(popped.map(|s| s.name().to_string()), Some("b".into()));
        assert!(stack.is_last());
        assert_eq!(stack.clear(), 1);
        assert!(stack.is_empty());
    }
}
