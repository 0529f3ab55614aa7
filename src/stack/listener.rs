use std::fmt;
use std::sync::{Arc, Mutex};

use super::screen::ScreenRef;

/// Shared handle to a registered listener. Registration is keyed by pointer identity.
pub type ListenerRef = Arc<dyn StackListener>;

/// Observer notified synchronously on every structural change of the stack.
pub trait StackListener: Send + Sync {
    /// A screen landed on top of the stack.
    fn stack_pushed(&self, screen: &ScreenRef);

    /// `popped` left the stack; `top` is the screen now current, if any.
    fn stack_popped(&self, popped: &ScreenRef, top: Option<&ScreenRef>);

    /// Fired once on registration when the stack already holds screens.
    fn stack_top(&self, top: &ScreenRef);
}

/// Kind of notification delivered to a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackAction {
    Push,
    Pop,
    Top,
}

/// One delivered notification. `top` is only set for pops that leave a screen behind.
#[derive(Clone)]
pub struct StackEvent {
    pub action: StackAction,
    pub screen: ScreenRef,
    pub top: Option<ScreenRef>,
}

impl StackEvent {
    pub fn new(action: StackAction, screen: ScreenRef) -> Self {
        Self {
            action,
            screen,
            top: None,
        }
    }
}

impl fmt::Debug for StackEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackEvent")
            .field("action", &self.action)
            .field("screen", &self.screen.name())
            .field("top", &self.top.as_ref().map(|top| top.name()))
            .finish()
    }
}

pub(crate) fn same_listener(a: &ListenerRef, b: &ListenerRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Insertion-ordered listener collection without duplicates.
#[derive(Default, Clone)]
pub struct ListenerSet {
    entries: Vec<ListenerRef>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the listener was already registered.
    pub fn insert(&mut self, listener: ListenerRef) -> bool {
        if self.contains(&listener) {
            return false;
        }
        self.entries.push(listener);
        true
    }

    /// Returns `false` if the listener was not registered.
    pub fn remove(&mut self, listener: &ListenerRef) -> bool {
        match self.entries.iter().position(|l| same_listener(l, listener)) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, listener: &ListenerRef) -> bool {
        self.entries.iter().any(|l| same_listener(l, listener))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ListenerRef> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Listener that keeps every notification it receives, in order.
#[derive(Default)]
pub struct RecordingListener {
    events: Mutex<Vec<StackEvent>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn events(&self) -> Vec<StackEvent> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// `(action, screen name)` pairs, convenient for assertions and history panes.
    pub fn trail(&self) -> Vec<(StackAction, String)> {
        self.events()
            .iter()
            .map(|event| (event.action, event.screen.name().to_string()))
            .collect()
    }

    pub fn count(&self, action: StackAction) -> usize {
        self.events
            .lock()
            .map(|guard| guard.iter().filter(|e| e.action == action).count())
            .unwrap_or(0)
    }

    /// Pushes minus pops seen so far.
    pub fn balance(&self) -> i64 {
        self.count(StackAction::Push) as i64 - self.count(StackAction::Pop) as i64
    }

    pub fn reset(&self) {
        if let Ok(mut guard) = self.events.lock() {
            guard.clear();
        }
    }

    fn record(&self, event: StackEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event);
        }
    }
}

impl StackListener for RecordingListener {
    fn stack_pushed(&self, screen: &ScreenRef) {
        self.record(StackEvent::new(StackAction::Push, screen.clone()));
    }

    fn stack_popped(&self, popped: &ScreenRef, top: Option<&ScreenRef>) {
        self.record(StackEvent {
            action: StackAction::Pop,
            screen: popped.clone(),
            top: top.cloned(),
        });
    }

    fn stack_top(&self, top: &ScreenRef) {
        self.record(StackEvent::new(StackAction::Top, top.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::screen::NamedScreen;

    #[test]
    fn set_rejects_duplicates_and_keeps_order() {
        let first: ListenerRef = RecordingListener::shared();
        let second: ListenerRef = RecordingListener::shared();
        let mut set = ListenerSet::new();
        assert!(set.insert(first.clone()));
        assert!(set.insert(second.clone()));
        assert!(!set.insert(first.clone()));
        assert_eq!(set.len(), 2);

        let order: Vec<_> = set.iter().cloned().collect();
        assert!(same_listener(&order[0], &first));
        assert!(same_listener(&order[1], &second));
    }

    #[test]
    fn removing_unknown_listener_is_noop() {
        let known: ListenerRef = RecordingListener::shared();
        let unknown: ListenerRef = RecordingListener::shared();
        let mut set = ListenerSet::new();
        set.insert(known.clone());
        assert!(!set.remove(&unknown));
        assert!(set.remove(&known));
        assert!(!set.remove(&known));
        assert!(set.is_empty());
    }

    #[test]
    fn recorder_balances_push_and_pop() {
        let recorder = RecordingListener::new();
        let screen = NamedScreen::shared("pods");
        recorder.stack_pushed(&screen);
        recorder.stack_pushed(&screen);
        recorder.stack_popped(&screen, None);
        assert_eq!(recorder.balance(), 1);
        assert_eq!(recorder.count(StackAction::Top), 0);

        let debug = format!("{:?}", recorder.events()[2]);
        assert!(debug.contains("Pop"));
        assert!(debug.contains("pods"));
    }
}
