use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::{MetricSnapshot, NavigationMetrics};

use super::listener::{ListenerRef, ListenerSet};
use super::screen::ScreenRef;

/// Configuration knobs for a [`NavigationStack`].
#[derive(Clone)]
pub struct StackConfig {
    /// Optional structured logger for transitions.
    pub logger: Option<Logger>,
    /// Target field used on every emitted log event.
    pub log_target: String,
    /// Call `stop()` on the screen being covered by a push.
    pub stop_covered_on_push: bool,
    /// Metrics accumulator shared with the host.
    pub metrics: Option<Arc<Mutex<NavigationMetrics>>>,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            logger: None,
            log_target: "room::nav.stack".to_string(),
            stop_covered_on_push: true,
            metrics: None,
        }
    }
}

impl StackConfig {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(NavigationMetrics::new())));
        }
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<NavigationMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// LIFO history of screens with synchronous listener fan-out.
///
/// Index 0 is the oldest screen, the last index is the current one. Every
/// successful [`push`](Self::push) and [`pop`](Self::pop) notifies each
/// registered listener exactly once, in registration order, after the
/// structural change is visible.
#[derive(Default)]
pub struct NavigationStack {
    items: Vec<ScreenRef>,
    listeners: ListenerSet,
    config: StackConfig,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StackConfig) -> Self {
        Self {
            items: Vec::new(),
            listeners: ListenerSet::new(),
            config,
        }
    }

    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Place `screen` on top and notify listeners.
    pub fn push(&mut self, screen: ScreenRef) {
        if self.config.stop_covered_on_push {
            if let Some(covered) = self.items.last() {
                covered.stop();
            }
        }
        self.items.push(screen.clone());

        let depth = self.items.len();
        let fanout = self.listeners.len();
        self.with_metrics(|m| {
            m.record_push(depth);
            m.record_notifications(fanout);
        });
        self.log(
            "push",
            [
                json_kv("screen", screen.name()),
                json_kv("depth", json!(depth)),
            ],
        );

        for listener in self.listeners.iter() {
            listener.stack_pushed(&screen);
        }
    }

    /// Remove the current screen. Returns `None`, and notifies nobody, when empty.
    ///
    /// No lifecycle hook is called on the removed screen; listeners own that.
    pub fn pop(&mut self) -> Option<ScreenRef> {
        let Some(popped) = self.items.pop() else {
            self.with_metrics(NavigationMetrics::record_ignored_pop);
            return None;
        };
        let top = self.items.last().cloned();

        let fanout = self.listeners.len();
        self.with_metrics(|m| {
            m.record_pop();
            m.record_notifications(fanout);
        });
        self.log(
            "pop",
            [
                json_kv("screen", popped.name()),
                json_kv("top", json!(top.as_ref().map(|t| t.name()))),
                json_kv("depth", json!(self.items.len())),
            ],
        );

        for listener in self.listeners.iter() {
            listener.stack_popped(&popped, top.as_ref());
        }
        Some(popped)
    }

    pub fn top(&self) -> Option<&ScreenRef> {
        self.items.last()
    }

    /// Screen directly beneath the top, i.e. what one pop would reveal.
    pub fn previous(&self) -> Option<&ScreenRef> {
        self.items
            .len()
            .checked_sub(2)
            .and_then(|index| self.items.get(index))
    }

    /// True when exactly one screen remains.
    pub fn is_last(&self) -> bool {
        self.items.len() == 1
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Screen names from bottom to top.
    pub fn flatten(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|screen| screen.name().to_string())
            .collect()
    }

    /// Detached copy of the screens from bottom to top.
    pub fn peek(&self) -> Vec<ScreenRef> {
        self.items.clone()
    }

    /// Pop every screen top-down, notifying listeners once per removed screen.
    ///
    /// Each pop reports the screen it reveals as the new top, so a listener
    /// driving lifecycle sees `[a, b, c]` cleared as `stop c, start b, stop b,
    /// start a, stop a`. Returns how many screens were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.items.len();
        for _ in 0..removed {
            self.pop();
        }
        self.with_metrics(NavigationMetrics::record_clear);
        self.log("clear", [json_kv("removed", json!(removed))]);
        removed
    }

    /// Register `listener`. If the stack is non-empty it immediately receives
    /// `stack_top` with the current screen.
    ///
    /// Registering the same listener twice is a no-op and returns `false`.
    pub fn add_listener(&mut self, listener: ListenerRef) -> bool {
        if !self.listeners.insert(listener.clone()) {
            return false;
        }
        self.log(
            "listener_added",
            [json_kv("listeners", json!(self.listeners.len()))],
        );
        if let Some(top) = self.items.last() {
            self.with_metrics(|m| m.record_notifications(1));
            listener.stack_top(top);
        }
        true
    }

    /// Unregister `listener`. Unknown listeners are ignored and return `false`.
    pub fn remove_listener(&mut self, listener: &ListenerRef) -> bool {
        let removed = self.listeners.remove(listener);
        if removed {
            self.log(
                "listener_removed",
                [json_kv("listeners", json!(self.listeners.len()))],
            );
        }
        removed
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Log the current trail at debug level.
    pub fn dump(&self) {
        self.log(
            "dump",
            [
                json_kv("depth", json!(self.items.len())),
                json_kv("trail", json!(self.flatten())),
            ],
        );
    }

    pub fn metrics_snapshot(&self) -> Option<MetricSnapshot> {
        let metrics = self.config.metrics.as_ref()?;
        let guard = metrics.lock().ok()?;
        Some(guard.snapshot(self.items.len()))
    }

    fn with_metrics(&self, record: impl FnOnce(&mut NavigationMetrics)) {
        if let Some(metrics) = &self.config.metrics {
            if let Ok(mut guard) = metrics.lock() {
                record(&mut *guard);
            }
        }
    }

    fn log(&self, message: &str, fields: impl IntoIterator<Item = (String, Value)>) {
        if let Some(logger) = &self.config.logger {
            let event = event_with_fields(LogLevel::Debug, &self.config.log_target, message, fields);
            let _ = logger.log_event(event);
        }
    }
}
