use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Counters accumulated by a [`NavigationStack`](crate::NavigationStack) when metrics are enabled.
#[derive(Debug, Default, Clone)]
pub struct NavigationMetrics {
    pushes: u64,
    pops: u64,
    ignored_pops: u64,
    clears: u64,
    notifications: u64,
    max_depth: usize,
}

impl NavigationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_push(&mut self, depth: usize) {
        self.pushes = self.pushes.saturating_add(1);
        self.max_depth = self.max_depth.max(depth);
    }

    pub fn record_pop(&mut self) {
        self.pops = self.pops.saturating_add(1);
    }

    /// Pop requested on an empty stack.
    pub fn record_ignored_pop(&mut self) {
        self.ignored_pops = self.ignored_pops.saturating_add(1);
    }

    pub fn record_clear(&mut self) {
        self.clears = self.clears.saturating_add(1);
    }

    pub fn record_notifications(&mut self, count: usize) {
        self.notifications = self.notifications.saturating_add(count as u64);
    }

    pub fn snapshot(&self, depth: usize) -> MetricSnapshot {
        MetricSnapshot {
            depth,
            pushes: self.pushes,
            pops: self.pops,
            ignored_pops: self.ignored_pops,
            clears: self.clears,
            notifications: self.notifications,
            max_depth: self.max_depth,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub depth: usize,
    pub pushes: u64,
    pub pops: u64,
    pub ignored_pops: u64,
    pub clears: u64,
    pub notifications: u64,
    pub max_depth: usize,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "navigation_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("depth".to_string(), json!(self.depth));
        map.insert("pushes".to_string(), json!(self.pushes));
        map.insert("pops".to_string(), json!(self.pops));
        map.insert("ignored_pops".to_string(), json!(self.ignored_pops));
        map.insert("clears".to_string(), json!(self.clears));
        map.insert("notifications".to_string(), json!(self.notifications));
        map.insert("max_depth".to_string(), json!(self.max_depth));
        map
    }
}
