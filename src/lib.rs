//! Screen navigation stack for Room terminal applications.
//!
//! A [`NavigationStack`] keeps the drill-down history of screens. Pushing opens
//! a screen over the current one, popping returns to the previous one, and
//! registered [`StackListener`]s hear about every transition exactly once, in
//! registration order. Rendering, focus, and input stay with the screens.

pub mod breadcrumb;
pub mod error;
pub mod keymap;
pub mod logging;
pub mod metrics;
pub mod stack;
pub mod width;

pub use breadcrumb::{Breadcrumb, BreadcrumbListener, BreadcrumbSettings};
pub use error::{NavError, Result};
pub use keymap::{NavigationCommand, NavigationKeymap};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use metrics::{MetricSnapshot, NavigationMetrics};
pub use stack::{
    LifecycleListener, ListenerRef, ListenerSet, NamedScreen, NavigationStack, RecordingListener,
    Screen, ScreenRef, SharedNavigationStack, StackAction, StackConfig, StackEvent, StackListener,
    same_screen,
};
pub use width::display_width;
