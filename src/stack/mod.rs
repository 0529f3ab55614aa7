//! Navigation stack: screen history with ordered listener notification.

mod core;
mod lifecycle;
mod listener;
mod screen;
mod shared;

pub use self::core::{NavigationStack, StackConfig};
pub use lifecycle::LifecycleListener;
pub use listener::{
    ListenerRef, ListenerSet, RecordingListener, StackAction, StackEvent, StackListener,
};
pub use screen::{NamedScreen, Screen, ScreenRef, same_screen};
pub use shared::SharedNavigationStack;
