use std::sync::{Arc, Mutex};

use blake3::Hash;

use crate::stack::{NavigationStack, ScreenRef, StackListener};
use crate::width::{display_width, strip_ansi, truncate_left};

/// Rendering options for a [`Breadcrumb`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadcrumbSettings {
    pub separator: String,
    pub ellipsis: String,
    /// Column budget; `None` renders the full trail.
    pub max_width: Option<usize>,
}

impl Default for BreadcrumbSettings {
    fn default() -> Self {
        Self {
            separator: " > ".to_string(),
            ellipsis: "…".to_string(),
            max_width: None,
        }
    }
}

/// Renders a bottom-to-top trail of screen names into one line.
///
/// When the trail is wider than the budget, the oldest segments are replaced
/// by the ellipsis so the current screen stays visible.
#[derive(Debug, Clone, Default)]
pub struct Breadcrumb {
    settings: BreadcrumbSettings,
}

impl Breadcrumb {
    pub fn new(settings: BreadcrumbSettings) -> Self {
        Self { settings }
    }

    pub fn with_max_width(max_width: usize) -> Self {
        Self::new(BreadcrumbSettings {
            max_width: Some(max_width),
            ..BreadcrumbSettings::default()
        })
    }

    pub fn settings(&self) -> &BreadcrumbSettings {
        &self.settings
    }

    pub fn render_stack(&self, stack: &NavigationStack) -> String {
        self.render(&stack.flatten())
    }

    pub fn render(&self, names: &[String]) -> String {
        let full = names.join(self.settings.separator.as_str());
        let Some(max_width) = self.settings.max_width else {
            return full;
        };
        if display_width(&full) <= max_width {
            return full;
        }

        let ellipsis = &self.settings.ellipsis;
        for start in 1..names.len() {
            let candidate = format!(
                "{ellipsis}{}{}",
                self.settings.separator,
                names[start..].join(self.settings.separator.as_str())
            );
            if display_width(&candidate) <= max_width {
                return candidate;
            }
        }

        // Only the current screen is left and it still does not fit.
        let current = names.last().map(|name| strip_ansi(name)).unwrap_or_default();
        let ellipsis_width = display_width(ellipsis);
        if max_width < ellipsis_width {
            return truncate_left(&current, max_width);
        }
        format!(
            "{ellipsis}{}",
            truncate_left(&current, max_width - ellipsis_width)
        )
    }
}

#[derive(Default)]
struct TrailState {
    names: Vec<String>,
    rendered: String,
    hash: Option<Hash>,
    taken: Option<Hash>,
}

impl TrailState {
    fn refresh(&mut self, breadcrumb: &Breadcrumb) {
        let rendered = breadcrumb.render(&self.names);
        let hash = blake3::hash(rendered.as_bytes());
        if self.hash != Some(hash) {
            self.rendered = rendered;
            self.hash = Some(hash);
        }
    }
}

/// Keeps a rendered breadcrumb in step with a stack.
///
/// Change detection compares the hash of the rendered line with the one last
/// handed out by [`take_dirty`](Self::take_dirty), so transitions that end up
/// drawing the same text (a truncated trail, a pop+push of the same name) do
/// not trigger a repaint.
pub struct BreadcrumbListener {
    breadcrumb: Breadcrumb,
    state: Mutex<TrailState>,
}

impl BreadcrumbListener {
    pub fn new(breadcrumb: Breadcrumb) -> Self {
        Self {
            breadcrumb,
            state: Mutex::new(TrailState::default()),
        }
    }

    /// Register, then seed from the full trail. A plain `add_listener` only
    /// learns the current top and restarts the trail from it.
    pub fn attach(stack: &mut NavigationStack, breadcrumb: Breadcrumb) -> Arc<Self> {
        let listener = Arc::new(Self::new(breadcrumb));
        stack.add_listener(listener.clone());
        listener.update(|names| *names = stack.flatten());
        listener
    }

    pub fn rendered(&self) -> String {
        self.state
            .lock()
            .map(|state| state.rendered.clone())
            .unwrap_or_default()
    }

    /// Rendered line if it changed since the last call.
    pub fn take_dirty(&self) -> Option<String> {
        let mut state = self.state.lock().ok()?;
        if state.hash == state.taken {
            return None;
        }
        state.taken = state.hash;
        Some(state.rendered.clone())
    }

    fn update(&self, apply: impl FnOnce(&mut Vec<String>)) {
        if let Ok(mut state) = self.state.lock() {
            apply(&mut state.names);
            state.refresh(&self.breadcrumb);
        }
    }
}

impl StackListener for BreadcrumbListener {
    fn stack_pushed(&self, screen: &ScreenRef) {
        self.update(|names| names.push(screen.name().to_string()));
    }

    fn stack_popped(&self, _popped: &ScreenRef, _top: Option<&ScreenRef>) {
        self.update(|names| {
            names.pop();
        });
    }

    fn stack_top(&self, top: &ScreenRef) {
        self.update(|names| *names = vec![top.name().to_string()]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::NamedScreen;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn renders_full_trail_without_budget() {
        let crumb = Breadcrumb::default();
        assert_eq!(crumb.render(&[]), "");
        assert_eq!(
            crumb.render(&names(&["pods", "containers", "logs"])),
            "pods > containers > logs"
        );
    }

    #[test]
    fn drops_oldest_segments_when_too_wide() {
        let crumb = Breadcrumb::with_max_width(20);
        // "… > containers > logs" is 21 columns, "… > logs" is 8.
        assert_eq!(
            crumb.render(&names(&["pods", "containers", "logs"])),
            "… > logs"
        );

        let crumb = Breadcrumb::with_max_width(21);
        assert_eq!(
            crumb.render(&names(&["pods", "containers", "logs"])),
            "… > containers > logs"
        );
    }

    #[test]
    fn truncates_single_oversized_name() {
        let crumb = Breadcrumb::with_max_width(5);
        assert_eq!(crumb.render(&names(&["deployments"])), "…ents");

        let crumb = Breadcrumb::new(BreadcrumbSettings {
            ellipsis: "...".into(),
            max_width: Some(2),
            ..BreadcrumbSettings::default()
        });
        assert_eq!(crumb.render(&names(&["deployments"])), "ts");
    }

    #[test]
    fn styled_names_measure_visible_width() {
        let crumb = Breadcrumb::with_max_width(11);
        let styled = vec!["\x1b[1mpods\x1b[0m".to_string(), "logs".to_string()];
        assert_eq!(crumb.render(&styled), "\x1b[1mpods\x1b[0m > logs");
    }

    #[test]
    fn listener_tracks_stack_and_dirtiness() {
        let mut stack = NavigationStack::new();
        stack.push(NamedScreen::shared("pods"));
        let listener = BreadcrumbListener::attach(&mut stack, Breadcrumb::default());
        assert_eq!(listener.take_dirty(), Some("pods".to_string()));
        assert_eq!(listener.take_dirty(), None);

        stack.push(NamedScreen::shared("logs"));
        assert_eq!(listener.take_dirty(), Some("pods > logs".to_string()));

        stack.pop();
        stack.push(NamedScreen::shared("logs"));
        assert_eq!(listener.take_dirty(), None);
        assert_eq!(listener.rendered(), "pods > logs");

        stack.clear();
        assert_eq!(listener.rendered(), "");
    }

    #[test]
    fn plain_registration_seeds_from_top() {
        let mut stack = NavigationStack::new();
        stack.push(NamedScreen::shared("pods"));
        stack.push(NamedScreen::shared("logs"));
        let listener = Arc::new(BreadcrumbListener::new(Breadcrumb::default()));
        stack.add_listener(listener.clone());
        assert_eq!(listener.rendered(), "logs");

        stack.push(NamedScreen::shared("yaml"));
        assert_eq!(listener.rendered(), "logs > yaml");
    }

    #[test]
    fn reregistration_drops_stale_trail() {
        let mut stack = NavigationStack::new();
        stack.push(NamedScreen::shared("pods"));
        stack.push(NamedScreen::shared("logs"));
        let listener = BreadcrumbListener::attach(&mut stack, Breadcrumb::default());
        assert_eq!(listener.rendered(), "pods > logs");

        let listener_ref: crate::stack::ListenerRef = listener.clone();
        stack.remove_listener(&listener_ref);
        stack.pop();
        stack.push(NamedScreen::shared("x"));
        stack.push(NamedScreen::shared("logs"));
        stack.add_listener(listener_ref);

        assert_eq!(listener.rendered(), "logs");
        stack.pop();
        assert_eq!(listener.rendered(), "");
    }
}
