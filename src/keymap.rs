//! Terminal key bindings for back-navigation.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::stack::NavigationStack;

/// Navigation intents a key can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationCommand {
    /// Pop the current screen, keeping the bottom one.
    Back,
    /// Pop down to the bottom screen.
    Root,
}

impl NavigationCommand {
    /// Apply the command, returning how many screens were popped.
    ///
    /// The bottom screen is never popped; "back" from it is meaningless.
    pub fn apply(self, stack: &mut NavigationStack) -> usize {
        let mut popped = 0;
        while stack.len() > 1 {
            stack.pop();
            popped += 1;
            if self == NavigationCommand::Back {
                break;
            }
        }
        popped
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Binding {
    code: KeyCode,
    modifiers: KeyModifiers,
    command: NavigationCommand,
}

/// Ordered key-to-command table. The first matching binding wins.
#[derive(Debug, Clone)]
pub struct NavigationKeymap {
    bindings: Vec<Binding>,
}

impl Default for NavigationKeymap {
    fn default() -> Self {
        Self::empty()
            .bind(KeyCode::Esc, KeyModifiers::NONE, NavigationCommand::Back)
            .bind(KeyCode::Backspace, KeyModifiers::NONE, NavigationCommand::Back)
            .bind(KeyCode::Home, KeyModifiers::NONE, NavigationCommand::Root)
    }
}

impl NavigationKeymap {
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    pub fn bind(
        mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        command: NavigationCommand,
    ) -> Self {
        self.bindings.push(Binding {
            code,
            modifiers,
            command,
        });
        self
    }

    /// Resolve a key press. Releases never map to a command.
    pub fn resolve(&self, key: &KeyEvent) -> Option<NavigationCommand> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        self.bindings
            .iter()
            .find(|binding| binding.code == key.code && binding.modifiers == key.modifiers)
            .map(|binding| binding.command)
    }

    /// Resolve and apply in one step. Returns the command and the pop count.
    pub fn handle(
        &self,
        key: &KeyEvent,
        stack: &mut NavigationStack,
    ) -> Option<(NavigationCommand, usize)> {
        let command = self.resolve(key)?;
        Some((command, command.apply(stack)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::NamedScreen;
    use crossterm::event::KeyEventState;

    fn stack_of(depth: usize) -> NavigationStack {
        let mut stack = NavigationStack::new();
        for i in 0..depth {
            stack.push(NamedScreen::shared(format!("s{i}")));
        }
        stack
    }

    #[test]
    fn default_bindings_resolve() {
        let keymap = NavigationKeymap::default();
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        let home = KeyEvent::new(KeyCode::Home, KeyModifiers::NONE);
        let ctrl_esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::CONTROL);
        assert_eq!(keymap.resolve(&esc), Some(NavigationCommand::Back));
        assert_eq!(keymap.resolve(&home), Some(NavigationCommand::Root));
        assert_eq!(keymap.resolve(&ctrl_esc), None);
    }

    #[test]
    fn release_events_are_ignored() {
        let keymap = NavigationKeymap::default();
        let release = KeyEvent {
            code: KeyCode::Esc,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(keymap.resolve(&release), None);
    }

    #[test]
    fn back_keeps_bottom_screen() {
        let mut stack = stack_of(2);
        assert_eq!(NavigationCommand::Back.apply(&mut stack), 1);
        assert!(stack.is_last());
        assert_eq!(NavigationCommand::Back.apply(&mut stack), 0);
        assert!(stack.is_last());

        let mut empty = stack_of(0);
        assert_eq!(NavigationCommand::Back.apply(&mut empty), 0);
    }

    #[test]
    fn root_pops_to_bottom() {
        let mut stack = stack_of(4);
        let keymap = NavigationKeymap::default();
        let home = KeyEvent::new(KeyCode::Home, KeyModifiers::NONE);
        assert_eq!(
            keymap.handle(&home, &mut stack),
            Some((NavigationCommand::Root, 3))
        );
        assert_eq!(stack.flatten(), vec!["s0"]);
    }

    #[test]
    fn custom_bindings_extend_table() {
        let keymap = NavigationKeymap::empty().bind(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
            NavigationCommand::Back,
        );
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(keymap.resolve(&q), Some(NavigationCommand::Back));
        assert_eq!(keymap.resolve(&esc), None);
    }
}
