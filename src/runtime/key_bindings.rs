use crate::runtime::command::Command;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use crate::widgets::traits::TextAction;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

/// Global shortcuts, checked before the focused pane sees a key.
#[derive(Default)]
pub struct KeyBindings {
    bindings: HashMap<KeyBinding, Command>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut manager = Self::default();
        manager.install_defaults();
        manager
    }

    pub fn bind(&mut self, key: KeyBinding, command: Command) {
        self.bindings.insert(key, command);
    }

    pub fn resolve(&self, event: KeyEvent) -> Option<Command> {
        self.bindings.get(&KeyBinding::from_event(event)).cloned()
    }

    fn install_defaults(&mut self) {
        self.bind(KeyBinding::ctrl(KeyCode::Char('c')), Command::Exit);
        self.bind(KeyBinding::ctrl(KeyCode::Char('q')), Command::Exit);
        self.bind(KeyBinding::key(KeyCode::Tab), Command::NextFocus);
        self.bind(KeyBinding::key(KeyCode::BackTab), Command::PrevFocus);
        self.bind(
            KeyBinding::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            Command::PrevFocus,
        );
        self.bind(KeyBinding::ctrl(KeyCode::Char('f')), Command::ToggleFormat);
        self.bind(
            KeyBinding::ctrl(KeyCode::Backspace),
            Command::TextAction(TextAction::DeleteWordLeft),
        );
        self.bind(
            KeyBinding::ctrl(KeyCode::Char('w')),
            Command::TextAction(TextAction::DeleteWordLeft),
        );
        self.bind(
            KeyBinding::ctrl(KeyCode::Delete),
            Command::TextAction(TextAction::DeleteWordRight),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyBinding, KeyBindings};
    use crate::runtime::command::Command;
    use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
    use crate::widgets::traits::TextAction;

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(ch),
            modifiers: KeyModifiers::CONTROL,
        }
    }

    #[test]
    fn defaults_cover_global_keys() {
        let bindings = KeyBindings::new();
        assert_eq!(bindings.resolve(ctrl('q')), Some(Command::Exit));
        assert_eq!(bindings.resolve(ctrl('f')), Some(Command::ToggleFormat));
        assert_eq!(
            bindings.resolve(ctrl('w')),
            Some(Command::TextAction(TextAction::DeleteWordLeft))
        );
        assert_eq!(
            bindings.resolve(KeyEvent::plain(KeyCode::Tab)),
            Some(Command::NextFocus)
        );
    }

    #[test]
    fn plain_keys_fall_through() {
        let bindings = KeyBindings::new();
        assert_eq!(bindings.resolve(KeyEvent::plain(KeyCode::Char('f'))), None);
        assert_eq!(bindings.resolve(KeyEvent::plain(KeyCode::Enter)), None);
    }

    #[test]
    fn custom_binding_overrides_default() {
        let mut bindings = KeyBindings::new();
        bindings.bind(KeyBinding::ctrl(KeyCode::Char('q')), Command::Noop);
        assert_eq!(bindings.resolve(ctrl('q')), Some(Command::Noop));
    }
}
