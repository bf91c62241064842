use crate::terminal::KeyEvent;
use crate::widgets::traits::TextAction;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Exit,
    NextFocus,
    PrevFocus,
    ToggleFormat,
    InputKey(KeyEvent),
    TextAction(TextAction),
    Noop,
}
