use crate::ui::style::{Color, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub pane_title: Style,
    pub pane_title_focused: Style,
    pub error: Style,
    pub notice: Style,
    pub help: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::new().color(Color::Cyan).bold(),
            pane_title: Style::new().color(Color::DarkGrey),
            pane_title_focused: Style::new().color(Color::Cyan).bold(),
            error: Style::new().color(Color::Red),
            notice: Style::new().color(Color::Yellow),
            help: Style::new().color(Color::DarkGrey),
        }
    }
}
