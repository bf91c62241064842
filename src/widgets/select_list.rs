use crate::runtime::event::WidgetAction;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::scroll::ScrollState;
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};

const DEFAULT_HEIGHT: usize = 8;

/// Multi-select over the enumerated document paths.
pub struct PathSelect {
    options: Vec<String>,
    selected: Vec<String>,
    active: usize,
    scroll: ScrollState,
}

impl PathSelect {
    pub fn new(options: &[String], selected: &[String]) -> Self {
        let mut select = Self {
            options: Vec::new(),
            selected: selected.to_vec(),
            active: 0,
            scroll: ScrollState::new(Some(DEFAULT_HEIGHT)),
        };
        select.set_options(options);
        select
    }

    /// Replaces the options, keeping the highlighted option when it survives.
    pub fn set_options(&mut self, options: &[String]) {
        if self.options == options {
            return;
        }
        let current = self.options.get(self.active).cloned();
        self.options = options.to_vec();
        if let Some(pos) = current.and_then(|name| self.options.iter().position(|o| *o == name)) {
            self.active = pos;
        }
        ScrollState::clamp_active(&mut self.active, self.options.len());
        self.scroll.ensure_visible(self.active, self.options.len());
    }

    pub fn set_selected(&mut self, selected: &[String]) {
        self.selected = selected.to_vec();
    }

    pub fn set_height(&mut self, height: usize) {
        self.scroll
            .set_max_visible(height, self.active, self.options.len());
    }

    pub fn active_option(&self) -> Option<&str> {
        self.options.get(self.active).map(String::as_str)
    }

    pub fn is_selected(&self, option: &str) -> bool {
        self.selected.iter().any(|s| s == option)
    }

    /// Selection after toggling `option`: options in option order, then any
    /// selected pattern that is not an option.
    fn toggled_selection(&self, option: &str) -> Vec<String> {
        let now_selected = !self.is_selected(option);
        let keep = |candidate: &str| {
            if candidate == option {
                now_selected
            } else {
                self.is_selected(candidate)
            }
        };
        let mut next: Vec<String> = self
            .options
            .iter()
            .filter(|o| keep(o.as_str()))
            .cloned()
            .collect();
        next.extend(
            self.selected
                .iter()
                .filter(|s| !self.options.contains(s))
                .cloned(),
        );
        next
    }

    fn move_to(&mut self, active: usize) -> InteractionResult {
        self.active = active;
        ScrollState::clamp_active(&mut self.active, self.options.len());
        self.scroll.ensure_visible(self.active, self.options.len());
        InteractionResult::handled()
    }
}

impl Drawable for PathSelect {
    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let (start, end) = self.scroll.visible_range(self.options.len());
        let mut lines = Vec::with_capacity(end - start + 1);
        for idx in start..end {
            let option = &self.options[idx];
            let active = ctx.focused && idx == self.active;
            let marker = if active { "❯ " } else { "  " };
            let (check, check_style) = if self.is_selected(option) {
                ("[x] ", Style::new().color(Color::Green))
            } else {
                ("[ ] ", Style::new().color(Color::DarkGrey))
            };
            let text_style = if active {
                Style::new().color(Color::Cyan).bold()
            } else {
                Style::new()
            };
            lines.push(vec![
                Span::styled(marker, Style::new().color(Color::Cyan)),
                Span::styled(check, check_style),
                Span::styled(option.clone(), text_style),
            ]);
        }
        if let Some(footer) = self.scroll.footer(self.options.len()) {
            lines.push(vec![Span::styled(
                format!("  {footer}"),
                Style::new().color(Color::DarkGrey),
            )]);
        }
        DrawOutput { lines }
    }
}

impl Interactive for PathSelect {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if self.options.is_empty() {
            return InteractionResult::ignored();
        }
        match key.code {
            KeyCode::Up => self.move_to(self.active.saturating_sub(1)),
            KeyCode::Down => self.move_to(self.active + 1),
            KeyCode::Home => self.move_to(0),
            KeyCode::End => self.move_to(self.options.len() - 1),
            KeyCode::PageUp => {
                let page = self.scroll.max_visible.unwrap_or(1);
                self.move_to(self.active.saturating_sub(page))
            }
            KeyCode::PageDown => {
                let page = self.scroll.max_visible.unwrap_or(1);
                self.move_to(self.active + page)
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                let option = self.options[self.active].clone();
                let next = self.toggled_selection(&option);
                self.selected.clone_from(&next);
                InteractionResult::with_action(WidgetAction::ApprovalsChanged(next))
            }
            _ => InteractionResult::ignored(),
        }
    }
}
