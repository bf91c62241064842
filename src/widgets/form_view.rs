//! The fields pane: headings and editable rows produced by the form builder.
//!
//! Only editable rows can be highlighted. While a row is being edited the
//! widget owns the text buffer and reports every keystroke, so a number field
//! holding `-` is kept as typed even though the document stores NaN.

use crate::core::form::{FieldKind, FormItem};
use crate::core::mutate::FieldInput;
use crate::core::value_path::ValuePath;
use crate::runtime::event::WidgetAction;
use crate::terminal::{CursorPos, KeyCode, KeyEvent};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};
use crate::widgets::scroll::ScrollState;
use crate::widgets::text_edit;
use crate::widgets::traits::{
    DrawOutput, Drawable, InteractionResult, Interactive, RenderContext, TextEditState,
};
use unicode_width::UnicodeWidthStr;

const DEFAULT_HEIGHT: usize = 12;
const MARKER: &str = "❯ ";
const INDENT: &str = "  ";
const EMPTY_FORM: &str = "No approved fields";

#[derive(Debug, Clone)]
struct EditBuffer {
    path: ValuePath,
    text: String,
    cursor: usize,
}

pub struct FormView {
    items: Vec<FormItem>,
    active: usize,
    editing: Option<EditBuffer>,
    scroll: ScrollState,
}

impl FormView {
    pub fn new(items: Vec<FormItem>) -> Self {
        let mut view = Self {
            items: Vec::new(),
            active: 0,
            editing: None,
            scroll: ScrollState::new(Some(DEFAULT_HEIGHT)),
        };
        view.set_items(items);
        view
    }

    /// Replaces the rows, keeping the highlighted field by path. An edit in
    /// progress survives as long as its field does.
    pub fn set_items(&mut self, items: Vec<FormItem>) {
        let current = self.items.get(self.active).map(|item| item.path().clone());
        self.items = items;

        let position = current.and_then(|path| {
            self.items
                .iter()
                .position(|item| item.is_editable() && *item.path() == path)
        });
        match position {
            Some(pos) => self.active = pos,
            None => {
                self.editing = None;
                ScrollState::clamp_active(&mut self.active, self.items.len());
                self.settle_on_editable();
            }
        }
        let still_editing = self.editing.as_ref().is_some_and(|edit| {
            self.items
                .get(self.active)
                .is_some_and(|item| *item.path() == edit.path)
        });
        if !still_editing {
            self.editing = None;
        }
        self.scroll.ensure_visible(self.active, self.items.len());
    }

    pub fn set_height(&mut self, height: usize) {
        self.scroll
            .set_max_visible(height, self.active, self.items.len());
    }

    pub fn items(&self) -> &[FormItem] {
        self.items.as_slice()
    }

    pub fn active_item(&self) -> Option<&FormItem> {
        self.items.get(self.active).filter(|item| item.is_editable())
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    fn settle_on_editable(&mut self) {
        if self.items.get(self.active).is_some_and(FormItem::is_editable) {
            return;
        }
        let forward = self.items[self.active..]
            .iter()
            .position(FormItem::is_editable)
            .map(|offset| self.active + offset);
        let backward = self.items[..self.active.min(self.items.len())]
            .iter()
            .rposition(FormItem::is_editable);
        if let Some(pos) = forward.or(backward) {
            self.active = pos;
        }
    }

    fn step(&mut self, forward: bool) -> InteractionResult {
        self.editing = None;
        let next = if forward {
            self.items
                .iter()
                .enumerate()
                .skip(self.active + 1)
                .find(|(_, item)| item.is_editable())
                .map(|(idx, _)| idx)
        } else {
            self.items[..self.active]
                .iter()
                .rposition(FormItem::is_editable)
        };
        if let Some(idx) = next {
            self.active = idx;
        }
        self.scroll.ensure_visible(self.active, self.items.len());
        InteractionResult::handled()
    }

    fn start_editing(&mut self) -> Option<&mut EditBuffer> {
        let item = self.active_item()?;
        let text = item.display().unwrap_or_default().to_string();
        let path = item.path().clone();
        let cursor = text_edit::char_count(&text);
        self.editing = Some(EditBuffer { path, text, cursor });
        self.editing.as_mut()
    }

    fn toggle_checkbox(&self) -> Option<InteractionResult> {
        let FormItem::Field {
            path,
            kind: FieldKind::Checkbox,
            display,
            ..
        } = self.active_item()?
        else {
            return None;
        };
        let checked = display == "true";
        Some(InteractionResult::with_action(WidgetAction::FieldEdited {
            path: path.clone(),
            input: FieldInput::Bool(!checked),
        }))
    }

    fn edited(&self) -> InteractionResult {
        match &self.editing {
            Some(edit) => InteractionResult::with_action(WidgetAction::FieldEdited {
                path: edit.path.clone(),
                input: FieldInput::Text(edit.text.clone()),
            }),
            None => InteractionResult::handled(),
        }
    }

    fn on_browse_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Up => self.step(false),
            KeyCode::Down => self.step(true),
            KeyCode::PageUp | KeyCode::Home => {
                self.active = 0;
                self.settle_on_editable();
                self.scroll.ensure_visible(self.active, self.items.len());
                InteractionResult::handled()
            }
            KeyCode::PageDown | KeyCode::End => {
                self.active = self.items.len().saturating_sub(1);
                self.settle_on_editable();
                self.scroll.ensure_visible(self.active, self.items.len());
                InteractionResult::handled()
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(result) = self.toggle_checkbox() {
                    return result;
                }
                if key.code == KeyCode::Char(' ') {
                    return self.type_char(' ');
                }
                match self.start_editing() {
                    Some(_) => InteractionResult::handled(),
                    None => InteractionResult::ignored(),
                }
            }
            KeyCode::Char(ch) => {
                if self.toggle_checkbox().is_some() {
                    return InteractionResult::ignored();
                }
                self.type_char(ch)
            }
            _ => InteractionResult::ignored(),
        }
    }

    /// Typing on a highlighted field starts an edit at the end of its text.
    fn type_char(&mut self, ch: char) -> InteractionResult {
        let Some(edit) = self.start_editing() else {
            return InteractionResult::ignored();
        };
        text_edit::insert_char(&mut edit.text, &mut edit.cursor, ch);
        self.edited()
    }

    fn on_edit_key(&mut self, key: KeyEvent) -> InteractionResult {
        let Some(edit) = self.editing.as_mut() else {
            return InteractionResult::ignored();
        };
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                self.editing = None;
                InteractionResult::handled()
            }
            KeyCode::Up => self.step(false),
            KeyCode::Down => self.step(true),
            KeyCode::Char(ch) => {
                text_edit::insert_char(&mut edit.text, &mut edit.cursor, ch);
                self.edited()
            }
            KeyCode::Backspace => {
                if text_edit::backspace_char(&mut edit.text, &mut edit.cursor) {
                    self.edited()
                } else {
                    InteractionResult::handled()
                }
            }
            KeyCode::Delete => {
                if text_edit::delete_char(&mut edit.text, &mut edit.cursor) {
                    self.edited()
                } else {
                    InteractionResult::handled()
                }
            }
            KeyCode::Left => {
                text_edit::move_left(&mut edit.cursor, &edit.text);
                InteractionResult::handled()
            }
            KeyCode::Right => {
                text_edit::move_right(&mut edit.cursor, &edit.text);
                InteractionResult::handled()
            }
            KeyCode::Home => {
                edit.cursor = 0;
                InteractionResult::handled()
            }
            KeyCode::End => {
                edit.cursor = text_edit::char_count(&edit.text);
                InteractionResult::handled()
            }
            _ => InteractionResult::ignored(),
        }
    }

    fn row_prefix(&self, idx: usize, focused: bool) -> (String, usize) {
        let item = &self.items[idx];
        let marker = if focused && idx == self.active && item.is_editable() {
            MARKER
        } else {
            "  "
        };
        let prefix = format!("{marker}{}", INDENT.repeat(item.depth()));
        let width = UnicodeWidthStr::width(prefix.as_str());
        (prefix, width)
    }

    fn draw_row(&self, idx: usize, focused: bool) -> SpanLine {
        let item = &self.items[idx];
        let (prefix, _) = self.row_prefix(idx, focused);
        let mut line = vec![Span::styled(prefix, Style::new().color(Color::Cyan))];
        let highlighted = focused && idx == self.active;

        match item {
            FormItem::Heading { label, .. } => {
                line.push(Span::styled(label.clone(), Style::new().bold()));
            }
            FormItem::Field { label, kind, display, .. } => {
                line.push(label_span(label, highlighted));
                if *kind == FieldKind::Checkbox {
                    let (mark, style) = if display == "true" {
                        ("[x]", Style::new().color(Color::Green))
                    } else {
                        ("[ ]", Style::new().color(Color::DarkGrey))
                    };
                    line.push(Span::styled(mark, style));
                } else {
                    line.push(self.value_span(idx, display, *kind == FieldKind::Number));
                }
            }
            FormItem::ListField { label, display, .. } => {
                line.push(label_span(label, highlighted));
                line.push(self.value_span(idx, display, false));
                if highlighted {
                    line.push(Span::styled(
                        "  (comma separated)",
                        Style::new().color(Color::DarkGrey),
                    ));
                }
            }
        }
        line
    }

    fn value_span(&self, idx: usize, display: &str, numeric: bool) -> Span {
        if let Some(edit) = self.editing.as_ref().filter(|_| idx == self.active) {
            return Span::styled(edit.text.clone(), Style::new().color(Color::Yellow));
        }
        let style = if numeric {
            Style::new().color(Color::Magenta)
        } else {
            Style::new()
        };
        Span::styled(display.to_string(), style)
    }
}

fn label_span(label: &str, highlighted: bool) -> Span {
    let style = if highlighted {
        Style::new().color(Color::Cyan).bold()
    } else {
        Style::new()
    };
    Span::styled(format!("{label}: "), style)
}

impl Drawable for FormView {
    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        if self.items.is_empty() {
            return DrawOutput {
                lines: vec![vec![Span::styled(
                    format!("  {EMPTY_FORM}"),
                    Style::new().color(Color::DarkGrey),
                )]],
            };
        }
        let (start, end) = self.scroll.visible_range(self.items.len());
        let mut lines: Vec<SpanLine> = (start..end)
            .map(|idx| self.draw_row(idx, ctx.focused))
            .collect();
        if let Some(footer) = self.scroll.footer(self.items.len()) {
            lines.push(vec![Span::styled(
                format!("  {footer}"),
                Style::new().color(Color::DarkGrey),
            )]);
        }
        DrawOutput { lines }
    }
}

impl Interactive for FormView {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if self.editing.is_some() {
            self.on_edit_key(key)
        } else {
            self.on_browse_key(key)
        }
    }

    fn text_editing(&mut self) -> Option<TextEditState<'_>> {
        let edit = self.editing.as_mut()?;
        Some(TextEditState {
            value: &mut edit.text,
            cursor: &mut edit.cursor,
        })
    }

    fn on_text_edited(&mut self) -> InteractionResult {
        self.edited()
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        let edit = self.editing.as_ref()?;
        let item = self.items.get(self.active)?;
        let (start, _) = self.scroll.visible_range(self.items.len());
        let (_, prefix_width) = self.row_prefix(self.active, true);
        let label_width = UnicodeWidthStr::width(item.label()) + 2;
        let col = prefix_width + label_width + text_edit::display_width_to(&edit.text, edit.cursor);
        Some(CursorPos {
            row: self.active.saturating_sub(start) as u16,
            col: col as u16,
        })
    }
}
