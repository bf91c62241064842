use crate::runtime::event::WidgetAction;
use crate::terminal::{CursorPos, KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::scroll::ScrollState;
use crate::widgets::text_edit;
use crate::widgets::traits::{
    DrawOutput, Drawable, InteractionResult, Interactive, RenderContext, TextEditState,
};

const DEFAULT_HEIGHT: usize = 12;

/// Multi-line editor for the serialized document. Every change is reported
/// as the full buffer so the session can try to parse it.
pub struct RawEditor {
    /// Invariant: never empty.
    lines: Vec<String>,
    row: usize,
    col: usize,
    scroll: ScrollState,
    height: usize,
}

impl RawEditor {
    pub fn new(text: &str) -> Self {
        let mut editor = Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            scroll: ScrollState::new(Some(DEFAULT_HEIGHT)),
            height: DEFAULT_HEIGHT,
        };
        editor.set_text(text);
        editor
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Replaces the buffer, keeping the cursor where it was as far as the new
    /// text allows.
    pub fn set_text(&mut self, text: &str) {
        if self.text() == text {
            return;
        }
        self.lines = text.split('\n').map(String::from).collect();
        ScrollState::clamp_active(&mut self.row, self.lines.len());
        self.col = text_edit::clamp_cursor(self.col, &self.lines[self.row]);
        self.scroll.ensure_visible(self.row, self.lines.len());
    }

    pub fn set_height(&mut self, height: usize) {
        self.height = height.max(1);
        self.scroll
            .set_max_visible(self.height, self.row, self.lines.len());
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    fn changed(&mut self) -> InteractionResult {
        self.scroll.ensure_visible(self.row, self.lines.len());
        InteractionResult::with_action(WidgetAction::RawTextChanged(self.text()))
    }

    fn moved(&mut self) -> InteractionResult {
        self.scroll.ensure_visible(self.row, self.lines.len());
        InteractionResult::handled()
    }

    fn current_line_len(&self) -> usize {
        text_edit::char_count(&self.lines[self.row])
    }

    fn split_line(&mut self) {
        let line = &self.lines[self.row];
        let byte = text_edit::byte_index_at_char(line, self.col);
        let right = line[byte..].to_string();
        let indent: String = line.chars().take_while(|ch| *ch == ' ').collect();
        let indent = indent.chars().take(self.col).collect::<String>();
        self.lines[self.row].truncate(byte);
        self.row += 1;
        self.col = indent.chars().count();
        self.lines.insert(self.row, format!("{indent}{right}"));
    }

    fn merge_with_prev(&mut self) -> bool {
        if self.row == 0 {
            return false;
        }
        let prev_len = text_edit::char_count(&self.lines[self.row - 1]);
        let current = self.lines.remove(self.row);
        self.lines[self.row - 1].push_str(&current);
        self.row -= 1;
        self.col = prev_len;
        true
    }

    fn merge_with_next(&mut self) -> bool {
        if self.row + 1 >= self.lines.len() {
            return false;
        }
        let next = self.lines.remove(self.row + 1);
        self.lines[self.row].push_str(&next);
        true
    }

    fn num_width(&self) -> usize {
        self.lines.len().to_string().len()
    }

    /// "│ {num}  "
    fn gutter_width(&self) -> usize {
        1 + 1 + self.num_width() + 2
    }

    fn gutter_span(&self, line_idx: usize) -> Span {
        let text = format!("│ {:>width$}  ", line_idx + 1, width = self.num_width());
        Span::styled(text, Style::new().color(Color::DarkGrey))
    }

    fn vertical(&mut self, delta: isize) -> InteractionResult {
        let target = self.row as isize + delta;
        let last = self.lines.len() as isize - 1;
        self.row = target.clamp(0, last) as usize;
        self.col = self.col.min(self.current_line_len());
        self.moved()
    }
}

impl Drawable for RawEditor {
    fn draw(&self, _ctx: &RenderContext) -> DrawOutput {
        let (start, end) = self.scroll.visible_range(self.lines.len());
        let mut lines: Vec<_> = (start..end)
            .map(|idx| vec![self.gutter_span(idx), Span::new(self.lines[idx].clone())])
            .collect();
        if let Some(footer) = self.scroll.footer(self.lines.len()) {
            lines.push(vec![Span::styled(
                format!("  {footer}"),
                Style::new().color(Color::DarkGrey),
            )]);
        }
        DrawOutput { lines }
    }
}

impl Interactive for RawEditor {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Enter => {
                self.split_line();
                self.changed()
            }
            KeyCode::Char(ch) => {
                text_edit::insert_char(&mut self.lines[self.row], &mut self.col, ch);
                self.changed()
            }
            KeyCode::Backspace => {
                let edited = if self.col > 0 {
                    text_edit::backspace_char(&mut self.lines[self.row], &mut self.col)
                } else {
                    self.merge_with_prev()
                };
                if edited { self.changed() } else { InteractionResult::handled() }
            }
            KeyCode::Delete => {
                let edited = if self.col < self.current_line_len() {
                    text_edit::delete_char(&mut self.lines[self.row], &mut self.col)
                } else {
                    self.merge_with_next()
                };
                if edited { self.changed() } else { InteractionResult::handled() }
            }
            KeyCode::Left => {
                if !text_edit::move_left(&mut self.col, &self.lines[self.row]) && self.row > 0 {
                    self.row -= 1;
                    self.col = self.current_line_len();
                }
                self.moved()
            }
            KeyCode::Right => {
                if !text_edit::move_right(&mut self.col, &self.lines[self.row])
                    && self.row + 1 < self.lines.len()
                {
                    self.row += 1;
                    self.col = 0;
                }
                self.moved()
            }
            KeyCode::Up => self.vertical(-1),
            KeyCode::Down => self.vertical(1),
            KeyCode::PageUp => self.vertical(-(self.height as isize)),
            KeyCode::PageDown => self.vertical(self.height as isize),
            KeyCode::Home => {
                self.col = 0;
                self.moved()
            }
            KeyCode::End => {
                self.col = self.current_line_len();
                self.moved()
            }
            KeyCode::BackTab | KeyCode::Tab => InteractionResult::ignored(),
            KeyCode::Esc | KeyCode::Unknown => InteractionResult::ignored(),
        }
    }

    fn text_editing(&mut self) -> Option<TextEditState<'_>> {
        Some(TextEditState {
            value: &mut self.lines[self.row],
            cursor: &mut self.col,
        })
    }

    fn on_text_edited(&mut self) -> InteractionResult {
        self.changed()
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        let (start, _) = self.scroll.visible_range(self.lines.len());
        let visible_row = self.row.saturating_sub(start);
        let col = self.gutter_width() + text_edit::display_width_to(&self.lines[self.row], self.col);
        Some(CursorPos {
            row: visible_row as u16,
            col: col as u16,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::RawEditor;
    use crate::runtime::event::WidgetAction;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::traits::{Interactive, TextAction};

    fn press(editor: &mut RawEditor, code: KeyCode) -> Vec<WidgetAction> {
        editor.on_key(KeyEvent::plain(code)).actions
    }

    #[test]
    fn typing_reports_full_buffer() {
        let mut editor = RawEditor::new("{}");
        press(&mut editor, KeyCode::Right);
        let actions = press(&mut editor, KeyCode::Char('1'));
        assert_eq!(actions, vec![WidgetAction::RawTextChanged("{1}".to_string())]);
    }

    #[test]
    fn enter_splits_and_keeps_indent() {
        let mut editor = RawEditor::new("{\n    \"a\": 1\n}");
        press(&mut editor, KeyCode::Down);
        press(&mut editor, KeyCode::End);
        press(&mut editor, KeyCode::Enter);
        assert_eq!(editor.text(), "{\n    \"a\": 1\n    \n}");
        assert_eq!(editor.cursor(), (2, 4));
    }

    #[test]
    fn backspace_at_line_start_merges() {
        let mut editor = RawEditor::new("ab\ncd");
        press(&mut editor, KeyCode::Down);
        press(&mut editor, KeyCode::Home);
        let actions = press(&mut editor, KeyCode::Backspace);
        assert_eq!(actions, vec![WidgetAction::RawTextChanged("abcd".to_string())]);
        assert_eq!(editor.cursor(), (0, 2));
        editor.set_text("x");
        assert_eq!(editor.cursor(), (0, 1));
    }

    #[test]
    fn movement_emits_nothing() {
        let mut editor = RawEditor::new("ab\ncd");
        assert!(press(&mut editor, KeyCode::Down).is_empty());
        assert!(press(&mut editor, KeyCode::Left).is_empty());
        assert_eq!(editor.cursor(), (0, 2));
    }

    #[test]
    fn word_delete_is_an_edit() {
        let mut editor = RawEditor::new("hello world");
        press(&mut editor, KeyCode::End);
        let result = editor.on_text_action(TextAction::DeleteWordLeft);
        assert_eq!(
            result.actions,
            vec![WidgetAction::RawTextChanged("hello ".to_string())]
        );
    }

    #[test]
    fn cursor_accounts_for_gutter_and_scroll() {
        let text = (1..=20).map(|n| n.to_string()).collect::<Vec<_>>().join("\n");
        let mut editor = RawEditor::new(&text);
        editor.set_height(5);
        for _ in 0..10 {
            press(&mut editor, KeyCode::Down);
        }
        let cursor = editor.cursor_pos().expect("cursor");
        assert_eq!(cursor.row, 4);
        assert_eq!(cursor.col, 6);
    }
}
