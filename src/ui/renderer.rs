use crate::state::app::{AppState, Pane};
use crate::terminal::CursorPos;
use crate::ui::span::{Span, SpanLine};
use crate::ui::theme::Theme;
use crate::widgets::traits::{Drawable, Interactive, RenderContext};

const HELP: &str = "Tab/Shift+Tab switch pane · Ctrl+F JSON/YAML · Ctrl+Q quit";

#[derive(Debug, Default, Clone)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
}

impl RenderFrame {
    fn push(&mut self, line: SpanLine) {
        self.lines.push(line);
    }

    fn row(&self) -> u16 {
        self.lines.len().min(u16::MAX as usize) as u16
    }
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    theme: Theme,
}

impl Renderer {
    /// Shown while the initial document is fetched.
    pub fn loading(&self, source: &str) -> RenderFrame {
        RenderFrame {
            lines: vec![vec![Span::styled(
                format!("Loading {source}…"),
                self.theme.title,
            )]],
            cursor: None,
        }
    }

    pub fn render(&self, state: &AppState) -> RenderFrame {
        let mut frame = RenderFrame::default();
        let session = state.session();

        frame.push(vec![
            Span::styled("jsonform ", self.theme.title),
            Span::new(state.source().to_string()),
            Span::styled(format!("  [{}]", session.format()), self.theme.notice),
        ]);
        if let Some(notice) = state.notice() {
            frame.push(vec![Span::styled(format!("! {notice}"), self.theme.error)]);
        }

        for pane in Pane::ALL {
            let focused = state.focus() == pane;
            let title_style = if focused {
                self.theme.pane_title_focused
            } else {
                self.theme.pane_title
            };
            frame.push(vec![Span::styled(
                format!("── {} ──", pane.title()),
                title_style,
            )]);

            let ctx = RenderContext { focused };
            let (lines, cursor) = match pane {
                Pane::Fields => draw_widget(state.fields(), &ctx),
                Pane::Raw => draw_widget(state.raw(), &ctx),
                Pane::VisibleKeys => draw_widget(state.keys(), &ctx),
            };
            let origin = frame.row();
            if let Some(local) = cursor {
                frame.cursor = Some(CursorPos {
                    col: local.col,
                    row: origin.saturating_add(local.row),
                });
            }
            frame.lines.extend(lines);

            if pane == Pane::Raw {
                if let Some(err) = session.parse_error() {
                    frame.push(vec![Span::styled(
                        format!("Invalid {}: {}", session.format(), err.detail()),
                        self.theme.error,
                    )]);
                }
            }
        }

        frame.push(vec![Span::styled(HELP, self.theme.help)]);
        frame
    }
}

fn draw_widget<W: Drawable + Interactive>(
    widget: &W,
    ctx: &RenderContext,
) -> (Vec<SpanLine>, Option<CursorPos>) {
    let cursor = if ctx.focused { widget.cursor_pos() } else { None };
    (widget.draw(ctx).lines, cursor)
}
