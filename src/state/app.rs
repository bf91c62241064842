use crate::runtime::event::WidgetAction;
use crate::state::session::Session;
use crate::terminal::{KeyEvent, TerminalSize};
use crate::ui::layout::PaneHeights;
use crate::widgets::traits::{InteractionResult, Interactive, TextAction};
use crate::widgets::{FormView, PathSelect, RawEditor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Fields,
    Raw,
    VisibleKeys,
}

impl Pane {
    pub const ALL: [Pane; 3] = [Pane::Fields, Pane::Raw, Pane::VisibleKeys];

    pub fn title(self) -> &'static str {
        match self {
            Self::Fields => "Fields",
            Self::Raw => "Raw",
            Self::VisibleKeys => "Visible Keys",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Fields => Self::Raw,
            Self::Raw => Self::VisibleKeys,
            Self::VisibleKeys => Self::Fields,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Fields => Self::VisibleKeys,
            Self::Raw => Self::Fields,
            Self::VisibleKeys => Self::Raw,
        }
    }
}

/// Host state: the session plus one widget per pane, kept in step with it.
pub struct AppState {
    session: Session,
    source: String,
    fields: FormView,
    raw: RawEditor,
    keys: PathSelect,
    focus: Pane,
    notice: Option<String>,
    should_exit: bool,
}

impl AppState {
    pub fn new(session: Session, source: impl Into<String>) -> Self {
        let fields = FormView::new(session.form());
        let raw = RawEditor::new(session.raw_text());
        let keys = PathSelect::new(session.paths(), session.approvals().patterns());
        Self {
            session,
            source: source.into(),
            fields,
            raw,
            keys,
            focus: Pane::Fields,
            notice: None,
            should_exit: false,
        }
    }

    /// One-line message shown under the title, e.g. a failed load.
    pub fn with_notice(mut self, notice: Option<String>) -> Self {
        self.notice = notice;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn source(&self) -> &str {
        self.source.as_str()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn focus(&self) -> Pane {
        self.focus
    }

    pub fn fields(&self) -> &FormView {
        &self.fields
    }

    pub fn raw(&self) -> &RawEditor {
        &self.raw
    }

    pub fn keys(&self) -> &PathSelect {
        &self.keys
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn request_exit(&mut self) {
        self.should_exit = true;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn resize(&mut self, size: TerminalSize) {
        let heights = PaneHeights::for_terminal(size.height);
        self.fields.set_height(heights.fields);
        self.raw.set_height(heights.raw);
        self.keys.set_height(heights.keys);
    }

    pub fn toggle_format(&mut self) {
        self.session.toggle_format();
        tracing::info!(format = %self.session.format(), "format switched");
        self.raw.set_text(self.session.raw_text());
    }

    pub fn dispatch_key_to_focused(&mut self, key: KeyEvent) -> InteractionResult {
        self.focused_widget().on_key(key)
    }

    pub fn dispatch_text_action_to_focused(&mut self, action: TextAction) -> InteractionResult {
        self.focused_widget().on_text_action(action)
    }

    /// Applies one widget action to the session and refreshes the other
    /// panes. Returns whether anything needs redrawing.
    pub fn handle_widget_action(&mut self, action: WidgetAction) -> bool {
        match action {
            WidgetAction::FieldEdited { path, input } => {
                let result = self.session.edit_field(&path, input);
                if let Err(err) = &result {
                    tracing::error!(%path, error = %err, "field edit rejected");
                }
                debug_assert!(result.is_ok(), "form offered a path missing from the document: {path}");
                if result.is_err() {
                    return false;
                }
                self.raw.set_text(self.session.raw_text());
                self.fields.set_items(self.session.form());
            }
            WidgetAction::RawTextChanged(text) => {
                if self.session.set_raw_text(text) {
                    self.fields.set_items(self.session.form());
                    self.keys.set_options(self.session.paths());
                }
            }
            WidgetAction::ApprovalsChanged(selection) => {
                self.session.set_approvals(selection);
                self.keys.set_selected(self.session.approvals().patterns());
                self.fields.set_items(self.session.form());
            }
        }
        true
    }

    fn focused_widget(&mut self) -> &mut dyn Interactive {
        match self.focus {
            Pane::Fields => &mut self.fields,
            Pane::Raw => &mut self.raw,
            Pane::VisibleKeys => &mut self.keys,
        }
    }
}
