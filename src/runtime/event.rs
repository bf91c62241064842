use crate::core::mutate::FieldInput;
use crate::core::value_path::ValuePath;

/// Actions emitted by widgets in `InteractionResult`.
/// These flow upward from widgets to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetAction {
    /// One keystroke's worth of change to a form field.
    FieldEdited { path: ValuePath, input: FieldInput },
    /// Full contents of the raw text pane after an edit.
    RawTextChanged(String),
    /// New approval selection, in option order.
    ApprovalsChanged(Vec<String>),
}
