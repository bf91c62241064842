//! Editing session: the document, its raw text, and the approval set.
//!
//! The document and the raw buffer are kept in sync in both directions. A
//! field edit rewrites the buffer; a buffer edit replaces the document only
//! when the text parses. An unparsable buffer is kept verbatim so no
//! keystrokes are lost, and the last valid document stays in charge of the
//! form.
//!
//! List fields keep the element type their list had when the document last
//! arrived (load or raw text), so clearing a number list and retyping it
//! still yields numbers.

use std::collections::HashMap;

use thiserror::Error;

use crate::core::approval::ApprovalSet;
use crate::core::form::{FormItem, RootOrder, build_form};
use crate::core::format::{self, DocumentFormat, FormatError};
use crate::core::mutate::{self, FieldInput, ListKind, MutateError};
use crate::core::paths::enumerate_paths;
use crate::core::value::Value;
use crate::core::value_path::ValuePath;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Mutate(#[from] MutateError),
}

#[derive(Debug, Clone)]
pub struct Session {
    document: Value,
    raw_text: String,
    format: DocumentFormat,
    approvals: ApprovalSet,
    paths: Vec<String>,
    parse_error: Option<FormatError>,
    root_order: RootOrder,
    list_kinds: HashMap<ValuePath, ListKind>,
}

impl Session {
    pub fn new(document: Value, format: DocumentFormat) -> Self {
        let raw_text = format::serialize(&document, format);
        let paths = enumerate_paths(&document);
        let list_kinds = mutate::list_kinds(&document);
        Self {
            document,
            raw_text,
            format,
            approvals: ApprovalSet::default(),
            paths,
            parse_error: None,
            root_order: RootOrder::default(),
            list_kinds,
        }
    }

    pub fn with_approvals(mut self, approvals: ApprovalSet) -> Self {
        self.approvals = approvals;
        self
    }

    pub fn with_root_order(mut self, order: RootOrder) -> Self {
        self.root_order = order;
        self
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn raw_text(&self) -> &str {
        self.raw_text.as_str()
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn approvals(&self) -> &ApprovalSet {
        &self.approvals
    }

    /// Options for the approval selector.
    pub fn paths(&self) -> &[String] {
        self.paths.as_slice()
    }

    pub fn parse_error(&self) -> Option<&FormatError> {
        self.parse_error.as_ref()
    }

    pub fn root_order(&self) -> RootOrder {
        self.root_order
    }

    pub fn value_at(&self, path: &ValuePath) -> Option<&Value> {
        self.document.get_path(path)
    }

    pub fn form(&self) -> Vec<FormItem> {
        build_form(&self.document, &self.approvals, self.root_order)
    }

    /// Applies one field edit and rewrites the raw buffer from the result.
    pub fn edit_field(&mut self, path: &ValuePath, input: FieldInput) -> Result<(), SessionError> {
        let input = match (input, self.list_kinds.get(path)) {
            (FieldInput::Text(text), Some(&element)) => FieldInput::List { text, element },
            (input, _) => input,
        };
        let next = mutate::apply_edit(&self.document, path, input)?;
        tracing::debug!(path = %path, "field edited");
        self.document = next;
        self.raw_text = format::serialize(&self.document, self.format);
        self.parse_error = None;
        Ok(())
    }

    /// Stores `text` as typed and replaces the document if it parses.
    /// Returns whether the document was replaced.
    pub fn set_raw_text(&mut self, text: impl Into<String>) -> bool {
        self.raw_text = text.into();
        match format::deserialize(&self.raw_text, self.format) {
            Ok(document) => {
                self.paths = enumerate_paths(&document);
                self.list_kinds = mutate::list_kinds(&document);
                self.document = document;
                self.parse_error = None;
                true
            }
            Err(err) => {
                tracing::debug!(error = %err, "raw text does not parse");
                self.parse_error = Some(err);
                false
            }
        }
    }

    /// Switches format, re-serializing the last valid document. Unparsed
    /// text in the old format is dropped.
    pub fn set_format(&mut self, format: DocumentFormat) {
        if self.parse_error.is_some() {
            tracing::warn!(from = %self.format, to = %format, "discarding unparsed raw text");
        }
        self.format = format;
        self.raw_text = format::serialize(&self.document, format);
        self.parse_error = None;
    }

    pub fn toggle_format(&mut self) {
        self.set_format(self.format.toggled());
    }

    /// Replaces the approval set with `selection`, verbatim.
    pub fn set_approvals<I, S>(&mut self, selection: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.approvals = ApprovalSet::from_selection(selection);
        tracing::debug!(approvals = ?self.approvals.patterns(), "approvals changed");
    }
}

#[cfg(test)]
mod tests {
    use super::{Session, SessionError};
    use crate::core::format::DocumentFormat;
    use crate::core::mutate::{FieldInput, MutateError};
    use crate::core::value::Value;
    use crate::core::value_path::ValuePath;
    use serde_json::json;

    fn session() -> Session {
        Session::new(
            Value::from(json!({"name": "Ada", "age": 36, "tags": ["x"]})),
            DocumentFormat::Json,
        )
    }

    #[test]
    fn new_session_serializes_and_enumerates() {
        let session = session();
        assert!(session.raw_text().contains("\"name\": \"Ada\""));
        assert_eq!(session.paths(), &["*", "name", "age", "tags", "tags.0"]);
        assert!(session.approvals().is_unrestricted());
    }

    #[test]
    fn field_edit_rewrites_raw_text() {
        let mut session = session();
        session
            .edit_field(&ValuePath::parse_dotted("age"), FieldInput::from("37"))
            .expect("edit");
        assert!(session.raw_text().contains("\"age\": 37"));
        assert_eq!(
            session.value_at(&ValuePath::parse_dotted("age")),
            Some(&Value::Number(37.0))
        );
    }

    #[test]
    fn cleared_number_list_retypes_as_numbers() {
        let mut session = Session::new(Value::from(json!({"nums": [1, 2]})), DocumentFormat::Json);
        let nums = ValuePath::parse_dotted("nums");
        session.edit_field(&nums, FieldInput::from("")).expect("clear");
        assert_eq!(session.value_at(&nums), Some(&Value::List(Vec::new())));
        session.edit_field(&nums, FieldInput::from("5")).expect("retype");
        assert_eq!(session.value_at(&nums), Some(&Value::from(json!([5]))));
        assert!(session.raw_text().contains("5"));
        assert!(!session.raw_text().contains("\"5\""));
    }

    #[test]
    fn raw_text_resets_list_element_kinds() {
        let mut session = Session::new(Value::from(json!({"flags": [true]})), DocumentFormat::Json);
        let flags = ValuePath::parse_dotted("flags");
        assert!(session.set_raw_text("{\"flags\": [\"a\"]}"));
        session.edit_field(&flags, FieldInput::from("true, b")).expect("edit");
        assert_eq!(session.value_at(&flags), Some(&Value::from(json!(["true", "b"]))));
    }

    #[test]
    fn invalid_raw_text_keeps_document_and_buffer() {
        let mut session = session();
        let before = session.document().clone();
        assert!(!session.set_raw_text("{\"name\": "));
        assert_eq!(session.document(), &before);
        assert_eq!(session.raw_text(), "{\"name\": ");
        assert!(session.parse_error().is_some());
        assert_eq!(session.paths(), &["*", "name", "age", "tags", "tags.0"]);
    }

    #[test]
    fn valid_raw_text_replaces_document_and_paths() {
        let mut session = session();
        session.set_raw_text("{oops");
        assert!(session.set_raw_text("{\"city\": {\"zip\": 1}}"));
        assert!(session.parse_error().is_none());
        assert_eq!(session.paths(), &["*", "city", "city.zip"]);
        assert_eq!(session.raw_text(), "{\"city\": {\"zip\": 1}}");
    }

    #[test]
    fn format_switch_drops_unparsed_text() {
        let mut session = session();
        session.set_raw_text("not: [valid");
        session.set_format(DocumentFormat::Yaml);
        assert!(session.parse_error().is_none());
        assert!(session.raw_text().starts_with("name: Ada"));
        session.toggle_format();
        assert_eq!(session.format(), DocumentFormat::Json);
        assert!(session.raw_text().starts_with('{'));
    }

    #[test]
    fn yaml_buffer_parses_as_yaml() {
        let mut session = session();
        session.set_format(DocumentFormat::Yaml);
        assert!(session.set_raw_text("name: Lin\nage: 40\n"));
        assert_eq!(session.document(), &Value::from(json!({"name": "Lin", "age": 40})));
    }

    #[test]
    fn approvals_replace_verbatim_and_never_empty() {
        let mut session = session();
        session.set_approvals(["age"]);
        assert_eq!(session.approvals().patterns(), &["age".to_string()]);
        assert_eq!(session.form().len(), 1);
        session.set_approvals(Vec::<String>::new());
        assert!(session.approvals().is_unrestricted());
    }

    #[test]
    fn unknown_path_edit_fails_without_changes() {
        let mut session = session();
        let raw = session.raw_text().to_string();
        let err = session
            .edit_field(&ValuePath::parse_dotted("missing"), FieldInput::from("x"))
            .expect_err("must fail");
        assert_eq!(
            err,
            SessionError::Mutate(MutateError::PathNotFound("missing".to_string()))
        );
        assert_eq!(session.raw_text(), raw);
    }
}
