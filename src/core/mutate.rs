use std::collections::HashMap;

use indexmap::IndexMap;
use thiserror::Error;

use crate::core::value::Value;
use crate::core::value_path::{PathSegment, ValuePath};

/// Raw value coming out of a form widget.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    Text(String),
    Bool(bool),
    /// Comma-joined list text whose pieces are parsed as `element`, whatever
    /// the list currently holds.
    List { text: String, element: ListKind },
}

/// Element type of a primitive list field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Number,
    Bool,
    Text,
}

impl ListKind {
    /// Numbers or booleans only keep their type; anything else, including
    /// the empty list, is text.
    pub fn of(items: &[Value]) -> Self {
        if items.is_empty() {
            return Self::Text;
        }
        if items.iter().all(|item| matches!(item, Value::Number(_))) {
            return Self::Number;
        }
        if items.iter().all(|item| matches!(item, Value::Bool(_))) {
            return Self::Bool;
        }
        Self::Text
    }
}

impl From<&str> for FieldInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldInput {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutateError {
    #[error("no value at path `{0}`")]
    PathNotFound(String),
}

/// Returns a new document with the node at `path` replaced by `input`,
/// coerced to the type of the value it replaces. `document` is left as is.
pub fn apply_edit(
    document: &Value,
    path: &ValuePath,
    input: FieldInput,
) -> Result<Value, MutateError> {
    let original = document
        .get_path(path)
        .ok_or_else(|| MutateError::PathNotFound(path.joined()))?;
    let replacement = coerce(original, input);
    Ok(replace_at(document, path.segments(), replacement))
}

pub fn coerce(original: &Value, input: FieldInput) -> Value {
    match original {
        Value::Number(_) => match input {
            FieldInput::Text(text) | FieldInput::List { text, .. } => parse_number(&text),
            FieldInput::Bool(flag) => Value::Number(if flag { 1.0 } else { 0.0 }),
        },
        Value::Bool(_) => match input {
            FieldInput::Bool(flag) => Value::Bool(flag),
            FieldInput::Text(text) | FieldInput::List { text, .. } => {
                Value::Bool(text.eq_ignore_ascii_case("true"))
            }
        },
        Value::List(items) if original.is_primitive_list() => match input {
            FieldInput::List { text, element } => split_list(&text, element),
            FieldInput::Text(text) => split_list(&text, ListKind::of(items)),
            FieldInput::Bool(flag) => split_list(&flag.to_string(), ListKind::of(items)),
        },
        _ => match input {
            FieldInput::Text(text) | FieldInput::List { text, .. } => Value::Text(text),
            FieldInput::Bool(flag) => Value::Bool(flag),
        },
    }
}

/// Element type of every primitive list in `document`, keyed by its path.
pub fn list_kinds(document: &Value) -> HashMap<ValuePath, ListKind> {
    let mut kinds = HashMap::new();
    collect_list_kinds(document, &ValuePath::empty(), &mut kinds);
    kinds
}

fn collect_list_kinds(node: &Value, path: &ValuePath, kinds: &mut HashMap<ValuePath, ListKind>) {
    match node {
        Value::List(items) if node.is_primitive_list() => {
            kinds.insert(path.clone(), ListKind::of(items));
        }
        Value::List(items) => {
            for (index, item) in items.iter().enumerate() {
                collect_list_kinds(item, &path.child_index(index), kinds);
            }
        }
        Value::Object(map) => {
            for (key, child) in map {
                collect_list_kinds(child, &path.child_key(key.as_str()), kinds);
            }
        }
        _ => {}
    }
}

/// Empty text is zero; anything unparsable is NaN.
fn parse_number(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::Number(0.0);
    }
    Value::Number(trimmed.parse::<f64>().unwrap_or(f64::NAN))
}

/// Rebuilds a primitive list from its comma-joined field text.
fn split_list(text: &str, element: ListKind) -> Value {
    if text.trim().is_empty() {
        return Value::List(Vec::new());
    }
    let items = text
        .split(',')
        .map(str::trim)
        .map(|piece| match element {
            ListKind::Number => parse_number(piece),
            ListKind::Bool => Value::Bool(piece.eq_ignore_ascii_case("true")),
            ListKind::Text => Value::Text(piece.to_string()),
        })
        .collect();
    Value::List(items)
}

/// Rebuilds the spine down to the edited node; siblings are cloned.
fn replace_at(node: &Value, segments: &[PathSegment], leaf: Value) -> Value {
    let Some((head, rest)) = segments.split_first() else {
        return leaf;
    };
    let mut pending = Some(leaf);
    match (node, head) {
        (Value::Object(map), PathSegment::Key(key)) => {
            let mut next = IndexMap::with_capacity(map.len());
            for (name, child) in map {
                let child = match pending.take() {
                    Some(leaf) if name == key => replace_at(child, rest, leaf),
                    other => {
                        pending = other;
                        child.clone()
                    }
                };
                next.insert(name.clone(), child);
            }
            Value::Object(next)
        }
        (Value::List(items), PathSegment::Index(index)) => {
            let mut next = Vec::with_capacity(items.len());
            for (idx, child) in items.iter().enumerate() {
                let child = match pending.take() {
                    Some(leaf) if idx == *index => replace_at(child, rest, leaf),
                    other => {
                        pending = other;
                        child.clone()
                    }
                };
                next.push(child);
            }
            Value::List(next)
        }
        _ => node.clone(),
    }
}
