//! Flattens a document into the list of headings and editable fields the
//! form pane shows, honouring the approval set.

use crate::core::approval::ApprovalSet;
use crate::core::label::{display_label, item_label};
use crate::core::value::Value;
use crate::core::value_path::ValuePath;
use crate::core::visibility::{NodeDecision, Visibility};

const ROOT_LABEL: &str = "Value";
const LIST_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Checkbox,
    Null,
}

impl FieldKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Bool(_) => Self::Checkbox,
            Value::Number(_) => Self::Number,
            Value::Null => Self::Null,
            _ => Self::Text,
        }
    }
}

/// Ordering of the root level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootOrder {
    /// One stable pass in document order.
    #[default]
    Document,
    /// With an unrestricted approval set, root fields come before root
    /// sections. Deeper levels keep document order.
    FieldsFirst,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormItem {
    Heading {
        label: String,
        path: ValuePath,
        depth: usize,
    },
    Field {
        label: String,
        path: ValuePath,
        depth: usize,
        kind: FieldKind,
        display: String,
    },
    ListField {
        label: String,
        path: ValuePath,
        depth: usize,
        display: String,
    },
}

impl FormItem {
    pub fn label(&self) -> &str {
        match self {
            Self::Heading { label, .. } | Self::Field { label, .. } | Self::ListField { label, .. } => {
                label
            }
        }
    }

    pub fn path(&self) -> &ValuePath {
        match self {
            Self::Heading { path, .. } | Self::Field { path, .. } | Self::ListField { path, .. } => {
                path
            }
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Self::Heading { depth, .. } | Self::Field { depth, .. } | Self::ListField { depth, .. } => {
                *depth
            }
        }
    }

    pub fn is_editable(&self) -> bool {
        !matches!(self, Self::Heading { .. })
    }

    /// Current text of an editable item.
    pub fn display(&self) -> Option<&str> {
        match self {
            Self::Heading { .. } => None,
            Self::Field { display, .. } | Self::ListField { display, .. } => Some(display),
        }
    }
}

pub fn build_form(document: &Value, approvals: &ApprovalSet, order: RootOrder) -> Vec<FormItem> {
    let mut builder = FormBuilder {
        visibility: Visibility::new(approvals),
        out: Vec::new(),
    };
    let root = ValuePath::empty();
    if document.is_container() && !document.is_primitive_list() {
        builder.children(document, &root, 0, order);
    } else {
        builder.node(ROOT_LABEL.to_string(), document, root, 0);
    }
    builder.out
}

struct FormBuilder<'a> {
    visibility: Visibility<'a>,
    out: Vec<FormItem>,
}

impl FormBuilder<'_> {
    fn node(&mut self, label: String, value: &Value, path: ValuePath, depth: usize) {
        match self.visibility.decide(value, &path) {
            NodeDecision::Hidden => {}
            NodeDecision::Field => self.out.push(FormItem::Field {
                label,
                depth,
                kind: FieldKind::of(value),
                display: value.to_text_scalar().unwrap_or_default(),
                path,
            }),
            NodeDecision::ListField => self.out.push(FormItem::ListField {
                label,
                depth,
                display: join_list(value),
                path,
            }),
            NodeDecision::Section => {
                self.out.push(FormItem::Heading {
                    label,
                    path: path.clone(),
                    depth,
                });
                self.children(value, &path, depth + 1, RootOrder::Document);
            }
            NodeDecision::Inline => self.children(value, &path, depth, RootOrder::Document),
        }
    }

    fn children(&mut self, value: &Value, path: &ValuePath, depth: usize, order: RootOrder) {
        let entries: Vec<(String, &Value, ValuePath)> = match value {
            Value::Object(map) => map
                .iter()
                .map(|(key, child)| (display_label(key), child, path.child_key(key.as_str())))
                .collect(),
            Value::List(items) => items
                .iter()
                .enumerate()
                .map(|(index, child)| (item_label(index), child, path.child_index(index)))
                .collect(),
            _ => return,
        };

        let fields_first =
            order == RootOrder::FieldsFirst && self.visibility.approvals().is_unrestricted();
        if !fields_first {
            for (label, child, child_path) in entries {
                self.node(label, child, child_path, depth);
            }
            return;
        }

        let (leaves, sections): (Vec<_>, Vec<_>) = entries
            .into_iter()
            .partition(|(_, child, _)| child.is_primitive() || child.is_primitive_list());
        for (label, child, child_path) in leaves.into_iter().chain(sections) {
            self.node(label, child, child_path, depth);
        }
    }
}

fn join_list(value: &Value) -> String {
    let Value::List(items) = value else {
        return String::new();
    };
    items
        .iter()
        .filter_map(Value::to_text_scalar)
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::{FieldKind, FormItem, RootOrder, build_form};
    use crate::core::approval::ApprovalSet;
    use crate::core::value::Value;
    use serde_json::json;

    fn summary(items: &[FormItem]) -> Vec<String> {
        items
            .iter()
            .map(|item| match item {
                FormItem::Heading { label, depth, .. } => format!("{depth}# {label}"),
                FormItem::Field { path, depth, display, .. } => {
                    format!("{depth} {path}={display}")
                }
                FormItem::ListField { path, depth, display, .. } => {
                    format!("{depth} {path}=[{display}]")
                }
            })
            .collect()
    }

    #[test]
    fn unrestricted_renders_everything_in_document_order() {
        let doc = Value::from(json!({"firstName": "Ada", "address": {"city": "Paris"}, "age": 36}));
        let items = build_form(&doc, &ApprovalSet::default(), RootOrder::Document);
        assert_eq!(
            summary(&items),
            vec!["0 firstName=Ada", "0# Address", "1 address.city=Paris", "0 age=36"]
        );
        assert_eq!(items[0].label(), "First Name");
    }

    #[test]
    fn single_descendant_approval_keeps_parent_heading() {
        let doc = Value::from(json!({"a": 1, "b": {"c": 2, "d": 3}}));
        let items = build_form(&doc, &ApprovalSet::from_selection(["b.c"]), RootOrder::Document);
        assert_eq!(summary(&items), vec!["0# B", "1 b.c=2"]);
    }

    #[test]
    fn sole_object_approval_collapses_heading() {
        let doc = Value::from(json!({"a": 1, "b": {"c": 2, "d": 3}}));
        let items = build_form(&doc, &ApprovalSet::from_selection(["b"]), RootOrder::Document);
        assert_eq!(summary(&items), vec!["0 b.c=2", "0 b.d=3"]);
    }

    #[test]
    fn two_patterns_do_not_collapse() {
        let doc = Value::from(json!({"a": 1, "b": {"c": 2}}));
        let items = build_form(&doc, &ApprovalSet::from_selection(["b", "a"]), RootOrder::Document);
        assert_eq!(summary(&items), vec!["0 a=1", "0# B", "1 b.c=2"]);
    }

    #[test]
    fn primitive_list_is_one_field() {
        let doc = Value::from(json!({"tags": ["x", "y"], "scores": [1, 2.5]}));
        let items = build_form(&doc, &ApprovalSet::default(), RootOrder::Document);
        assert_eq!(summary(&items), vec!["0 tags=[x, y]", "0 scores=[1, 2.5]"]);
    }

    #[test]
    fn container_list_renders_visible_items_only() {
        let doc = Value::from(json!({"users": [{"name": "Ada"}, {"name": "Lin", "id": 2}]}));
        let items = build_form(
            &doc,
            &ApprovalSet::from_selection(["users.1.name"]),
            RootOrder::Document,
        );
        assert_eq!(
            summary(&items),
            vec!["0# Users", "1# Item 2", "2 users.1.name=Lin"]
        );
    }

    #[test]
    fn fields_first_orders_root_only() {
        let doc = Value::from(json!({"meta": {"x": 1, "y": {"z": 2}, "w": 3}, "name": "n"}));
        let items = build_form(&doc, &ApprovalSet::default(), RootOrder::FieldsFirst);
        assert_eq!(
            summary(&items),
            vec!["0 name=n", "0# Meta", "1 meta.x=1", "1# Y", "2 meta.y.z=2", "1 meta.w=3"]
        );
    }

    #[test]
    fn fields_first_is_ignored_when_restricted() {
        let doc = Value::from(json!({"meta": {"x": 1}, "name": "n"}));
        let items = build_form(
            &doc,
            &ApprovalSet::from_selection(["meta.x", "name"]),
            RootOrder::FieldsFirst,
        );
        assert_eq!(summary(&items), vec!["0# Meta", "1 meta.x=1", "0 name=n"]);
    }

    #[test]
    fn field_kinds_follow_value_types() {
        let doc = Value::from(json!({"on": true, "n": 1, "t": "x", "z": null}));
        let kinds: Vec<FieldKind> = build_form(&doc, &ApprovalSet::default(), RootOrder::Document)
            .into_iter()
            .filter_map(|item| match item {
                FormItem::Field { kind, .. } => Some(kind),
                _ => None,
            })
            .collect();
        assert_eq!(
            kinds,
            vec![FieldKind::Checkbox, FieldKind::Number, FieldKind::Text, FieldKind::Null]
        );
    }

    #[test]
    fn primitive_root_is_a_single_field() {
        let items = build_form(&Value::from("hi"), &ApprovalSet::default(), RootOrder::Document);
        assert_eq!(summary(&items), vec!["0 =hi"]);
        assert_eq!(items[0].label(), "Value");
    }

    #[test]
    fn nested_lists_get_item_headings() {
        let doc = Value::from(json!({"grid": [[1, 2], [{"k": "v"}]]}));
        let items = build_form(&doc, &ApprovalSet::default(), RootOrder::Document);
        assert_eq!(
            summary(&items),
            vec!["0# Grid", "1 grid.0=[1, 2]", "1# Item 2", "2# Item 1", "3 grid.1.0.k=v"]
        );
    }
}
