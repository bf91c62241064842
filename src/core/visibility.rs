use crate::core::approval::ApprovalSet;
use crate::core::value::Value;
use crate::core::value_path::ValuePath;

/// How one document node shows up in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeDecision {
    Hidden,
    /// Primitive rendered as one editable field.
    Field,
    /// Primitive-only array rendered as one comma-joined field.
    ListField,
    /// Container rendered under its own heading.
    Section,
    /// Container whose children are rendered without a heading, because the
    /// approval set names exactly this node and nothing else.
    Inline,
}

impl NodeDecision {
    pub fn is_visible(self) -> bool {
        self != Self::Hidden
    }
}

pub struct Visibility<'a> {
    approvals: &'a ApprovalSet,
}

impl<'a> Visibility<'a> {
    pub fn new(approvals: &'a ApprovalSet) -> Self {
        Self { approvals }
    }

    pub fn approvals(&self) -> &ApprovalSet {
        self.approvals
    }

    pub fn is_leaf_approved(&self, path: &ValuePath) -> bool {
        self.approvals.is_approved(path)
    }

    /// True when `path` itself or anything below `node` is approved.
    pub fn subtree_has_approved_descendant(&self, node: &Value, path: &ValuePath) -> bool {
        self.is_leaf_approved(path) || self.has_approved_children(node, path)
    }

    fn has_approved_children(&self, node: &Value, path: &ValuePath) -> bool {
        match node {
            Value::Object(map) => map.iter().any(|(key, child)| {
                self.subtree_has_approved_descendant(child, &path.child_key(key.as_str()))
            }),
            Value::List(items) => items.iter().enumerate().any(|(index, child)| {
                self.subtree_has_approved_descendant(child, &path.child_index(index))
            }),
            _ => false,
        }
    }

    pub fn decide(&self, node: &Value, path: &ValuePath) -> NodeDecision {
        match node {
            Value::Object(_) => {
                if !self.has_approved_children(node, path) {
                    return NodeDecision::Hidden;
                }
                if self.approvals.sole_pattern() == Some(path.joined().as_str()) {
                    return NodeDecision::Inline;
                }
                NodeDecision::Section
            }
            Value::List(_) if node.is_primitive_list() => {
                if self.is_leaf_approved(path) {
                    NodeDecision::ListField
                } else {
                    NodeDecision::Hidden
                }
            }
            Value::List(_) => {
                if self.has_approved_children(node, path) {
                    NodeDecision::Section
                } else {
                    NodeDecision::Hidden
                }
            }
            _ => {
                if self.is_leaf_approved(path) {
                    NodeDecision::Field
                } else {
                    NodeDecision::Hidden
                }
            }
        }
    }
}
