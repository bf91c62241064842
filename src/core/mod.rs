pub mod approval;
pub mod form;
pub mod format;
pub mod label;
pub mod mutate;
pub mod paths;
pub mod value;
pub mod value_path;
pub mod visibility;

pub use approval::{ApprovalSet, WILDCARD};
pub use form::{FieldKind, FormItem, RootOrder, build_form};
pub use format::{DocumentFormat, FormatError};
pub use mutate::{FieldInput, ListKind, MutateError, apply_edit};
pub use paths::enumerate_paths;
pub use value::Value;
pub use value_path::{PathSegment, ValuePath};
