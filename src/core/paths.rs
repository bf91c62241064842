use indexmap::IndexSet;

use crate::core::approval::WILDCARD;
use crate::core::value::Value;
use crate::core::value_path::ValuePath;

/// Every addressable path of `document`, dot-joined, in pre-order, led by the
/// synthetic wildcard entry.
pub fn enumerate_paths(document: &Value) -> Vec<String> {
    let mut out = IndexSet::new();
    out.insert(WILDCARD.to_string());
    collect(document, &ValuePath::empty(), &mut out);
    out.into_iter().collect()
}

fn collect(value: &Value, prefix: &ValuePath, out: &mut IndexSet<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = prefix.child_key(key.as_str());
                out.insert(path.joined());
                collect(child, &path, out);
            }
        }
        Value::List(items) => {
            for (index, child) in items.iter().enumerate() {
                let path = prefix.child_index(index);
                out.insert(path.joined());
                collect(child, &path, out);
            }
        }
        _ => {}
    }
}
