//! Path template resolution.

use crate::value::Value;
use std::collections::BTreeMap;

/// Substitutes `:name` placeholders in `template` with the matching parameters.
///
/// Each parameter with a path form replaces the first occurrence of its
/// placeholder. Placeholders without a parameter, or whose parameter has no
/// path form (booleans, nested values), are left in place.
///
/// # Examples
///
/// ```
/// use rip::{path::resolve_path, Params, Value};
///
/// let mut params = Params::new();
/// params.insert("id".to_string(), Value::from(1));
/// params.insert("rev".to_string(), Value::from(1.5));
///
/// assert_eq!(resolve_path("/users/:id/:rev", &params), "/users/1/1.500000");
/// assert_eq!(resolve_path("/users/:id", &Params::new()), "/users/:id");
/// ```
pub fn resolve_path(template: &str, params: &BTreeMap<String, Value>) -> String {
    let mut path = template.to_owned();

    for (name, value) in params {
        let Some(replacement) = value.to_param() else {
            continue;
        };
        if let Some(start) = find_placeholder(&path, name) {
            path.replace_range(start..start + name.len() + 1, &replacement);
        }
    }

    path
}

/// Byte offset of the first `:name` not followed by another name character,
/// so `:id` never matches inside `:idx`.
fn find_placeholder(path: &str, name: &str) -> Option<usize> {
    let placeholder = format!(":{name}");
    let mut from = 0;

    while let Some(offset) = path[from..].find(&placeholder) {
        let start = from + offset;
        let end = start + placeholder.len();
        let continues = path[end..]
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_');
        if !continues {
            return Some(start);
        }
        from = end;
    }

    None
}
