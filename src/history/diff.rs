//! Structural diff between two model snapshots.
//!
//! Used by the debug recorder to annotate mutation entries with a compact,
//! human-readable description of what the presenter changed.

use serde::Serialize;
use serde_json::Value;

/// Compute a line-per-change diff between two models.
///
/// Both models are serialized to JSON and object trees are walked
/// recursively. Arrays and scalars compare as whole leaves. Equal models
/// produce an empty string. If either model fails to serialize the diff
/// degrades to a placeholder rather than an error; the recorder is
/// observational and must never influence control flow.
///
/// # Example
///
/// ```rust
/// use samloop::model_diff;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Launcher { counter: u32, aborted: bool }
///
/// let old = Launcher { counter: 10, aborted: false };
/// let new = Launcher { counter: 9, aborted: false };
///
/// assert_eq!(model_diff(&old, &new), "~ $.counter: 10 -> 9");
/// assert_eq!(model_diff(&old, &old), "");
/// ```
pub fn model_diff<M: Serialize>(old: &M, new: &M) -> String {
    match (serde_json::to_value(old), serde_json::to_value(new)) {
        (Ok(old), Ok(new)) => {
            let mut lines = Vec::new();
            diff_value(&mut lines, "$", &old, &new);
            lines.join("\n")
        }
        _ => String::from("<diff unavailable: model failed to serialize>"),
    }
}

fn diff_value(lines: &mut Vec<String>, path: &str, old: &Value, new: &Value) {
    match (old, new) {
        (Value::Object(old_map), Value::Object(new_map)) => {
            for (key, old_child) in old_map {
                let child_path = format!("{path}.{key}");
                match new_map.get(key) {
                    Some(new_child) => diff_value(lines, &child_path, old_child, new_child),
                    None => lines.push(format!("- {child_path}: {old_child}")),
                }
            }
            for (key, new_child) in new_map {
                if !old_map.contains_key(key) {
                    lines.push(format!("+ {path}.{key}: {new_child}"));
                }
            }
        }
        _ if old == new => {}
        _ => lines.push(format!("~ {path}: {old} -> {new}")),
    }
}
