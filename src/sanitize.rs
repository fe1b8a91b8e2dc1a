//! LaTeX escaping for resume text.

use serde_json::Value;

/// Literal replacements, applied top to bottom.
///
/// Order matters: no replacement may produce text that a later rule matches,
/// otherwise that text would be escaped twice.
pub const RULES: &[(&str, &str)] = &[
    ("#", r"\#"),
    ("%", r"\%"),
    ("&", r"\&"),
    ("°", r"\textdegree{}"),
    (" - ", " -- "),
];

/// Escapes one string.
///
/// ```
/// assert_eq!(texume::escape("R&D - 100%"), r"R\&D -- 100\%");
/// ```
pub fn escape(text: &str) -> String {
    RULES
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Escapes every string leaf of a JSON tree.
///
/// Object keys, array order and non-string scalars are left as they are.
pub fn sanitize(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(escape(&s)),
        Value::Array(items) => Value::Array(items.into_iter().map(sanitize).collect()),
        Value::Object(map) => {
            Value::Object(map.into_iter().map(|(k, v)| (k, sanitize(v))).collect())
        }
        other => other,
    }
}
