use serde_json::Value;
use tracing::warn;

/// Normalize an arbitrary payload into text ready for line splitting.
///
/// `null` becomes empty, strings go through [`normalize`], anything else is
/// pretty-printed JSON (or its compact form if that fails).
pub fn normalize_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => normalize(text),
        other => match serde_json::to_string_pretty(other) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "falling back to compact rendering of structured input");
                other.to_string()
            }
        },
    }
}

/// Canonicalize line endings and double-escaped sequences, then trim.
///
/// Upstream APIs sometimes deliver text with literal `\n` / `\t` escapes
/// still in it; those become real newlines and tabs.
pub fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace("\\r\\n", "\n")
        .replace("\\n", "\n")
        .replace("\\t", "\t")
        .trim()
        .to_string()
}
