//! Canonical value formatting for audit messages.
//!
//! Settings values arrive as arbitrary JSON. Scalars render as their plain
//! text form, composite values as canonical JSON with lexicographically
//! sorted keys, so the same logical value always renders to the same text.
//! The output carries no HTML of its own and passes through [`esc_html`]
//! before being embedded in a message.

use serde_json::Value;
use std::fmt::Write;

/// Render an option value as message text.
///
/// Scalars coerce to their plain string representation with no quotes or
/// type markers; `null` renders as the empty string. Arrays and objects
/// serialize to canonical JSON: sorted object keys, `/` escaped as `\/`,
/// non-ASCII text preserved verbatim.
pub fn format_value(value: &Value) -> String {
    let mut output = String::new();
    match value {
        Value::Null => {}
        Value::Bool(b) => output.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => serialize_number(n, &mut output),
        Value::String(s) => output.push_str(s),
        composite => serialize_value(composite, &mut output),
    }
    output
}

fn serialize_value(value: &Value, output: &mut String) {
    match value {
        Value::Object(map) => serialize_object(map, output),
        Value::Array(arr) => serialize_array(arr, output),
        Value::String(s) => serialize_string(s, output),
        Value::Number(n) => serialize_number(n, output),
        Value::Bool(b) => output.push_str(if *b { "true" } else { "false" }),
        Value::Null => output.push_str("null"),
    }
}

/// Objects serialize with lexicographically sorted keys.
fn serialize_object(map: &serde_json::Map<String, Value>, output: &mut String) {
    output.push('{');

    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();

    for (i, key) in keys.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        serialize_string(key, output);
        output.push(':');
        serialize_value(&map[*key], output);
    }

    output.push('}');
}

fn serialize_array(arr: &[Value], output: &mut String) {
    output.push('[');

    for (i, item) in arr.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        serialize_value(item, output);
    }

    output.push(']');
}

/// Strings escape quotes, backslashes, slashes and control characters;
/// everything else, non-ASCII included, is preserved verbatim.
fn serialize_string(s: &str, output: &mut String) {
    output.push('"');

    for ch in s.chars() {
        match ch {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '/' => output.push_str("\\/"),
            '\u{08}' => output.push_str("\\b"),
            '\u{0C}' => output.push_str("\\f"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            ch if ch.is_control() => {
                let _ = write!(output, "\\u{:04x}", ch as u32);
            }
            ch => output.push(ch),
        }
    }

    output.push('"');
}

/// Numbers follow ECMAScript formatting: whole values in integer form.
fn serialize_number(num: &serde_json::Number, output: &mut String) {
    if let Some(i) = num.as_i64() {
        let _ = write!(output, "{i}");
    } else if let Some(u) = num.as_u64() {
        let _ = write!(output, "{u}");
    } else if let Some(f) = num.as_f64() {
        if f.fract() == 0.0 && f.abs() < 1e15 && f.abs() >= 1e-4 {
            let _ = write!(output, "{}", f as i64);
        } else {
            let _ = write!(output, "{f}");
        }
    }
}

/// Escape text for embedding in an HTML-capable message body.
pub fn esc_html(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#039;"),
            ch => output.push(ch),
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_render_without_quotes_or_type_markers() {
        assert_eq!(format_value(&json!("My Site")), "My Site");
        assert_eq!(format_value(&json!(42)), "42");
        assert_eq!(format_value(&json!(5.0)), "5");
        assert_eq!(format_value(&json!(3.25)), "3.25");
        assert_eq!(format_value(&json!(true)), "true");
        assert_eq!(format_value(&json!(null)), "");
    }

    #[test]
    fn composite_keys_are_sorted() {
        let value = json!({"z": 1, "a": 2, "m": {"y": 1, "x": 2}});
        assert_eq!(format_value(&value), r#"{"a":2,"m":{"x":2,"y":1},"z":1}"#);
    }

    #[test]
    fn arrays_preserve_order() {
        let value = json!([3, 1, 2]);
        assert_eq!(format_value(&value), "[3,1,2]");
    }

    #[test]
    fn slashes_are_escaped_inside_composites() {
        let value = json!({"url": "https://example.com/feed"});
        assert_eq!(format_value(&value), r#"{"url":"https:\/\/example.com\/feed"}"#);
    }

    #[test]
    fn non_ascii_text_is_preserved_verbatim() {
        let value = json!({"title": "Ünïcodé 標題"});
        assert_eq!(format_value(&value), "{\"title\":\"Ünïcodé 標題\"}");
        assert_eq!(format_value(&json!("Ünïcodé")), "Ünïcodé");
    }

    #[test]
    fn formatting_is_deterministic() {
        let value = json!({"b": [1, 2], "a": {"k": "v/w"}});
        let first = format_value(&value);
        let second = format_value(&value);
        assert_eq!(first, second);
        assert_eq!(first, r#"{"a":{"k":"v\/w"},"b":[1,2]}"#);
    }

    #[test]
    fn html_escaping_covers_markup_characters() {
        assert_eq!(esc_html("a & b"), "a &amp; b");
        assert_eq!(esc_html("<strong>'x'</strong>"), "&lt;strong&gt;&#039;x&#039;&lt;/strong&gt;");
        assert_eq!(esc_html("plain"), "plain");
    }
}
