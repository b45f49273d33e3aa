//! Display strings for record field values as the platform returns them.

use serde_json::{Map, Value};

/// Render one field value for a human-readable report line.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "✓".to_string(),
        Value::Bool(false) => "✗".to_string(),
        Value::Number(n) => render_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => match segment_text(items) {
            Some(text) => text,
            None => items
                .iter()
                .map(render_value)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        },
        Value::Object(map) => render_object(map),
    }
}

// A text cell comes back as a list of segments (plain runs, mentions,
// links), each with a `text` key. The segments already carry their own
// spacing.
fn segment_text(items: &[Value]) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    items
        .iter()
        .map(|item| item.get("text").and_then(Value::as_str))
        .collect::<Option<Vec<_>>>()
        .map(|parts| parts.concat())
}

// Whole floats print without the trailing ".0".
fn render_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

// Text segments, user refs and url cells all carry one readable key.
fn render_object(map: &Map<String, Value>) -> String {
    for key in ["text", "name", "link"] {
        if let Some(Value::String(s)) = map.get(key) {
            return s.clone();
        }
    }
    Value::Object(map.clone()).to_string()
}

/// `name: value; name: value` over a record's fields, skipping empty values.
pub fn render_fields(fields: &Map<String, Value>) -> String {
    fields
        .iter()
        .map(|(name, value)| (name, render_value(value)))
        .filter(|(_, rendered)| !rendered.is_empty())
        .map(|(name, rendered)| format!("{name}: {rendered}"))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert_eq!(render_value(&json!("iPhone")), "iPhone");
        assert_eq!(render_value(&json!(100.0)), "100");
        assert_eq!(render_value(&json!(299.99)), "299.99");
        assert_eq!(render_value(&json!(true)), "✓");
        assert_eq!(render_value(&json!(false)), "✗");
        assert_eq!(render_value(&Value::Null), "");
    }

    #[test]
    fn test_arrays_join_items() {
        assert_eq!(render_value(&json!(["hot", "new"])), "hot, new");
        assert_eq!(
            render_value(&json!([{"id": "ou_1", "name": "Ann"}, {"id": "ou_2", "name": "Bo"}])),
            "Ann, Bo"
        );
        assert_eq!(render_value(&json!([])), "");
    }

    #[test]
    fn test_text_segments_concatenate() {
        assert_eq!(
            render_value(&json!([
                {"type": "text", "text": "Ping "},
                {"type": "mention", "text": "@Ann"},
                {"type": "text", "text": " today"}
            ])),
            "Ping @Ann today"
        );
        assert_eq!(
            render_value(&json!([{"type": "text", "text": "part one"}, {"text": " two"}])),
            "part one two"
        );
    }

    #[test]
    fn test_objects_prefer_readable_keys() {
        assert_eq!(
            render_value(&json!({"link": "https://x.cn", "text": "site"})),
            "site"
        );
        assert_eq!(render_value(&json!({"id": "ou_1", "name": "Ann"})), "Ann");
        assert_eq!(render_value(&json!({"link": "https://x.cn"})), "https://x.cn");
        assert_eq!(render_value(&json!({"id": "ou_1"})), r#"{"id":"ou_1"}"#);
    }

    #[test]
    fn test_render_fields_skips_empty() {
        let mut map = Map::new();
        map.insert("listed".into(), json!(true));
        map.insert("name".into(), json!("Mac Studio"));
        map.insert("notes".into(), json!(""));
        map.insert("stock".into(), json!(15));
        assert_eq!(
            render_fields(&map),
            "listed: ✓; name: Mac Studio; stock: 15"
        );
    }
}
