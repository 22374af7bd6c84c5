pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Flatten nested objects into dotted field names, e.g.
/// `{"result": {"total_cost": "1"}}` -> `result.total_cost = "1"`.
pub(crate) fn flatten_fields(map: &Map<String, Value>) -> Vec<(String, Value)> {
    let mut out = Vec::new();
    flatten_into(map, "", &mut out);
    out
}

fn flatten_into(map: &Map<String, Value>, prefix: &str, out: &mut Vec<(String, Value)>) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => flatten_into(inner, &name, out),
            _ => out.push((name, val.clone())),
        }
    }
}

/// Render a scalar JSON value as plain text.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(scalar_text).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_result() {
        let value = json!({
            "result": { "monthly_installment": "5130.26", "total_cost": "245559.26" },
            "buyout_within_range": true
        });
        let fields = flatten_fields(value.as_object().unwrap());
        let names: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
        assert!(names.contains(&"result.monthly_installment"));
        assert!(names.contains(&"result.total_cost"));
        assert!(names.contains(&"buyout_within_range"));
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(scalar_text(&json!("8.5")), "8.5");
        assert_eq!(scalar_text(&json!(35)), "35");
        assert_eq!(scalar_text(&json!(null)), "");
        assert_eq!(scalar_text(&json!(["a", "b"])), "a, b");
    }
}
