use serde_json::Value;

use super::{flatten_fields, scalar_text};

/// Fields printed by `--output minimal`, in order of preference.
const PRIORITY_FIELDS: [&str; 3] = ["result.monthly_installment", "valid", "monthly_installment"];

/// Print just the key answer value from the output.
///
/// A quote prints its formatted installment; otherwise the first priority
/// field found in the result, falling back to the first result field.
pub fn print_minimal(value: &Value) {
    if let Some(Value::String(installment)) = value
        .get("display")
        .and_then(|d| d.get("monthly_installment"))
    {
        println!("{}", installment);
        return;
    }

    let result_obj = value.get("result").unwrap_or(value);

    if let Value::Object(map) = result_obj {
        let fields = flatten_fields(map);
        for key in PRIORITY_FIELDS {
            if let Some((_, val)) = fields.iter().find(|(k, v)| k == key && !v.is_null()) {
                println!("{}", scalar_text(val));
                return;
            }
        }
        if let Some((key, val)) = fields.first() {
            println!("{}: {}", key, scalar_text(val));
            return;
        }
    }

    println!("{}", scalar_text(result_obj));
}
