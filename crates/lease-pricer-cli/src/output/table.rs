use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{flatten_fields, scalar_text};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => print_envelope(result, map),
            None => print_fields(map),
        },
        Value::Array(arr) => print_rows(arr),
        _ => println!("{}", value),
    }
}

fn print_envelope(result: &Value, envelope: &Map<String, Value>) {
    if let Some(Value::Object(display)) = envelope.get("display") {
        let mut builder = Builder::default();
        builder.push_record(["Quote", ""]);
        for (label, key) in [
            ("Monthly installment", "monthly_installment"),
            ("Total lease cost", "total_cost"),
            ("Total cost ratio", "cost_ratio"),
        ] {
            if let Some(val) = display.get(key) {
                builder.push_record([label.to_string(), scalar_text(val)]);
            }
        }
        println!("{}\n", Table::from(builder));
    }

    match result {
        Value::Object(res_map) => print_fields(res_map),
        other => println!("{}", scalar_text(other)),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_fields(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in flatten_fields(map) {
        builder.push_record([key, scalar_text(&val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            println!("{}", scalar_text(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for map in arr.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| map.get(h.as_str()).map(scalar_text).unwrap_or_default())
            .collect();
        builder.push_record(row);
    }
    println!("{}", Table::from(builder));
}
