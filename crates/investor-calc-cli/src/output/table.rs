use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use tabled::{builder::Builder, Table};

use super::inr::format_inr;

/// Result fields holding rupee amounts. These render in Indian currency
/// notation; everything else prints as-is.
const MONEY_FIELDS: &[&str] = &[
    "total_investment",
    "estimated_returns",
    "total_value",
    "monthly_contribution",
    "invested_in_year",
    "cumulative_investment",
    "value_at_year_end",
    "total_withdrawals",
    "remaining_amount",
    "monthly_withdrawal",
    "withdrawn_in_year",
    "closing_balance",
    "present_value",
    "payment",
    "future_value",
];

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_flat_object(value);
            }
        }
        Value::Array(arr) => {
            print_array_table(arr);
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    if let Value::Object(res_map) = result {
        // Scalar fields go in the summary table; year-by-year style arrays
        // get their own table below it
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        let mut breakdowns: Vec<(&str, &Vec<Value>)> = Vec::new();
        for (key, val) in res_map {
            match val {
                Value::Array(arr) if arr.first().map_or(false, Value::is_object) => {
                    breakdowns.push((key, arr));
                }
                _ => {
                    builder.push_record([key.as_str(), &format_field(key, val)]);
                }
            }
        }
        let table = Table::from(builder);
        println!("{}", table);

        for (key, arr) in breakdowns {
            println!("\n{}:", key);
            print_array_table(arr);
        }
    } else {
        print_flat_object(&Value::Object(envelope.clone()));
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_field(key, val)]);
        }
        let table = Table::from(builder);
        println!("{}", table);
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| {
                        map.get(h.as_str())
                            .map(|v| format_field(h, v))
                            .unwrap_or_default()
                    })
                    .collect();
                builder.push_record(row);
            }
        }

        let table = Table::from(builder);
        println!("{}", table);
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

/// Money fields render in rupee notation when their value parses as a
/// decimal; anything else falls back to the plain rendering.
fn format_field(key: &str, value: &Value) -> String {
    if MONEY_FIELDS.contains(&key) {
        let parsed = match value {
            Value::String(s) => Decimal::from_str(s).ok(),
            Value::Number(n) => n.as_f64().and_then(|f| Decimal::try_from(f).ok()),
            _ => None,
        };
        if let Some(amount) = parsed {
            return format_inr(amount);
        }
    }
    format_value(value)
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
