use serde_json::Value;
use tabled::{builder::Builder, Table};

use amortization_core::format::format_currency;

use super::csv_out::{money_value, SCHEDULE_COLUMNS};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_fields(value);
            }
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    print_fields(result);

    if let Some(Value::Array(rows)) = result.get("schedule") {
        println!("\n{}", schedule_table(rows));
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

/// Field / value table of every non-array field; nested objects (the
/// analysis summary, the early-payoff block) are flattened with a dotted key.
fn print_fields(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            match val {
                Value::Array(_) => {}
                Value::Object(inner) => {
                    for (k, v) in inner {
                        builder.push_record([format!("{key}.{k}"), format_value(v)]);
                    }
                }
                _ => builder.push_record([key.clone(), format_value(val)]),
            }
        }
        println!("{}", Table::from(builder));
    }
}

fn schedule_table(rows: &[Value]) -> Table {
    let mut builder = Builder::default();
    builder.push_record(SCHEDULE_COLUMNS.iter().map(|(_, header, _)| header.to_string()));
    for row in rows {
        builder.push_record(SCHEDULE_COLUMNS.iter().map(|(key, _, money)| {
            match row.get(*key) {
                Some(v) if *money => money_value(v)
                    .map(format_currency)
                    .unwrap_or_else(|| format_value(v)),
                Some(v) => format_value(v),
                None => String::new(),
            }
        }));
    }
    Table::from(builder)
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schedule_table_headers() {
        let rows = vec![json!({
            "month": 1,
            "dueDate": "2024-02-15",
            "principalPayment": "735.2349",
            "interestPayment": "208.33333333333333333333333335",
            "totalPayment": "943.5616822",
            "remainingBalance": "49264.7651"
        })];
        let rendered = schedule_table(&rows).to_string();
        assert!(rendered.contains("Remaining Balance"));
        assert!(rendered.contains("2024-02-15"));
        assert!(rendered.contains("$49,264.77"));
        assert!(rendered.contains("$208.33"));
        assert!(!rendered.contains("208.3333"));
    }
}
