use rust_decimal::Decimal;
use serde_json::Value;
use std::io;
use std::str::FromStr;

use amortization_core::rounding::round_money;

/// Schedule columns in export order: (JSON key, CSV header, money column).
pub const SCHEDULE_COLUMNS: [(&str, &str, bool); 6] = [
    ("month", "Month", false),
    ("dueDate", "Due Date", false),
    ("principalPayment", "Principal", true),
    ("interestPayment", "Interest", true),
    ("totalPayment", "Total Payment", true),
    ("remainingBalance", "Remaining Balance", true),
];

/// Decimal behind a JSON money field (string or number), rounded to cents.
pub fn money_value(value: &Value) -> Option<Decimal> {
    let raw = match value {
        Value::String(s) => Decimal::from_str(s).ok()?,
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok()?,
        _ => return None,
    };
    Some(round_money(raw))
}

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    write_csv(&mut wtr, value);
    let _ = wtr.flush();
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) {
    match value {
        Value::Object(map) => {
            let result = map.get("result").unwrap_or(value);
            if let Some(Value::Array(rows)) = result.get("schedule") {
                write_schedule_csv(wtr, rows);
            } else if let Value::Object(fields) = result {
                // Two-column CSV: field, value
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in fields {
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            }
        }
        Value::Array(arr) => {
            for item in arr {
                let _ = wtr.write_record([&format_csv_value(item)]);
            }
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }
}

fn write_schedule_csv<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) {
    let _ = wtr.write_record(SCHEDULE_COLUMNS.iter().map(|(_, header, _)| *header));
    for row in rows {
        let record: Vec<String> = SCHEDULE_COLUMNS
            .iter()
            .map(|(key, _, money)| match row.get(*key) {
                Some(v) if *money => money_value(v)
                    .map(|d| format!("{d:.2}"))
                    .unwrap_or_else(|| format_csv_value(v)),
                Some(v) => format_csv_value(v),
                None => String::new(),
            })
            .collect();
        let _ = wtr.write_record(&record);
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
