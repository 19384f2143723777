use serde_json::Value;

/// Print just the key answer value from the output.
///
/// For a performance series that is the final cumulative value; for
/// summary-shaped payloads, the best-known headline field.
pub fn print_minimal(value: &Value) {
    if let Some(Value::Array(series)) = value.as_object().and_then(|m| m.get("series")) {
        if let Some(last) = series
            .last()
            .and_then(|row| row.get("cumulative_overdue_days"))
        {
            println!("{}", format_minimal(last));
            return;
        }
    }

    // Priority list of headline summary fields
    let priority_keys = [
        "total_ever_bad_days",
        "total_overdue_days",
        "total_accounts",
        "accounts_with_overdue",
    ];

    let obj = value
        .as_object()
        .and_then(|m| m.get("summary"))
        .unwrap_or(value);

    if let Value::Object(map) = obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        // Fall back to first field
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
