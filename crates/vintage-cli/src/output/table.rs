use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Format output as tables using the tabled crate.
///
/// Analysis payloads carry up to three parts: a "summary" object, a
/// "series" array (the quarterly performance curve), and presentation
/// extras (cohort list, turning point, export paths). Flat objects and
/// bare arrays print as a single table.
pub fn print_table(value: &Value) {
    let Value::Object(map) = value else {
        if let Value::Array(arr) = value {
            print_array_table(arr);
        } else {
            println!("{}", value);
        }
        return;
    };

    if !map.contains_key("summary") && !map.contains_key("series") {
        print_flat_object(value);
        return;
    }

    if let Some(summary) = map.get("summary") {
        println!("Summary statistics:");
        print_flat_object(summary);
        println!();
    }

    if let Some(Value::Array(months)) = map.get("quarter_months") {
        let joined: Vec<String> = months.iter().map(format_value).collect();
        println!("Quarterly performance for cohorts: {}", joined.join(", "));
    }

    if let Some(Value::Array(series)) = map.get("series") {
        print_array_table(series);
    }

    if let Some(tp) = map.get("turning_point_month") {
        println!("Turning point at vintage month {}", format_value(tp));
    }

    if let Some(Value::Array(exports)) = map.get("exports") {
        println!("\nExported:");
        for path in exports {
            println!("  {}", format_value(path));
        }
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
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

    // Headers come from the first object's keys.
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(&row);
            }
        }
        let table = Table::from(builder);
        println!("{}", table);
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}
