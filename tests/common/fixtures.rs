use serde_json::{Value, json};

/// Head row used by most tests.
pub fn head() -> Value {
    json!([{"id": "ID", "name": "Name", "age": "Age"}])
}

/// `count` keyed body rows.
pub fn body(count: usize) -> Value {
    Value::Array(
        (1..=count)
            .map(|i| json!({"id": i, "name": format!("Person {}", i), "age": 20 + i % 50}))
            .collect(),
    )
}

/// A call options object with the standard head and `rows` body rows.
pub fn people(rows: usize) -> Value {
    json!({"head": head(), "body": body(rows)})
}

/// Merges the keys of `extra` into `options`.
pub fn with(mut options: Value, extra: Value) -> Value {
    if let (Some(target), Value::Object(extra)) = (options.as_object_mut(), extra) {
        target.extend(extra);
    }
    options
}
