//! Coercion functions turning raw argument strings into stored values.
//!
//! A coercion receives the raw value (absent for value-less flags) and the
//! previous value of the attribute, which lets it fold repeated occurrences
//! into an accumulator.

use std::sync::Arc;

use crate::value::Value;

pub type CoerceFn = Arc<
    dyn Fn(Option<&str>, Option<&Value>) -> std::result::Result<Value, String>
        + Send
        + Sync
        + 'static,
>;

fn required(raw: Option<&str>) -> std::result::Result<&str, String> {
    raw.ok_or_else(|| "a value is required".to_string())
}

/// Parse the raw value as a signed integer.
pub fn int(raw: Option<&str>, _prev: Option<&Value>) -> std::result::Result<Value, String> {
    let raw = required(raw)?;
    raw.trim()
        .parse::<i64>()
        .map(Value::Int)
        .map_err(|_| "not an integer".to_string())
}

/// Parse the raw value as a floating point number.
pub fn float(raw: Option<&str>, _prev: Option<&Value>) -> std::result::Result<Value, String> {
    let raw = required(raw)?;
    raw.trim()
        .parse::<f64>()
        .map(Value::Float)
        .map_err(|_| "not a number".to_string())
}

/// Append the raw value to the list held in `prev`.
pub fn collect(raw: Option<&str>, prev: Option<&Value>) -> std::result::Result<Value, String> {
    let raw = required(raw)?;
    let mut items = match prev {
        Some(Value::List(items)) => items.clone(),
        _ => Vec::new(),
    };
    items.push(raw.to_string());
    Ok(Value::List(items))
}

/// Counter: one more than the previous integer (or 1).
pub fn increase(_raw: Option<&str>, prev: Option<&Value>) -> std::result::Result<Value, String> {
    let n = match prev {
        Some(Value::Int(n)) => *n,
        _ => 0,
    };
    n.checked_add(1)
        .map(Value::Int)
        .ok_or_else(|| "counter overflow".to_string())
}

/// Build a coercion splitting one raw value on `sep` into a list.
pub fn split(sep: &str) -> CoerceFn {
    let sep = sep.to_string();
    Arc::new(move |raw: Option<&str>, _prev: Option<&Value>| {
        let raw = required(raw)?;
        Ok(Value::List(
            raw.split(sep.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        ))
    })
}
