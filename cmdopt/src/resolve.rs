//! Value policy applied to each matched option: coercion, negation and
//! the defaulting of bare flags.

use crate::descriptor::Arity;
use crate::registry::OptionEntry;
use crate::value::Value;
use crate::{Error, Result};

/// Compute what to store for one occurrence of `entry`.
///
/// `Ok(None)` leaves the current value untouched.
pub(crate) fn resolve(
    entry: &OptionEntry,
    raw: Option<&str>,
    current: Option<&Value>,
) -> Result<Option<Value>> {
    let desc = &entry.descriptor;
    if desc.is_negation() {
        return Ok(Some(Value::Bool(false)));
    }

    let prev = current.or(entry.default_value.as_ref());
    let computed = match (&entry.coerce, raw) {
        (Some(f), Some(r)) => Some(f(Some(r), prev).map_err(|reason| Error::InvalidArgument {
            flags: desc.flags().to_string(),
            value: r.to_string(),
            reason,
        })?),
        // bare flags still run their coercion, so counters work
        (Some(f), None) if desc.arity() == Arity::None => {
            Some(f(None, prev).map_err(|reason| Error::InvalidArgument {
                flags: desc.flags().to_string(),
                value: String::new(),
                reason,
            })?)
        }
        (None, Some(r)) => Some(Value::Str(r.to_string())),
        _ => None,
    };

    match current {
        None | Some(Value::Bool(_)) => Ok(Some(computed.unwrap_or_else(|| bare_value(entry)))),
        Some(_) => Ok(computed),
    }
}

/// Value of a positive flag given without a value.
fn bare_value(entry: &OptionEntry) -> Value {
    match &entry.default_value {
        Some(v) if !v.is_bool() && v.truthy() => v.clone(),
        _ => Value::Bool(true),
    }
}
