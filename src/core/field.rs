//! Named field access and value ordering used by field filters and sorters

use serde_json::{Number, Value};
use std::cmp::Ordering;

/// Records that expose their fields by name
///
/// The query pipeline never calls this; only [`FieldFilter`] and
/// [`FieldSorter`] do. Implement it for typed records to use them.
///
/// [`FieldFilter`]: crate::core::filter::FieldFilter
/// [`FieldSorter`]: crate::core::sorter::FieldSorter
pub trait Fields {
    /// Get the value of a field, `None` when the record has no such field
    fn field(&self, name: &str) -> Option<Value>;
}

impl Fields for Value {
    /// Dotted names walk into nested objects: `customer.name`
    fn field(&self, name: &str) -> Option<Value> {
        name.split('.')
            .try_fold(self, |value, part| value.get(part))
            .cloned()
    }
}

/// Total order over JSON values
///
/// null < bool < number < string < array < object. Integers compare exactly,
/// numbers involving a float compare as `f64`; arrays and objects of the same
/// kind compare equal.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn compare_numbers(a: &Number, b: &Number) -> Ordering {
    match (integer(a), integer(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => {
            let a = a.as_f64().unwrap_or(f64::NAN);
            let b = b.as_f64().unwrap_or(f64::NAN);
            a.total_cmp(&b)
        }
    }
}

/// Any JSON integer, `i64` or `u64`, widened without loss
fn integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

/// Order of missing fields relative to present ones: missing sorts first
pub(crate) fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => compare_values(a, b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
