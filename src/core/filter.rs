//! Filters deciding which records survive the filter stage

use crate::core::error::PagingError;
use crate::core::field::{Fields, compare_values};
use regex::{Regex, RegexBuilder};
use serde_json::Value;
use std::cmp::Ordering;

/// A predicate over records
///
/// Any `Fn(&R) -> bool` closure is a filter; whatever it captures is the
/// scope it evaluates against.
pub trait Filter<R>: Send + Sync {
    /// Whether `record` is kept
    fn matches(&self, record: &R) -> bool;
}

impl<R, F> Filter<R> for F
where
    F: Fn(&R) -> bool + Send + Sync,
{
    fn matches(&self, record: &R) -> bool {
        self(record)
    }
}

/// How a [`FieldFilter`] compares the field against its value
#[derive(Debug, Clone)]
pub enum FilterOperator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// Substring match on the field's text
    Like,
    /// Regular expression match on the field's text
    Regex(Regex),
}

/// Filter comparing one named field against a value
///
/// # Example
/// ```rust,ignore
/// let active = FieldFilter::new("status", FilterOperator::Eq, json!("active"));
/// let large = FieldFilter::new("amount", FilterOperator::Gt, json!(100));
/// ```
#[derive(Debug, Clone)]
pub struct FieldFilter {
    pub property: String,
    pub operator: FilterOperator,
    pub value: Value,
    pub case_sensitive: bool,
}

impl FieldFilter {
    /// Create a case-sensitive filter
    pub fn new(property: impl Into<String>, operator: FilterOperator, value: Value) -> Self {
        Self {
            property: property.into(),
            operator,
            value,
            case_sensitive: true,
        }
    }

    /// Create a regular expression filter
    pub fn regex(property: impl Into<String>, pattern: &str) -> Result<Self, PagingError> {
        let property = property.into();
        let regex = Regex::new(pattern).map_err(|source| PagingError::InvalidPattern {
            property: property.clone(),
            source,
        })?;

        Ok(Self::new(
            property,
            FilterOperator::Regex(regex),
            Value::String(pattern.to_string()),
        ))
    }

    /// Ignore case when comparing text
    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        if let FilterOperator::Regex(regex) = &self.operator {
            if let Ok(folded) = RegexBuilder::new(regex.as_str())
                .case_insensitive(true)
                .build()
            {
                self.operator = FilterOperator::Regex(folded);
            }
        }
        self
    }

    /// Parse a filter object into field filters
    ///
    /// # Format
    /// - Exact match: `{"field": "value"}`
    /// - Comparison: `{"field>": 1, "field<": 1, "field>=": 1, "field<=": 1, "field!=": 1}`
    /// - Substring, ignoring case: `{"field~": "text"}`
    /// - Regular expression: `{"field=~": "^A"}`
    pub fn from_json(filter: &Value) -> Result<Vec<FieldFilter>, PagingError> {
        let Some(obj) = filter.as_object() else {
            return Err(PagingError::invalid_filter(
                &filter.to_string(),
                "filter must be a JSON object",
            ));
        };

        obj.iter()
            .map(|(key, value)| Self::from_entry(key, value))
            .collect()
    }

    fn from_entry(key: &str, value: &Value) -> Result<FieldFilter, PagingError> {
        let (property, operator) = split_operator(key);

        if property.is_empty() {
            return Err(PagingError::invalid_filter(key, "missing field name"));
        }

        match operator {
            None => {
                let pattern = value
                    .as_str()
                    .ok_or_else(|| PagingError::invalid_filter(key, "pattern must be a string"))?;
                Self::regex(property, pattern)
            }
            Some(FilterOperator::Like) => {
                if !value.is_string() {
                    return Err(PagingError::invalid_filter(key, "expected a string"));
                }
                Ok(Self::new(property, FilterOperator::Like, value.clone()).case_insensitive())
            }
            Some(
                op @ (FilterOperator::Lt
                | FilterOperator::Le
                | FilterOperator::Gt
                | FilterOperator::Ge),
            ) => {
                if !(value.is_number() || value.is_string()) {
                    return Err(PagingError::invalid_filter(
                        key,
                        "expected a number or a string",
                    ));
                }
                Ok(Self::new(property, op, value.clone()))
            }
            Some(op) => Ok(Self::new(property, op, value.clone())),
        }
    }

    fn test(&self, field: Option<&Value>) -> bool {
        let Some(field) = field else {
            return matches!(self.operator, FilterOperator::Ne);
        };

        match &self.operator {
            FilterOperator::Eq => self.equals(field),
            FilterOperator::Ne => !self.equals(field),
            FilterOperator::Lt => self.ordered(field) == Some(Ordering::Less),
            FilterOperator::Le => matches!(
                self.ordered(field),
                Some(Ordering::Less | Ordering::Equal)
            ),
            FilterOperator::Gt => self.ordered(field) == Some(Ordering::Greater),
            FilterOperator::Ge => matches!(
                self.ordered(field),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            FilterOperator::Like => {
                let (Some(haystack), Some(needle)) = (text(field), self.value.as_str()) else {
                    return false;
                };
                if self.case_sensitive {
                    haystack.contains(needle)
                } else {
                    haystack.to_lowercase().contains(&needle.to_lowercase())
                }
            }
            FilterOperator::Regex(regex) => text(field).is_some_and(|t| regex.is_match(&t)),
        }
    }

    fn equals(&self, field: &Value) -> bool {
        match (field.as_str(), self.value.as_str()) {
            (Some(a), Some(b)) if !self.case_sensitive => a.to_lowercase() == b.to_lowercase(),
            _ => {
                compare_values(field, &self.value) == Ordering::Equal
                    && same_kind(field, &self.value)
            }
        }
    }

    /// Ordering of the field relative to the filter value, `None` across kinds
    fn ordered(&self, field: &Value) -> Option<Ordering> {
        if !same_kind(field, &self.value) {
            return None;
        }
        match (field.as_str(), self.value.as_str()) {
            (Some(a), Some(b)) if !self.case_sensitive => {
                Some(a.to_lowercase().cmp(&b.to_lowercase()))
            }
            _ => Some(compare_values(field, &self.value)),
        }
    }
}

impl<R: Fields> Filter<R> for FieldFilter {
    fn matches(&self, record: &R) -> bool {
        self.test(record.field(&self.property).as_ref())
    }
}

/// Split `amount>=` into the field name and its operator; `None` is a regex
fn split_operator(key: &str) -> (&str, Option<FilterOperator>) {
    // Two-character suffixes first so ">=" is not read as ">".
    let suffixes = [
        (">=", Some(FilterOperator::Ge)),
        ("<=", Some(FilterOperator::Le)),
        ("!=", Some(FilterOperator::Ne)),
        ("=~", None),
        (">", Some(FilterOperator::Gt)),
        ("<", Some(FilterOperator::Lt)),
        ("~", Some(FilterOperator::Like)),
    ];

    for (suffix, operator) in suffixes {
        if let Some(property) = key.strip_suffix(suffix) {
            return (property, operator);
        }
    }

    (key, Some(FilterOperator::Eq))
}

fn same_kind(a: &Value, b: &Value) -> bool {
    std::mem::discriminant(a) == std::mem::discriminant(b)
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order(status: &str, amount: f64) -> Value {
        json!({"status": status, "amount": amount, "customer": {"name": "Acme Corp"}})
    }

    #[test]
    fn test_closure_is_a_filter() {
        let threshold = 5;
        let filter = move |x: &i64| *x > threshold;

        assert!(filter.matches(&6));
        assert!(!filter.matches(&5));
    }

    #[test]
    fn test_equality() {
        let filter = FieldFilter::new("status", FilterOperator::Eq, json!("active"));

        assert!(filter.matches(&order("active", 1.0)));
        assert!(!filter.matches(&order("Active", 1.0)));
        assert!(filter.clone().case_insensitive().matches(&order("Active", 1.0)));
    }

    #[test]
    fn test_numeric_comparisons() {
        let record = order("active", 150.0);

        assert!(FieldFilter::new("amount", FilterOperator::Gt, json!(100)).matches(&record));
        assert!(FieldFilter::new("amount", FilterOperator::Ge, json!(150)).matches(&record));
        assert!(FieldFilter::new("amount", FilterOperator::Le, json!(150)).matches(&record));
        assert!(!FieldFilter::new("amount", FilterOperator::Lt, json!(150)).matches(&record));
    }

    #[test]
    fn test_large_integer_ids_are_distinct() {
        let low = json!({"id": 9_007_199_254_740_992u64});
        let high = json!({"id": 9_007_199_254_740_993u64});
        let filter = FieldFilter::new("id", FilterOperator::Eq, json!(9_007_199_254_740_993u64));

        assert!(!filter.matches(&low));
        assert!(filter.matches(&high));
        assert!(
            FieldFilter::new("id", FilterOperator::Gt, json!(9_007_199_254_740_992u64))
                .matches(&high)
        );
    }

    #[test]
    fn test_comparison_across_kinds_never_matches() {
        let record = json!({"amount": "lots"});

        assert!(!FieldFilter::new("amount", FilterOperator::Gt, json!(100)).matches(&record));
        assert!(!FieldFilter::new("amount", FilterOperator::Lt, json!(100)).matches(&record));
    }

    #[test]
    fn test_missing_field_only_matches_not_equal() {
        let record = json!({"other": 1});

        assert!(!FieldFilter::new("status", FilterOperator::Eq, json!("x")).matches(&record));
        assert!(FieldFilter::new("status", FilterOperator::Ne, json!("x")).matches(&record));
    }

    #[test]
    fn test_like_and_nested_fields() {
        let filter = FieldFilter::new("customer.name", FilterOperator::Like, json!("acme"));

        assert!(!filter.matches(&order("active", 1.0)));
        assert!(filter.case_insensitive().matches(&order("active", 1.0)));
    }

    #[test]
    fn test_regex() {
        let filter = FieldFilter::regex("status", "^act").unwrap();

        assert!(filter.matches(&order("active", 1.0)));
        assert!(!filter.matches(&order("inactive", 1.0)));
        assert!(filter.case_insensitive().matches(&order("ACTIVE", 1.0)));
    }

    #[test]
    fn test_invalid_regex() {
        let err = FieldFilter::regex("status", "(unclosed").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PATTERN");
    }

    #[test]
    fn test_from_json() {
        let filters = FieldFilter::from_json(&json!({
            "status": "active",
            "amount>=": 100,
            "amount<": 200,
            "customer.name~": "ACME",
        }))
        .unwrap();

        assert_eq!(filters.len(), 4);
        assert!(filters.iter().all(|f| f.matches(&order("active", 150.0))));
        assert!(!filters.iter().all(|f| f.matches(&order("active", 250.0))));
    }

    #[test]
    fn test_from_json_suffix_precedence() {
        let filters = FieldFilter::from_json(&json!({"amount>=": 10, "code=~": "^A"})).unwrap();

        let ge = filters.iter().find(|f| f.property == "amount").unwrap();
        assert!(matches!(ge.operator, FilterOperator::Ge));

        let re = filters.iter().find(|f| f.property == "code").unwrap();
        assert!(matches!(re.operator, FilterOperator::Regex(_)));
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(FieldFilter::from_json(&json!(["status"])).is_err());
        assert!(FieldFilter::from_json(&json!({">": 1})).is_err());
        assert!(FieldFilter::from_json(&json!({"amount>": true})).is_err());
        assert!(FieldFilter::from_json(&json!({"name~": 3})).is_err());
    }
}
