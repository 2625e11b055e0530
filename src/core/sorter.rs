//! Sorters establishing the relative order of records

use crate::core::error::PagingError;
use crate::core::field::{Fields, compare_fields};
use std::cmp::Ordering;

/// A comparison over records
///
/// Any `Fn(&R, &R) -> Ordering` closure is a sorter.
pub trait Sorter<R>: Send + Sync {
    /// Compare two records
    fn compare(&self, a: &R, b: &R) -> Ordering;
}

impl<R, F> Sorter<R> for F
where
    F: Fn(&R, &R) -> Ordering + Send + Sync,
{
    fn compare(&self, a: &R, b: &R) -> Ordering {
        self(a, b)
    }
}

/// Combine sorters lexicographically: the first non-equal result wins
pub fn compare_all<R>(sorters: &[Box<dyn Sorter<R>>], a: &R, b: &R) -> Ordering {
    sorters
        .iter()
        .map(|sorter| sorter.compare(a, b))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// Sorter ordering records by one named field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSorter {
    pub property: String,
    pub direction: Direction,
}

impl FieldSorter {
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
        }
    }

    /// Parse a sort expression
    ///
    /// # Format
    /// - `field:asc` or `field` (ascending)
    /// - `field:desc` (descending)
    pub fn parse(expression: &str) -> Result<Self, PagingError> {
        let expression = expression.trim();
        let (property, direction) = match expression.split_once(':') {
            Some((property, direction)) => (property.trim(), direction.trim()),
            None => (expression, "asc"),
        };

        if property.is_empty() {
            return Err(PagingError::invalid_sort(expression, "missing field name"));
        }

        let direction = match direction.to_ascii_lowercase().as_str() {
            "asc" => Direction::Asc,
            "desc" => Direction::Desc,
            other => {
                return Err(PagingError::invalid_sort(
                    expression,
                    format!("unknown direction '{}'", other),
                ));
            }
        };

        Ok(Self {
            property: property.to_string(),
            direction,
        })
    }

    /// Parse a comma separated list: `status:asc,amount:desc`
    pub fn parse_list(expressions: &str) -> Result<Vec<Self>, PagingError> {
        expressions
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(Self::parse)
            .collect()
    }
}

impl<R: Fields> Sorter<R> for FieldSorter {
    fn compare(&self, a: &R, b: &R) -> Ordering {
        let ordering = compare_fields(
            a.field(&self.property).as_ref(),
            b.field(&self.property).as_ref(),
        );
        match self.direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}
