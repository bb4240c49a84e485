//! Sort keys and row ordering.

use crate::WindowError;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    #[default]
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}

impl FromStr for Direction {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(WindowError::InvalidSort(s.to_string())),
        }
    }
}

/// The active sort: one column and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sort {
    pub column_id: String,
    #[serde(rename = "sortDirection")]
    pub direction: Direction,
}

impl Sort {
    pub fn new(column_id: impl Into<String>, direction: Direction) -> Self {
        Self {
            column_id: column_id.into(),
            direction,
        }
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::new("@timestamp", Direction::Desc)
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.column_id, self.direction)
    }
}

/// Parses `column:asc|desc`. A bare column sorts descending; a suffix after
/// the last `:` that is not a direction is part of the column name.
impl FromStr for Sort {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (column, direction) = s
            .rsplit_once(':')
            .and_then(|(column, suffix)| Some((column, suffix.parse::<Direction>().ok()?)))
            .unwrap_or((s, Direction::Desc));
        if column.is_empty() {
            return Err(WindowError::InvalidSort(s.to_string()));
        }
        Ok(Self::new(column, direction))
    }
}

/// One event returned by the query execution collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRow {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl EventRow {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Value of a column. Exact keys win; otherwise a dotted column is
    /// looked up through nested objects (`host.name` → `{"host":{"name":..}}`).
    /// `null` counts as missing.
    #[must_use]
    pub fn value(&self, column: &str) -> Option<&Value> {
        let found = match self.fields.get(column) {
            Some(value) => Some(value),
            None => {
                let mut parts = column.split('.');
                let first = parts.next()?;
                parts.try_fold(self.fields.get(first)?, |value, part| value.get(part))
            }
        };
        found.filter(|value| !value.is_null())
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn compare_present(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn as_integer(number: &Number) -> Option<i128> {
    number
        .as_i64()
        .map(i128::from)
        .or_else(|| number.as_u64().map(i128::from))
}

/// Integers compare exactly; floats only when either side is one.
fn compare_numbers(a: &Number, b: &Number) -> Ordering {
    match (as_integer(a), as_integer(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => {
            let (a, b) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
    }
}

/// Ordering of two rows under `sort`. Missing values go last in both
/// directions.
fn compare_rows(a: &EventRow, b: &EventRow, sort: &Sort) -> Ordering {
    if sort.column_id == "_id" {
        return directed(a.id.cmp(&b.id), sort.direction);
    }
    match (a.value(&sort.column_id), b.value(&sort.column_id)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => directed(compare_present(a, b), sort.direction),
    }
}

fn directed(ordering: Ordering, direction: Direction) -> Ordering {
    match direction {
        Direction::Asc => ordering,
        Direction::Desc => ordering.reverse(),
    }
}

/// Stable sort of `rows` by `sort`; ties keep their original order.
pub fn sort_rows<'a>(rows: &'a [EventRow], sort: &Sort) -> Vec<&'a EventRow> {
    let mut sorted: Vec<&EventRow> = rows.iter().collect();
    sorted.sort_by(|a, b| compare_rows(a, b, sort));
    sorted
}
