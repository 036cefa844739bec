//! Cell values and the comparison rules shared by search and sort.

use std::cmp::Ordering;
use std::fmt;

/// A single cell value as seen by the table engine.
///
/// Rows expose their fields as `Value`s so the engine can search and sort
/// any record type without knowing its shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Number(f64),
    Text(String),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// String form used for searching; `None` for null, which never matches.
    pub fn search_text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Number(n) => Some(n.to_string()),
            Value::Text(s) => Some(s.clone()),
        }
    }

    /// Case-insensitive containment. `needle_lower` must already be lowercase.
    pub fn contains_lowercase(&self, needle_lower: &str) -> bool {
        match self.search_text() {
            Some(text) => text.to_lowercase().contains(needle_lower),
            None => false,
        }
    }

    // Mixed-type columns fall back to this; callers should keep one type
    // per column.
    fn type_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Number(_) => 1,
            Value::Text(_) => 2,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Ascending order between two cell values.
///
/// - numbers compare numerically (NaN sorts after every other number),
/// - text uses [`compare_text`],
/// - anything else falls back to a fixed type rank: null < number < text.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.partial_cmp(y).unwrap_or_else(|| x.total_cmp(y)),
        (Value::Text(x), Value::Text(y)) => compare_text(x, y),
        _ => a.type_rank().cmp(&b.type_rank()),
    }
}

/// Locale-style text ordering.
///
/// Primary key is the case-folded text, so "apple" sorts next to "Apple"
/// instead of after "Zebra". Ties on the folded text put lowercase before
/// uppercase at the first differing position, then fall back to plain
/// code-point order so the result is total.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded
        .then_with(|| a.chars().map(case_key).cmp(b.chars().map(case_key)))
        .then_with(|| a.cmp(b))
}

fn case_key(c: char) -> bool {
    c.is_uppercase()
}
