//! Comparison semantics shared by the query operators.
//!
//! Equality is defined between any two values: values of different kinds are
//! simply unequal, numbers compare by magnitude (`1 == 1.0`), and objects
//! compare member-wise regardless of member order. Ordering is only defined
//! within a kind (numbers, strings, booleans, arrays element-wise); asking to
//! order anything else is reported to the caller rather than coerced.

use crate::error::QueryError;
use crate::value::Value;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A comparison operator accepted by [`crate::filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    pub const ALL: [CompareOp; 6] = [
        CompareOp::Eq,
        CompareOp::Ne,
        CompareOp::Lt,
        CompareOp::Le,
        CompareOp::Gt,
        CompareOp::Ge,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }

    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ne => ordering != Ordering::Equal,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Le => ordering != Ordering::Greater,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Ge => ordering != Ordering::Less,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompareOp {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CompareOp::ALL
            .into_iter()
            .find(|op| op.as_str() == s.trim())
            .ok_or_else(|| QueryError::UnknownOperator(s.to_string()))
    }
}

/// Evaluate `left <op> right`.
///
/// Returns `None` when `op` is an ordering operator and the two values have
/// no common ordering (e.g. string vs number, or any null/object operand).
pub fn compare(left: &Value, op: CompareOp, right: &Value) -> Option<bool> {
    match op {
        CompareOp::Eq => Some(values_equal(left, right)),
        CompareOp::Ne => Some(!values_equal(left, right)),
        _ => order(left, right).map(|ordering| ordering.is_some_and(|o| op.accepts(o))),
    }
}

/// Query-level equality. See the module docs.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp_numeric(*b) == Some(Ordering::Equal),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| values_equal(x, y)))
        }
        (a, b) => a == b,
    }
}

/// `None`: no ordering between these kinds. `Some(None)`: orderable kinds
/// but unordered values (a NaN float).
fn order(left: &Value, right: &Value) -> Option<Option<Ordering>> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Some(a.partial_cmp_numeric(*b)),
        (Value::String(a), Value::String(b)) => Some(Some(a.cmp(b))),
        (Value::Bool(a), Value::Bool(b)) => Some(Some(a.cmp(b))),
        (Value::Array(a), Value::Array(b)) => {
            for (x, y) in a.iter().zip(b) {
                if !values_equal(x, y) {
                    return order(x, y);
                }
            }
            Some(Some(a.len().cmp(&b.len())))
        }
        _ => None,
    }
}
