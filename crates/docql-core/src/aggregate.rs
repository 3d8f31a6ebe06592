//! Aggregates over a numeric field.
//!
//! Only numeric values take part: documents where the field is missing or
//! holds a non-number (booleans included) are skipped. `count` is the
//! exception and counts every document.
//!
//! Empty input is not an error. `sum` and `avg` yield `0`, while `min` and
//! `max` yield `None` so callers can tell "no data" apart from a real zero.

use crate::error::QueryError;
use crate::group::group_by;
use crate::value::{Collection, Document, Map, Number, Value};
use std::fmt;
use std::str::FromStr;

fn numeric_values<'a>(
    collection: &'a [Document],
    field: &'a str,
) -> impl Iterator<Item = Number> + 'a {
    collection
        .iter()
        .filter_map(move |document| document.get(field).and_then(Value::as_number))
}

/// Number of documents, regardless of content.
pub fn aggregate_count(collection: &[Document]) -> usize {
    collection.len()
}

/// Sum of the numeric values of `field`; integral while every addend is.
pub fn aggregate_sum(collection: &[Document], field: &str) -> Number {
    numeric_values(collection, field).fold(Number::Integer(0), |total, n| total + n)
}

/// Mean of the numeric values of `field`, or integer `0` when there are none.
pub fn aggregate_avg(collection: &[Document], field: &str) -> Number {
    let (total, count) = numeric_values(collection, field)
        .fold((Number::Integer(0), 0usize), |(total, count), n| {
            (total + n, count + 1)
        });
    if count == 0 {
        Number::Integer(0)
    } else {
        Number::Float(total.as_f64() / count as f64)
    }
}

/// Largest numeric value of `field`. Ties keep the first occurrence.
pub fn aggregate_max(collection: &[Document], field: &str) -> Option<Number> {
    extreme(collection, field, std::cmp::Ordering::Greater)
}

/// Smallest numeric value of `field`. Ties keep the first occurrence.
pub fn aggregate_min(collection: &[Document], field: &str) -> Option<Number> {
    extreme(collection, field, std::cmp::Ordering::Less)
}

fn extreme(collection: &[Document], field: &str, wanted: std::cmp::Ordering) -> Option<Number> {
    numeric_values(collection, field).fold(None, |best, n| match best {
        Some(current) if n.partial_cmp_numeric(current) != Some(wanted) => Some(current),
        _ => Some(n),
    })
}

/// An aggregate function selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregate {
    Sum,
    Avg,
    Count,
    Min,
    Max,
}

impl Aggregate {
    pub const ALL: [Aggregate; 5] = [
        Aggregate::Sum,
        Aggregate::Avg,
        Aggregate::Count,
        Aggregate::Min,
        Aggregate::Max,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Aggregate::Sum => "sum",
            Aggregate::Avg => "avg",
            Aggregate::Count => "count",
            Aggregate::Min => "min",
            Aggregate::Max => "max",
        }
    }

    /// Run this aggregate. A "no value" min/max comes back as `null`.
    pub fn apply(self, collection: &[Document], field: &str) -> Value {
        match self {
            Aggregate::Sum => aggregate_sum(collection, field).into(),
            Aggregate::Avg => aggregate_avg(collection, field).into(),
            Aggregate::Count => Value::from(aggregate_count(collection)),
            Aggregate::Min => aggregate_min(collection, field).into(),
            Aggregate::Max => aggregate_max(collection, field).into(),
        }
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aggregate {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Aggregate::ALL
            .into_iter()
            .find(|agg| agg.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| QueryError::UnknownAggregate(s.to_string()))
    }
}

/// Group by `group_field`, then summarise each group with `aggregate` over
/// `agg_field`.
///
/// Produces one document per group, in group order:
/// `{ <group_field>: <key>, "<aggregate>_<agg_field>": <result> }`.
/// The missing-field group's key is `null`.
///
/// ```
/// use docql_core::{group_aggregate, parse, Aggregate};
///
/// let docs = parse(r#"[{"price": "$", "rating": 4.0}, {"price": "$", "rating": 3.0}]"#)
///     .unwrap()
///     .into_collection(None)
///     .unwrap();
/// let rows = group_aggregate(&docs, "price", Aggregate::Avg, "rating");
/// assert_eq!(rows[0].get("avg_rating").unwrap().to_string(), "3.5");
/// ```
pub fn group_aggregate(
    collection: &[Document],
    group_field: &str,
    aggregate: Aggregate,
    agg_field: &str,
) -> Collection {
    group_summary(collection, group_field, &[aggregate], agg_field)
}

/// Like [`group_aggregate`], with one `"<aggregate>_<agg_field>"` column per
/// entry of `aggregates`, in the order given.
///
/// ```
/// use docql_core::{group_summary, parse, Aggregate};
///
/// let docs = parse(r#"[{"price": "$", "rating": 4.0}, {"price": "$", "rating": 3.0}]"#)
///     .unwrap()
///     .into_collection(None)
///     .unwrap();
/// let rows = group_summary(&docs, "price", &[Aggregate::Count, Aggregate::Max], "rating");
/// assert_eq!(rows[0].keys().collect::<Vec<_>>(), ["price", "count_rating", "max_rating"]);
/// ```
pub fn group_summary(
    collection: &[Document],
    group_field: &str,
    aggregates: &[Aggregate],
    agg_field: &str,
) -> Collection {
    let columns: Vec<(String, Aggregate)> = aggregates
        .iter()
        .map(|&aggregate| (format!("{aggregate}_{agg_field}"), aggregate))
        .collect();
    group_by(collection, group_field)
        .into_iter()
        .map(|group| {
            let mut row = Map::with_capacity(columns.len() + 1);
            row.insert(group_field, group.key.into_value());
            for (column, aggregate) in &columns {
                row.insert(column.as_str(), aggregate.apply(&group.documents, agg_field));
            }
            row
        })
        .collect()
}
