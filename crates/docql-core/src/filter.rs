//! Row selection by field comparison.

use crate::compare::{compare, CompareOp};
use crate::error::QueryError;
use crate::value::{Collection, Document, Value};

/// Keep the documents whose `field` satisfies `document[field] <op> value`.
///
/// Documents without `field` are excluded. An ordering comparison between
/// incompatible kinds (e.g. a string field against a numeric bound) fails the
/// whole call with [`QueryError::TypeMismatch`]; equality operators never
/// fail, differing kinds are simply unequal.
///
/// # Examples
///
/// ```
/// use docql_core::{filter, parse, CompareOp, Value};
///
/// let docs = parse(r#"[{"rating": 4.5}, {"rating": 3.0}, {"name": "x"}]"#)
///     .unwrap()
///     .into_collection(None)
///     .unwrap();
/// let kept = filter(&docs, "rating", CompareOp::Ge, &Value::from(4.0)).unwrap();
/// assert_eq!(kept.len(), 1);
/// ```
pub fn filter(
    collection: &[Document],
    field: &str,
    op: CompareOp,
    value: &Value,
) -> Result<Collection, QueryError> {
    let mut results = Vec::new();

    for document in collection {
        let Some(field_value) = document.get(field) else {
            continue;
        };
        match compare(field_value, op, value) {
            Some(true) => results.push(document.clone()),
            Some(false) => {}
            None => {
                return Err(QueryError::TypeMismatch {
                    field: field.to_string(),
                    left: field_value.kind(),
                    right: value.kind(),
                })
            }
        }
    }

    tracing::debug!(
        field,
        %op,
        input = collection.len(),
        output = results.len(),
        "filter"
    );
    Ok(results)
}
