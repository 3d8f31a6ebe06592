//! Nested-loop equi-join.

use crate::compare::values_equal;
use crate::value::{Collection, Document};

/// Suffix appended to right-hand field names that collide with a field
/// already in the merged document.
pub const COLLISION_SUFFIX: &str = "_2";

/// Join `left` and `right` on `left[left_key] == right[right_key]`.
///
/// Every left document is compared against every right document, so the cost
/// is `|left| * |right|`. Documents missing their key never match. Each match
/// yields one merged document: the left document as-is, then the right
/// document's fields except `right_key`, with any name already present in the
/// merged document renamed by appending [`COLLISION_SUFFIX`]. Output order is
/// left-major, and duplicate matches produce duplicate rows.
///
/// ```
/// use docql_core::{join, parse};
///
/// let left = parse(r#"[{"id": 1, "name": "A"}]"#).unwrap().into_collection(None).unwrap();
/// let right = parse(r#"[{"id": 1, "name": "B"}]"#).unwrap().into_collection(None).unwrap();
/// let joined = join(&left, "id", &right, "id");
/// assert_eq!(joined[0].keys().collect::<Vec<_>>(), ["id", "name", "name_2"]);
/// ```
pub fn join(left: &[Document], left_key: &str, right: &[Document], right_key: &str) -> Collection {
    let mut results = Vec::new();

    for left_doc in left {
        let Some(left_value) = left_doc.get(left_key) else {
            continue;
        };
        for right_doc in right {
            let Some(right_value) = right_doc.get(right_key) else {
                continue;
            };
            if values_equal(left_value, right_value) {
                results.push(merge(left_doc, right_doc, right_key));
            }
        }
    }

    tracing::debug!(
        left = left.len(),
        right = right.len(),
        output = results.len(),
        "join"
    );
    results
}

fn merge(left: &Document, right: &Document, right_key: &str) -> Document {
    let mut merged = left.clone();
    for (key, value) in right.iter() {
        if key == right_key {
            continue;
        }
        if merged.contains_key(key) {
            merged.insert(format!("{key}{COLLISION_SUFFIX}"), value.clone());
        } else {
            merged.insert(key, value.clone());
        }
    }
    merged
}
