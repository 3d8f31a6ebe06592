//! Column selection.

use crate::value::{Collection, Document, Map};

/// Build a new document per input holding only the requested fields.
///
/// Fields come out in the order given by `fields`, not the order of the
/// source document. Requested fields a document lacks are left out rather
/// than filled with `null`, so a document with none of them projects to `{}`.
pub fn project<S: AsRef<str>>(collection: &[Document], fields: &[S]) -> Collection {
    collection
        .iter()
        .map(|document| {
            let mut projected = Map::with_capacity(fields.len());
            for field in fields {
                let field = field.as_ref();
                if let Some(value) = document.get(field) {
                    projected.insert(field, value.clone());
                }
            }
            projected
        })
        .collect()
}
