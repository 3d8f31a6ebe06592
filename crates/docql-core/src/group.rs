//! Stable partitioning of a collection by field value.

use crate::value::{Collection, Document, Value};
use std::collections::HashMap;

/// The key a document is grouped under.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupKey {
    /// The field is missing or `null`. Distinct from every real value.
    Missing,
    Value(Value),
}

impl GroupKey {
    fn of(document: &Document, field: &str) -> GroupKey {
        match document.get(field) {
            None | Some(Value::Null) => GroupKey::Missing,
            Some(value) => GroupKey::Value(value.clone()),
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            GroupKey::Missing => None,
            GroupKey::Value(value) => Some(value),
        }
    }

    /// The key as a plain value, `null` for [`GroupKey::Missing`].
    pub fn into_value(self) -> Value {
        match self {
            GroupKey::Missing => Value::Null,
            GroupKey::Value(value) => value,
        }
    }

    /// Hashable form under query equality: two keys share a fingerprint
    /// exactly when [`crate::values_equal`] holds, so `1` and `1.0` share a
    /// group. `None` for keys holding NaN, which equal nothing.
    fn fingerprint(&self) -> Option<String> {
        let mut out = String::new();
        match self {
            GroupKey::Missing => out.push('~'),
            GroupKey::Value(value) => write_fingerprint(value, &mut out)?,
        }
        Some(out)
    }
}

fn write_fingerprint(value: &Value, out: &mut String) -> Option<()> {
    match value {
        Value::Null => out.push('n'),
        Value::Bool(b) => out.push(if *b { 't' } else { 'f' }),
        Value::Number(n) => match n.as_exact_integer() {
            Some(i) => out.push_str(&format!("i{i};")),
            None if n.as_f64().is_nan() => return None,
            None => out.push_str(&format!("f{};", n.as_f64().to_bits())),
        },
        Value::String(s) => write_length_prefixed(s, out),
        Value::Array(items) => {
            out.push('[');
            for item in items {
                write_fingerprint(item, out)?;
            }
            out.push(']');
        }
        Value::Object(map) => {
            // Member order does not affect equality.
            let mut members: Vec<(&str, &Value)> = map.iter().collect();
            members.sort_unstable_by_key(|(key, _)| *key);
            out.push('{');
            for (key, member) in members {
                write_length_prefixed(key, out);
                write_fingerprint(member, out)?;
            }
            out.push('}');
        }
    }
    Some(())
}

fn write_length_prefixed(s: &str, out: &mut String) {
    out.push_str(&format!("s{}:", s.len()));
    out.push_str(s);
}

impl From<Value> for GroupKey {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => GroupKey::Missing,
            other => GroupKey::Value(other),
        }
    }
}

/// One partition: its key and its documents in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub key: GroupKey,
    pub documents: Collection,
}

/// The result of [`group_by`]: groups in order of first appearance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Groups {
    groups: Vec<Group>,
    /// Key fingerprint to position in `groups`.
    index: HashMap<String, usize>,
}

impl Groups {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Documents grouped under `key`, if any.
    pub fn get(&self, key: &GroupKey) -> Option<&Collection> {
        let slot = *self.index.get(&key.fingerprint()?)?;
        self.groups.get(slot).map(|group| &group.documents)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.groups.iter().map(|group| &group.key)
    }

    fn push(&mut self, key: GroupKey, document: Document) {
        let fingerprint = key.fingerprint();
        if let Some(&slot) = fingerprint.as_ref().and_then(|fp| self.index.get(fp)) {
            if let Some(group) = self.groups.get_mut(slot) {
                group.documents.push(document);
                return;
            }
        }
        if let Some(fp) = fingerprint {
            self.index.insert(fp, self.groups.len());
        }
        self.groups.push(Group {
            key,
            documents: vec![document],
        });
    }
}

impl IntoIterator for Groups {
    type Item = Group;
    type IntoIter = std::vec::IntoIter<Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl<'a> IntoIterator for &'a Groups {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Partition `collection` by the value of `field`.
///
/// Every document lands in exactly one group. Documents missing `field` (or
/// holding `null`) share the [`GroupKey::Missing`] group. Within a group,
/// documents keep their input order.
pub fn group_by(collection: &[Document], field: &str) -> Groups {
    let mut groups = Groups::default();
    for document in collection {
        groups.push(GroupKey::of(document, field), document.clone());
    }

    tracing::debug!(field, input = collection.len(), groups = groups.len(), "group_by");
    groups
}
