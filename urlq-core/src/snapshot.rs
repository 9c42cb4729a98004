//! Immutable view of a location's query parameters

use crate::encoded::EncodedValue;
use crate::location::Location;
use crate::query_string::QueryStringCodec;
use std::rc::Rc;

/// Name → raw value mapping for one location, in query-string order.
///
/// Cloning shares the underlying entries. There is no way to mutate a
/// snapshot; merges produce a new one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    entries: Rc<[(String, EncodedValue)]>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            entries: Rc::from(Vec::new()),
        }
    }
}

impl Snapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from pairs. Repeated names collapse into one
    /// `Multi` entry at the position of the first occurrence.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<EncodedValue>,
    {
        let mut entries: Vec<(String, EncodedValue)> = Vec::new();
        for (name, value) in pairs {
            let name = name.into();
            let value = value.into();
            match entries.iter_mut().find(|(n, _)| *n == name) {
                Some((_, existing)) => {
                    for v in value.to_vec() {
                        existing.push(v);
                    }
                }
                None => entries.push((name, value)),
            }
        }
        Self {
            entries: entries.into(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&EncodedValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EncodedValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A new snapshot with `changes` laid over this one.
    ///
    /// `None` removes the name. Existing names keep their position, new names
    /// are appended in change order.
    pub fn merged<'a>(
        &self,
        changes: impl IntoIterator<Item = (&'a str, Option<&'a EncodedValue>)>,
    ) -> Snapshot {
        let mut entries: Vec<(String, EncodedValue)> = self.entries.to_vec();
        for (name, value) in changes {
            let pos = entries.iter().position(|(n, _)| n == name);
            match (pos, value) {
                (Some(i), Some(v)) => entries[i].1 = v.clone(),
                (Some(i), None) => {
                    entries.remove(i);
                }
                (None, Some(v)) => entries.push((name.to_string(), v.clone())),
                (None, None) => {}
            }
        }
        Snapshot {
            entries: entries.into(),
        }
    }
}

/// Read the query parameters of `location`.
///
/// Locations produced outside a browser may carry the query inside
/// `pathname` with an empty `search`; that query is used instead.
pub fn read_snapshot(location: &Location, codec: &dyn QueryStringCodec) -> Snapshot {
    if !location.search.is_empty() {
        return codec.parse(&location.search);
    }
    match location.pathname.split_once('?') {
        Some((_, query)) => {
            let query = query.split_once('#').map_or(query, |(q, _)| q);
            codec.parse(query)
        }
        None => Snapshot::empty(),
    }
}
