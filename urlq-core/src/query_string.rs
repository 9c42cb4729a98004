//! Parse and stringify whole query strings

use crate::config::QueryParamOptions;
use crate::encoded::EncodedValue;
use crate::snapshot::Snapshot;
use std::borrow::Cow;

/// Converts between a raw query string and a [`Snapshot`].
///
/// `parse(stringify(s))` must give back every name/value pair of `s`, up to
/// array normalisation: a query string cannot tell a one-element array from a
/// single value, and cannot carry an empty array at all. So `Multi([x])` may
/// read back as `Single(x)` and `Multi([])` may vanish.
pub trait QueryStringCodec {
    /// Parse a query string, with or without its leading `?`.
    fn parse(&self, query: &str) -> Snapshot;
    /// Serialize without a leading `?`.
    fn stringify(&self, snapshot: &Snapshot) -> String;
}

/// `application/x-www-form-urlencoded` style query strings.
///
/// Repeated keys become [`EncodedValue::Multi`] and arrays are written back as
/// repeated keys. A key seen once parses as [`EncodedValue::Single`], even if
/// it was written from a one-element array, and empty arrays are not written.
/// Malformed percent escapes are kept verbatim instead of failing the whole
/// parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UrlEncodedQuery {
    sort_keys: bool,
}

impl UrlEncodedQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: &QueryParamOptions) -> Self {
        Self {
            sort_keys: options.sort_keys,
        }
    }

    /// Emit keys alphabetically instead of in snapshot order.
    pub fn sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }
}

fn decode_component(raw: &str) -> String {
    let spaced: Cow<str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced.into_owned(),
    }
}

impl QueryStringCodec for UrlEncodedQuery {
    fn parse(&self, query: &str) -> Snapshot {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|segment| !segment.is_empty())
            .filter_map(|segment| {
                let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
                let key = decode_component(key);
                if key.is_empty() {
                    None
                } else {
                    Some((key, decode_component(value)))
                }
            });
        Snapshot::from_pairs(pairs)
    }

    fn stringify(&self, snapshot: &Snapshot) -> String {
        let mut entries: Vec<(&str, &EncodedValue)> = snapshot.iter().collect();
        if self.sort_keys {
            entries.sort_by(|a, b| a.0.cmp(b.0));
        }

        let mut parts = Vec::new();
        for (name, value) in entries {
            let key = urlencoding::encode(name);
            match value {
                EncodedValue::Single(v) => {
                    parts.push(format!("{}={}", key, urlencoding::encode(v)));
                }
                EncodedValue::Multi(values) => {
                    for v in values {
                        parts.push(format!("{}={}", key, urlencoding::encode(v)));
                    }
                }
            }
        }
        parts.join("&")
    }
}
