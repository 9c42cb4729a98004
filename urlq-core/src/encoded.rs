//! Raw query-string values as they appear in a URL

/// One parameter's raw value: a single string, or several when the key repeats.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EncodedValue {
    Single(String),
    Multi(Vec<String>),
}

impl EncodedValue {
    /// The first string of the value, if any.
    ///
    /// Scalar codecs read this so that `?a=1&a=2` decodes like `?a=1`.
    pub fn first(&self) -> Option<&str> {
        match self {
            EncodedValue::Single(s) => Some(s),
            EncodedValue::Multi(values) => values.first().map(String::as_str),
        }
    }

    /// All strings of the value; a single value is a one-element list.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            EncodedValue::Single(s) => vec![s.clone()],
            EncodedValue::Multi(values) => values.clone(),
        }
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, EncodedValue::Multi(_))
    }

    /// Append a repeated occurrence of the same key.
    pub(crate) fn push(&mut self, value: String) {
        match self {
            EncodedValue::Single(first) => {
                let first = std::mem::take(first);
                *self = EncodedValue::Multi(vec![first, value]);
            }
            EncodedValue::Multi(values) => values.push(value),
        }
    }
}

impl From<String> for EncodedValue {
    fn from(s: String) -> Self {
        EncodedValue::Single(s)
    }
}

impl From<&str> for EncodedValue {
    fn from(s: &str) -> Self {
        EncodedValue::Single(s.to_string())
    }
}

impl From<Vec<String>> for EncodedValue {
    fn from(values: Vec<String>) -> Self {
        EncodedValue::Multi(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first() {
        assert_eq!(EncodedValue::from("a").first(), Some("a"));
        let multi = EncodedValue::from(vec!["x".to_string(), "y".to_string()]);
        assert_eq!(multi.first(), Some("x"));
        assert_eq!(EncodedValue::Multi(Vec::new()).first(), None);
    }

    #[test]
    fn test_push_promotes_single_to_multi() {
        let mut value = EncodedValue::from("x");
        value.push("y".to_string());
        value.push("z".to_string());
        assert_eq!(
            value,
            EncodedValue::Multi(vec!["x".into(), "y".into(), "z".into()])
        );
    }

    #[test]
    fn test_multi_equality_is_by_content() {
        let a = EncodedValue::Multi(vec!["x".into(), "y".into()]);
        let b = EncodedValue::Multi(vec!["x".into(), "y".into()]);
        let reordered = EncodedValue::Multi(vec!["y".into(), "x".into()]);
        assert_eq!(a, b);
        assert_ne!(a, reordered);
    }
}
