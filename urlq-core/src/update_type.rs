use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How a URL update is applied.
///
/// `Push*` adds a history entry, `Replace*` overwrites the current one. The
/// `*In` variants merge the changes into the current query; plain `Push` and
/// `Replace` make the changed params the whole query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpdateType {
    Push,
    Replace,
    PushIn,
    #[default]
    ReplaceIn,
}

impl UpdateType {
    pub fn is_push(self) -> bool {
        matches!(self, UpdateType::Push | UpdateType::PushIn)
    }

    /// Whether the changes are merged into the current query.
    pub fn merges(self) -> bool {
        matches!(self, UpdateType::PushIn | UpdateType::ReplaceIn)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UpdateType::Push => "push",
            UpdateType::Replace => "replace",
            UpdateType::PushIn => "pushIn",
            UpdateType::ReplaceIn => "replaceIn",
        }
    }
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown update type: {0}")]
pub struct ParseUpdateTypeError(String);

impl FromStr for UpdateType {
    type Err = ParseUpdateTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "push" => Ok(UpdateType::Push),
            "replace" => Ok(UpdateType::Replace),
            "pushIn" => Ok(UpdateType::PushIn),
            "replaceIn" => Ok(UpdateType::ReplaceIn),
            other => Err(ParseUpdateTypeError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_replace_in() {
        assert_eq!(UpdateType::default(), UpdateType::ReplaceIn);
    }

    #[test]
    fn test_flags() {
        assert!(UpdateType::Push.is_push());
        assert!(UpdateType::PushIn.is_push());
        assert!(!UpdateType::Replace.is_push());
        assert!(UpdateType::ReplaceIn.merges());
        assert!(!UpdateType::Push.merges());
    }

    #[test]
    fn test_string_forms_agree() {
        for update_type in [
            UpdateType::Push,
            UpdateType::Replace,
            UpdateType::PushIn,
            UpdateType::ReplaceIn,
        ] {
            let json = serde_json::to_string(&update_type).unwrap();
            assert_eq!(json, format!("\"{}\"", update_type));
            assert_eq!(update_type.as_str().parse::<UpdateType>(), Ok(update_type));
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert!("pushInto".parse::<UpdateType>().is_err());
    }
}
