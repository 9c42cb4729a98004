use crate::update_type::UpdateType;
use serde::{Deserialize, Serialize};

/// Binding behaviour shared by every accessor under one context.
///
/// Deserializable so hosts can keep it next to their own settings; missing
/// fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryParamOptions {
    /// Used by setters called without an explicit update type.
    pub default_update_type: UpdateType,
    /// Emit query keys alphabetically instead of preserving URL order.
    pub sort_keys: bool,
}

impl QueryParamOptions {
    pub fn with_default_update_type(mut self, update_type: UpdateType) -> Self {
        self.default_update_type = update_type;
        self
    }

    pub fn with_sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }
}
