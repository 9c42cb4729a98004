//! Turns encoded changes into exactly one navigation

use crate::context::QueryParamContext;
use crate::encoded::EncodedValue;
use crate::error::QueryParamError;
use crate::location::Location;
use crate::snapshot::Snapshot;
use crate::update_type::UpdateType;
use tracing::debug;

/// Encoded changes for one URL update. `None` removes the parameter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeRequest {
    entries: Vec<(String, Option<EncodedValue>)>,
}

impl ChangeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(name: impl Into<String>, value: Option<EncodedValue>) -> Self {
        let mut changes = Self::new();
        changes.set(name, value);
        changes
    }

    /// Record a change; a later change to the same name wins.
    pub fn set(&mut self, name: impl Into<String>, value: Option<EncodedValue>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: Option<EncodedValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<Option<&EncodedValue>> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&EncodedValue>)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The query an update produces from `current`.
///
/// Merging update types overlay the changes; the others keep only the
/// changes that carry a value.
pub fn target_query(current: &Snapshot, changes: &ChangeRequest, update_type: UpdateType) -> Snapshot {
    if update_type.merges() {
        current.merged(changes.iter())
    } else {
        Snapshot::from_pairs(
            changes
                .iter()
                .filter_map(|(name, value)| value.map(|v| (name, v.clone()))),
        )
    }
}

/// The location an update navigates to. Path and hash are kept.
pub fn target_location(
    ctx: &QueryParamContext,
    current: &Location,
    changes: &ChangeRequest,
    update_type: UpdateType,
) -> Location {
    let snapshot = ctx.snapshot_of(current);
    let query = target_query(&snapshot, changes, update_type);
    current.with_query(&ctx.stringify(&query))
}

/// Apply `changes` to the current URL with a single push or replace.
pub fn dispatch(
    ctx: &QueryParamContext,
    changes: &ChangeRequest,
    update_type: UpdateType,
) -> Result<(), QueryParamError> {
    let navigator = ctx.navigator()?;
    let current = ctx.location()?;
    let target = target_location(ctx, &current, changes, update_type);

    debug!(
        "Updating URL ({}, {} change(s)): {} -> {}",
        update_type,
        changes.len(),
        current,
        target
    );

    if update_type.is_push() {
        navigator.push(&target);
    } else {
        navigator.replace(&target);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{LocationSource, MemoryHistory, NavigationKind};
    use std::rc::Rc;

    fn ev(s: &str) -> Option<EncodedValue> {
        Some(EncodedValue::from(s))
    }

    fn setup(url: &str) -> (Rc<MemoryHistory>, QueryParamContext) {
        let history = Rc::new(MemoryHistory::new(url));
        let ctx = QueryParamContext::from_history(history.clone());
        (history, ctx)
    }

    #[test]
    fn test_change_request_last_write_wins() {
        let changes = ChangeRequest::new()
            .with("a", ev("1"))
            .with("b", ev("2"))
            .with("a", None);
        assert_eq!(changes.len(), 2);
        assert_eq!(changes.get("a"), Some(None));
        assert_eq!(changes.get("zzz"), None);
    }

    #[test]
    fn test_replace_in_merges() {
        let (history, ctx) = setup("/list?a=1&b=2");
        dispatch(&ctx, &ChangeRequest::single("a", ev("5")), UpdateType::ReplaceIn).unwrap();

        assert_eq!(history.location().to_string(), "/list?a=5&b=2");
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_replace_drops_other_params() {
        let (history, ctx) = setup("/list?a=1&b=2");
        dispatch(&ctx, &ChangeRequest::single("a", ev("5")), UpdateType::Replace).unwrap();

        assert_eq!(history.location().to_string(), "/list?a=5");
    }

    #[test]
    fn test_push_variants_add_entries() {
        let (history, ctx) = setup("/list?a=1");
        dispatch(&ctx, &ChangeRequest::single("b", ev("2")), UpdateType::PushIn).unwrap();
        dispatch(&ctx, &ChangeRequest::single("c", ev("3")), UpdateType::Push).unwrap();

        let kinds: Vec<_> = history.navigations().into_iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![NavigationKind::Push, NavigationKind::Push]);
        assert_eq!(history.len(), 3);
        assert_eq!(history.location().to_string(), "/list?c=3");
        assert!(history.back());
        assert_eq!(history.location().to_string(), "/list?a=1&b=2");
    }

    #[test]
    fn test_removal_under_merge() {
        let (history, ctx) = setup("/list?a=1&b=2");
        dispatch(&ctx, &ChangeRequest::single("a", None), UpdateType::ReplaceIn).unwrap();
        assert_eq!(history.location().to_string(), "/list?b=2");
    }

    #[test]
    fn test_removing_last_param_clears_query() {
        let (history, ctx) = setup("/list?a=1#top");
        dispatch(&ctx, &ChangeRequest::single("a", None), UpdateType::ReplaceIn).unwrap();
        assert_eq!(history.location().to_string(), "/list#top");
    }

    #[test]
    fn test_hash_preserved() {
        let (history, ctx) = setup("/list?a=1#results");
        dispatch(&ctx, &ChangeRequest::single("a", ev("2")), UpdateType::PushIn).unwrap();
        assert_eq!(history.location().to_string(), "/list?a=2#results");
    }

    #[test]
    fn test_exactly_one_navigation_per_dispatch() {
        let (history, ctx) = setup("/list");
        let changes = ChangeRequest::new()
            .with("a", ev("1"))
            .with("b", ev("2"))
            .with("c", Some(EncodedValue::Multi(vec!["x".into(), "y".into()])));
        dispatch(&ctx, &changes, UpdateType::ReplaceIn).unwrap();

        assert_eq!(history.navigations().len(), 1);
        assert_eq!(history.location().to_string(), "/list?a=1&b=2&c=x&c=y");
    }

    #[test]
    fn test_missing_navigator_fails_fast() {
        let history = Rc::new(MemoryHistory::new("/list?a=1"));
        let ctx = QueryParamContext::detached().with_location_source(history.clone());
        let result = dispatch(&ctx, &ChangeRequest::single("a", ev("2")), UpdateType::ReplaceIn);

        assert!(matches!(result, Err(QueryParamError::MissingContext("navigator"))));
        assert!(history.navigations().is_empty());
    }

    #[test]
    fn test_target_query_without_merge_skips_removals() {
        let current = Snapshot::from_pairs([("a", "1")]);
        let changes = ChangeRequest::new().with("a", None).with("b", ev("2"));
        let query = target_query(&current, &changes, UpdateType::Push);
        assert_eq!(query, Snapshot::from_pairs([("b", "2")]));
    }
}
