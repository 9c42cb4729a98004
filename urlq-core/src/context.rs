//! Collaborators shared by every binding in one UI subtree

use crate::config::QueryParamOptions;
use crate::error::QueryParamError;
use crate::location::{Location, LocationSource, Navigator};
use crate::query_string::{QueryStringCodec, UrlEncodedQuery};
use crate::snapshot::{read_snapshot, Snapshot};
use std::rc::Rc;

/// Everything a binding needs to read and write the URL.
///
/// Passed explicitly to every accessor. A context without a location source
/// or navigator is valid to build but fails on first use with
/// [`QueryParamError::MissingContext`].
#[derive(Clone, Default)]
pub struct QueryParamContext {
    location: Option<Rc<dyn LocationSource>>,
    navigator: Option<Rc<dyn Navigator>>,
    query_codec: Option<Rc<dyn QueryStringCodec>>,
    options: QueryParamOptions,
}

impl QueryParamContext {
    pub fn new(location: Rc<dyn LocationSource>, navigator: Rc<dyn Navigator>) -> Self {
        Self {
            location: Some(location),
            navigator: Some(navigator),
            query_codec: None,
            options: QueryParamOptions::default(),
        }
    }

    /// Use one object as both location source and navigator.
    pub fn from_history<H>(history: Rc<H>) -> Self
    where
        H: LocationSource + Navigator + 'static,
    {
        Self::new(history.clone(), history)
    }

    /// A context with no collaborators.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn with_location_source(mut self, location: Rc<dyn LocationSource>) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_navigator(mut self, navigator: Rc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Replace the default [`UrlEncodedQuery`] string codec.
    pub fn with_query_codec(mut self, codec: Rc<dyn QueryStringCodec>) -> Self {
        self.query_codec = Some(codec);
        self
    }

    pub fn with_options(mut self, options: QueryParamOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &QueryParamOptions {
        &self.options
    }

    pub fn navigator(&self) -> Result<&Rc<dyn Navigator>, QueryParamError> {
        self.navigator
            .as_ref()
            .ok_or(QueryParamError::MissingContext("navigator"))
    }

    pub fn location_source(&self) -> Result<&Rc<dyn LocationSource>, QueryParamError> {
        self.location
            .as_ref()
            .ok_or(QueryParamError::MissingContext("location"))
    }

    pub fn location(&self) -> Result<Location, QueryParamError> {
        Ok(self.location_source()?.location())
    }

    /// Fail unless both collaborators are configured.
    pub fn ensure_ready(&self) -> Result<(), QueryParamError> {
        self.location_source()?;
        self.navigator()?;
        Ok(())
    }

    /// Read a fresh snapshot of the current location.
    pub fn snapshot(&self) -> Result<Snapshot, QueryParamError> {
        let location = self.location()?;
        Ok(self.snapshot_of(&location))
    }

    pub fn snapshot_of(&self, location: &Location) -> Snapshot {
        match &self.query_codec {
            Some(codec) => read_snapshot(location, codec.as_ref()),
            None => read_snapshot(location, &UrlEncodedQuery::from_options(&self.options)),
        }
    }

    pub fn stringify(&self, snapshot: &Snapshot) -> String {
        match &self.query_codec {
            Some(codec) => codec.stringify(snapshot),
            None => UrlEncodedQuery::from_options(&self.options).stringify(snapshot),
        }
    }
}

impl std::fmt::Debug for QueryParamContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryParamContext")
            .field("has_location", &self.location.is_some())
            .field("has_navigator", &self.navigator.is_some())
            .field("custom_query_codec", &self.query_codec.is_some())
            .field("options", &self.options)
            .finish()
    }
}
