//! Multi-parameter binding
//!
//! Several [`ParamBinding`]s read from one shared snapshot and are
//! aggregated into a [`DecodedState`] whose `Rc` only changes when one of
//! its values does. Writes go through [`ParamsSetter`], which turns a whole
//! batch of changes into a single navigation.

use crate::binding::ParamBinding;
use crate::codec::{AnyEncoder, QueryParamCodec};
use crate::context::QueryParamContext;
use crate::dispatch::{dispatch, ChangeRequest};
use crate::error::QueryParamError;
use crate::params::StringParam;
use crate::snapshot::Snapshot;
use crate::update_type::UpdateType;
use std::any::Any;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

type DecodedSlot = Option<Rc<dyn Any>>;

/// A [`ParamBinding`] with its value type erased.
trait ErasedBinding {
    fn name(&self) -> &str;
    fn decode_any(&mut self, snapshot: &Snapshot) -> Result<DecodedSlot, QueryParamError>;
    fn encoder(&self) -> Rc<dyn AnyEncoder>;
}

impl<C: QueryParamCodec> ErasedBinding for ParamBinding<C> {
    fn name(&self) -> &str {
        ParamBinding::name(self)
    }

    fn decode_any(&mut self, snapshot: &Snapshot) -> Result<DecodedSlot, QueryParamError> {
        Ok(self.decode(snapshot)?.map(|value| value as Rc<dyn Any>))
    }

    fn encoder(&self) -> Rc<dyn AnyEncoder> {
        self.shared_codec()
    }
}

/// Ordered set of parameter names and their codecs.
///
/// ```
/// use urlq_core::params::{NumberParam, StringParam};
/// use urlq_core::ParamConfigMap;
///
/// let config = ParamConfigMap::new()
///     .param("page", NumberParam)
///     .param("filter", StringParam);
/// assert_eq!(config.len(), 2);
/// ```
#[derive(Default)]
pub struct ParamConfigMap {
    entries: Vec<Box<dyn ErasedBinding>>,
    error: Option<QueryParamError>,
}

impl ParamConfigMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param<C: QueryParamCodec>(mut self, name: impl Into<String>, codec: C) -> Self {
        if self.error.is_some() {
            return self;
        }
        match ParamBinding::new(name, codec) {
            Ok(binding) => self.entries.push(Box::new(binding)),
            Err(e) => self.error = Some(e),
        }
        self
    }

    /// Shorthand for a parameter using the default string codec.
    pub fn string(self, name: impl Into<String>) -> Self {
        self.param(name, StringParam)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ParamConfigMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|b| b.name()))
            .finish()
    }
}

/// Decoded values for a configured parameter set, in configuration order.
pub struct DecodedState {
    entries: Vec<(Rc<str>, DecodedSlot)>,
}

impl DecodedState {
    fn slot(&self, name: &str) -> Option<&DecodedSlot> {
        self.entries
            .iter()
            .find(|(n, _)| &**n == name)
            .map(|(_, slot)| slot)
    }

    /// The decoded value of `name`, or `None` when it is absent, not
    /// configured, or not a `T`.
    pub fn get<T: 'static>(&self, name: &str) -> Option<&T> {
        self.slot(name)?.as_ref()?.downcast_ref::<T>()
    }

    /// Like [`get`](Self::get) but returns the shared `Rc`, whose identity is
    /// stable while the encoded value is unchanged.
    pub fn get_rc<T: 'static>(&self, name: &str) -> Option<Rc<T>> {
        self.slot(name)?.clone()?.downcast::<T>().ok()
    }

    /// Whether `name` currently has a decoded value.
    pub fn is_set(&self, name: &str) -> bool {
        matches!(self.slot(name), Some(Some(_)))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| &**n)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for DecodedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.entries
                    .iter()
                    .map(|(n, slot)| (&**n, if slot.is_some() { "set" } else { "unset" })),
            )
            .finish()
    }
}

fn same_slot(a: &DecodedSlot, b: &DecodedSlot) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}

pub struct ParamsBinding {
    bindings: Vec<Box<dyn ErasedBinding>>,
    names: Vec<Rc<str>>,
    encoders: Rc<[(Rc<str>, Rc<dyn AnyEncoder>)]>,
    state: Option<Rc<DecodedState>>,
}

impl ParamsBinding {
    pub fn new(config: ParamConfigMap) -> Result<Self, QueryParamError> {
        if let Some(e) = config.error {
            return Err(e);
        }

        let mut names: Vec<Rc<str>> = Vec::with_capacity(config.entries.len());
        for binding in &config.entries {
            if names.iter().any(|n| &**n == binding.name()) {
                return Err(QueryParamError::DuplicateParameter(binding.name().to_string()));
            }
            names.push(Rc::from(binding.name()));
        }

        let encoders = names
            .iter()
            .cloned()
            .zip(config.entries.iter().map(|b| b.encoder()))
            .collect();

        Ok(Self {
            bindings: config.entries,
            names,
            encoders,
            state: None,
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|n| &**n)
    }

    /// Decode every configured parameter from `snapshot`.
    ///
    /// Returns the previous state unchanged when every value kept its
    /// identity.
    pub fn decode(&mut self, snapshot: &Snapshot) -> Result<Rc<DecodedState>, QueryParamError> {
        let mut slots = Vec::with_capacity(self.bindings.len());
        for binding in &mut self.bindings {
            slots.push(binding.decode_any(snapshot)?);
        }

        if let Some(previous) = &self.state {
            let unchanged = previous
                .entries
                .iter()
                .zip(&slots)
                .all(|((_, old), new)| same_slot(old, new));
            if unchanged {
                return Ok(previous.clone());
            }
        }

        let state = Rc::new(DecodedState {
            entries: self.names.iter().cloned().zip(slots).collect(),
        });
        self.state = Some(state.clone());
        Ok(state)
    }

    /// Decode against one fresh snapshot from `ctx` and return the state with
    /// its batch setter.
    pub fn bind(
        &mut self,
        ctx: &QueryParamContext,
    ) -> Result<(Rc<DecodedState>, ParamsSetter), QueryParamError> {
        ctx.ensure_ready()?;
        let snapshot = ctx.snapshot()?;
        let state = self.decode(&snapshot)?;
        Ok((state, self.setter(ctx)))
    }

    pub fn setter(&self, ctx: &QueryParamContext) -> ParamsSetter {
        ParamsSetter {
            encoders: self.encoders.clone(),
            ctx: ctx.clone(),
        }
    }
}

impl fmt::Debug for ParamsBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamsBinding")
            .field("names", &self.names)
            .field("state", &self.state)
            .finish()
    }
}

/// A partial set of typed changes. `None` removes the parameter.
#[derive(Default)]
pub struct Changes {
    entries: Vec<(String, Option<Box<dyn Any>>)>,
}

impl Changes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<T: 'static>(self, name: impl Into<String>, value: T) -> Self {
        self.set_option(name, Some(value))
    }

    pub fn remove(self, name: impl Into<String>) -> Self {
        self.set_option::<()>(name, None)
    }

    /// Later entries for the same name replace earlier ones.
    pub fn set_option<T: 'static>(mut self, name: impl Into<String>, value: Option<T>) -> Self {
        let name = name.into();
        let value = value.map(|v| Box::new(v) as Box<dyn Any>);
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
        self
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
}

impl fmt::Debug for Changes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Writes a batch of changes with one navigation.
#[derive(Clone)]
pub struct ParamsSetter {
    encoders: Rc<[(Rc<str>, Rc<dyn AnyEncoder>)]>,
    ctx: QueryParamContext,
}

impl ParamsSetter {
    /// Encode every change with its parameter's codec and dispatch them
    /// together.
    ///
    /// Names that are not configured fail the whole batch with
    /// [`QueryParamError::UnknownParameter`] before anything is encoded, and
    /// an encode failure stops it before navigation.
    pub fn set(&self, changes: Changes, update_type: Option<UpdateType>) -> Result<(), QueryParamError> {
        let mut resolved = Vec::with_capacity(changes.entries.len());
        for (name, value) in &changes.entries {
            let Some((_, encoder)) = self.encoders.iter().find(|(n, _)| &**n == name) else {
                debug!("Rejecting query param batch: '{}' is not configured", name);
                return Err(QueryParamError::UnknownParameter(name.clone()));
            };
            resolved.push((name.as_str(), encoder, value.as_deref()));
        }

        let mut request = ChangeRequest::new();
        for (name, encoder, value) in resolved {
            request.set(name, encoder.encode_any(name, value)?);
        }

        let update_type = update_type.unwrap_or(self.ctx.options().default_update_type);
        dispatch(&self.ctx, &request, update_type)
    }
}

impl fmt::Debug for ParamsSetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamsSetter")
            .field("names", &self.encoders.iter().map(|(n, _)| n).collect::<Vec<_>>())
            .finish()
    }
}
