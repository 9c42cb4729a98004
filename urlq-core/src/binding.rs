//! Single-parameter binding
//!
//! A [`ParamBinding`] owns the memo for one parameter. Keep the same binding
//! alive across re-evaluations (e.g. in a hook slot) so that an unchanged
//! encoded value keeps returning the same `Rc`.

use crate::codec::QueryParamCodec;
use crate::context::QueryParamContext;
use crate::dispatch::{dispatch, ChangeRequest};
use crate::encoded::EncodedValue;
use crate::error::QueryParamError;
use crate::params::StringParam;
use crate::snapshot::Snapshot;
use crate::update_type::UpdateType;
use std::rc::Rc;
use tracing::trace;

/// Last decode result, keyed by the encoded value it came from.
struct Memo<V> {
    key: Option<EncodedValue>,
    value: Option<Rc<V>>,
}

pub struct ParamBinding<C: QueryParamCodec> {
    name: Rc<str>,
    codec: Rc<C>,
    memo: Option<Memo<C::Value>>,
}

impl ParamBinding<StringParam> {
    /// A binding using the default string codec.
    pub fn string(name: impl Into<String>) -> Result<Self, QueryParamError> {
        Self::new(name, StringParam)
    }
}

impl<C: QueryParamCodec> ParamBinding<C> {
    pub fn new(name: impl Into<String>, codec: C) -> Result<Self, QueryParamError> {
        let name: String = name.into();
        if name.is_empty() {
            return Err(QueryParamError::EmptyName);
        }
        Ok(Self {
            name: name.into(),
            codec: Rc::new(codec),
            memo: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub(crate) fn shared_codec(&self) -> Rc<C> {
        self.codec.clone()
    }

    /// Decode this parameter from `snapshot`.
    ///
    /// An absent parameter is `None` without calling the codec. If the encoded
    /// value equals the one seen last time, the previous `Rc` is returned and
    /// the codec is not called either. Failed decodes are not memoized.
    pub fn decode(&mut self, snapshot: &Snapshot) -> Result<Option<Rc<C::Value>>, QueryParamError> {
        let encoded = snapshot.get(&self.name);

        if let Some(memo) = &self.memo {
            if memo.key.as_ref() == encoded {
                return Ok(memo.value.clone());
            }
        }

        let value = match encoded {
            None => None,
            Some(encoded) => {
                trace!("Decoding query param '{}' from {:?}", self.name, encoded);
                self.codec
                    .decode(encoded)
                    .map_err(|source| QueryParamError::Decode {
                        name: self.name.to_string(),
                        source,
                    })?
                    .map(Rc::new)
            }
        };

        self.memo = Some(Memo {
            key: encoded.cloned(),
            value: value.clone(),
        });
        Ok(value)
    }

    /// Decode against `snapshot`, or a fresh one from `ctx` when none is
    /// given, and return the value with its setter.
    ///
    /// Fails with [`QueryParamError::MissingContext`] if `ctx` cannot both
    /// read and navigate.
    pub fn bind(
        &mut self,
        ctx: &QueryParamContext,
        snapshot: Option<&Snapshot>,
    ) -> Result<(Option<Rc<C::Value>>, ParamSetter<C>), QueryParamError> {
        ctx.ensure_ready()?;
        let value = match snapshot {
            Some(snapshot) => self.decode(snapshot)?,
            None => self.decode(&ctx.snapshot()?)?,
        };
        Ok((value, self.setter(ctx)))
    }

    pub fn setter(&self, ctx: &QueryParamContext) -> ParamSetter<C> {
        ParamSetter {
            name: self.name.clone(),
            codec: self.codec.clone(),
            ctx: ctx.clone(),
        }
    }
}

/// Writes one parameter back into the URL.
pub struct ParamSetter<C: QueryParamCodec> {
    name: Rc<str>,
    codec: Rc<C>,
    ctx: QueryParamContext,
}

impl<C: QueryParamCodec> Clone for ParamSetter<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            codec: self.codec.clone(),
            ctx: self.ctx.clone(),
        }
    }
}

impl<C: QueryParamCodec> ParamSetter<C> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Encode `value` and navigate. `None` removes the parameter under the
    /// merging update types. Without an explicit `update_type` the context's
    /// default (normally `replaceIn`) applies.
    pub fn set(
        &self,
        value: Option<&C::Value>,
        update_type: Option<UpdateType>,
    ) -> Result<(), QueryParamError> {
        let encoded = self
            .codec
            .encode(value)
            .map_err(|source| QueryParamError::Encode {
                name: self.name.to_string(),
                source,
            })?;
        let update_type = update_type.unwrap_or(self.ctx.options().default_update_type);
        dispatch(
            &self.ctx,
            &ChangeRequest::single(&*self.name, encoded),
            update_type,
        )
    }

    pub fn remove(&self, update_type: Option<UpdateType>) -> Result<(), QueryParamError> {
        self.set(None, update_type)
    }
}
