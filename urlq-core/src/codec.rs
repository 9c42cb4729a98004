//! Per-parameter codec contract

use crate::encoded::EncodedValue;
use crate::error::{CodecError, QueryParamError};
use std::any::Any;
use std::rc::Rc;

/// Converts one parameter between its typed and its URL form.
///
/// Both directions must be deterministic and free of side effects, and
/// `decode(encode(x))` must equal `x` for every valid `x`. `encode(None)` means
/// "no value" and normally returns `Ok(None)`, which removes the parameter.
///
/// `decode` is never called for a parameter that is absent from the URL.
/// It must treat `Single(x)` and `Multi([x])` alike: a key that appears once
/// in the query string always reads back as `Single`.
pub trait QueryParamCodec: 'static {
    type Value: 'static;

    fn encode(&self, value: Option<&Self::Value>) -> Result<Option<EncodedValue>, CodecError>;

    fn decode(&self, encoded: &EncodedValue) -> Result<Option<Self::Value>, CodecError>;
}

impl<C: QueryParamCodec> QueryParamCodec for Rc<C> {
    type Value = C::Value;

    fn encode(&self, value: Option<&Self::Value>) -> Result<Option<EncodedValue>, CodecError> {
        (**self).encode(value)
    }

    fn decode(&self, encoded: &EncodedValue) -> Result<Option<Self::Value>, CodecError> {
        (**self).decode(encoded)
    }
}

/// Type-erased encoder, used where codecs of different value types sit side
/// by side.
pub(crate) trait AnyEncoder {
    fn encode_any(
        &self,
        name: &str,
        value: Option<&dyn Any>,
    ) -> Result<Option<EncodedValue>, QueryParamError>;
}

impl<C: QueryParamCodec> AnyEncoder for C {
    fn encode_any(
        &self,
        name: &str,
        value: Option<&dyn Any>,
    ) -> Result<Option<EncodedValue>, QueryParamError> {
        let typed = match value {
            Some(v) => Some(v.downcast_ref::<C::Value>().ok_or_else(|| {
                QueryParamError::TypeMismatch {
                    name: name.to_string(),
                    expected: std::any::type_name::<C::Value>(),
                }
            })?),
            None => None,
        };
        self.encode(typed).map_err(|source| QueryParamError::Encode {
            name: name.to_string(),
            source,
        })
    }
}
