//! Codecs for structured values

use crate::codec::QueryParamCodec;
use crate::encoded::EncodedValue;
use crate::error::CodecError;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;

/// Any serde type, written as JSON text.
pub struct JsonParam<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonParam<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonParam<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonParam<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for JsonParam<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JsonParam<{}>", std::any::type_name::<T>())
    }
}

impl<T> QueryParamCodec for JsonParam<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    type Value = T;

    fn encode(&self, value: Option<&T>) -> Result<Option<EncodedValue>, CodecError> {
        value
            .map(|v| serde_json::to_string(v).map(EncodedValue::Single))
            .transpose()
            .map_err(CodecError::from)
    }

    fn decode(&self, encoded: &EncodedValue) -> Result<Option<T>, CodecError> {
        match encoded.first() {
            Some(s) if !s.is_empty() => Ok(Some(serde_json::from_str(s)?)),
            _ => Ok(None),
        }
    }
}

/// Any serde type, written as base64url-encoded JSON.
///
/// Keeps URLs opaque and free of characters that would need escaping.
pub struct PackedParam<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> PackedParam<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for PackedParam<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for PackedParam<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for PackedParam<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PackedParam<{}>", std::any::type_name::<T>())
    }
}

impl<T> QueryParamCodec for PackedParam<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    type Value = T;

    fn encode(&self, value: Option<&T>) -> Result<Option<EncodedValue>, CodecError> {
        let Some(value) = value else {
            return Ok(None);
        };
        let json = serde_json::to_vec(value)?;
        Ok(Some(EncodedValue::Single(URL_SAFE_NO_PAD.encode(json))))
    }

    fn decode(&self, encoded: &EncodedValue) -> Result<Option<T>, CodecError> {
        let encoded = match encoded.first() {
            Some(s) if !s.is_empty() => s,
            _ => return Ok(None),
        };
        let json_bytes = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|_| CodecError::invalid(encoded, "base64url-encoded JSON"))?;
        Ok(Some(serde_json::from_slice(&json_bytes)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Viewport {
        zoom: u8,
        center: (i32, i32),
    }

    #[test]
    fn test_json_roundtrip() {
        let codec = JsonParam::<Viewport>::new();
        let viewport = Viewport {
            zoom: 3,
            center: (10, -4),
        };
        let encoded = codec.encode(Some(&viewport)).unwrap().unwrap();
        assert_eq!(
            encoded,
            EncodedValue::from(r#"{"zoom":3,"center":[10,-4]}"#)
        );
        assert_eq!(codec.decode(&encoded).unwrap(), Some(viewport));
    }

    #[test]
    fn test_json_invalid() {
        let codec = JsonParam::<Viewport>::new();
        assert!(matches!(
            codec.decode(&EncodedValue::from("{zoom")),
            Err(CodecError::Json(_))
        ));
        assert_eq!(codec.decode(&EncodedValue::from("")).unwrap(), None);
    }

    #[test]
    fn test_packed_roundtrip() {
        let codec = PackedParam::<BTreeMap<String, String>>::new();
        let mut state = BTreeMap::new();
        state.insert("panel".to_string(), "open".to_string());
        state.insert("tab".to_string(), "tracks".to_string());

        let encoded = codec.encode(Some(&state)).unwrap().unwrap();
        let raw = encoded.first().unwrap();
        assert!(raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_eq!(codec.decode(&encoded).unwrap(), Some(state));
    }

    #[test]
    fn test_packed_rejects_bad_base64() {
        let codec = PackedParam::<BTreeMap<String, String>>::new();
        assert!(matches!(
            codec.decode(&EncodedValue::from("not valid base64!!!")),
            Err(CodecError::Invalid { .. })
        ));
    }
}
