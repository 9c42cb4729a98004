//! Codecs for list-valued parameters

use crate::codec::QueryParamCodec;
use crate::encoded::EncodedValue;
use crate::error::CodecError;

/// String lists written as repeated keys: `?tag=x&tag=y`.
///
/// An empty list has no URL form and reads back as absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArrayParam;

impl QueryParamCodec for ArrayParam {
    type Value = Vec<String>;

    fn encode(&self, value: Option<&Vec<String>>) -> Result<Option<EncodedValue>, CodecError> {
        Ok(value.map(|values| EncodedValue::Multi(values.clone())))
    }

    fn decode(&self, encoded: &EncodedValue) -> Result<Option<Vec<String>>, CodecError> {
        Ok(Some(encoded.to_vec()))
    }
}

/// Number lists written as repeated keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NumericArrayParam;

impl QueryParamCodec for NumericArrayParam {
    type Value = Vec<f64>;

    fn encode(&self, value: Option<&Vec<f64>>) -> Result<Option<EncodedValue>, CodecError> {
        Ok(value.map(|values| EncodedValue::Multi(values.iter().map(f64::to_string).collect())))
    }

    fn decode(&self, encoded: &EncodedValue) -> Result<Option<Vec<f64>>, CodecError> {
        let values = encoded.to_vec();
        if let [only] = values.as_slice() {
            if only.is_empty() {
                return Ok(None);
            }
        }
        values
            .iter()
            .map(|s| {
                s.trim()
                    .parse::<f64>()
                    .map_err(|_| CodecError::invalid(s.as_str(), "a number"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

/// String lists joined into one value: `?tags=x_y_z`.
///
/// The empty list round-trips as an empty value. Elements must not contain
/// the delimiter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DelimitedArrayParam {
    delimiter: String,
}

impl DelimitedArrayParam {
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
        }
    }

    pub fn comma() -> Self {
        Self::new(",")
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }
}

impl Default for DelimitedArrayParam {
    fn default() -> Self {
        Self::new("_")
    }
}

impl QueryParamCodec for DelimitedArrayParam {
    type Value = Vec<String>;

    fn encode(&self, value: Option<&Vec<String>>) -> Result<Option<EncodedValue>, CodecError> {
        Ok(value.map(|values| EncodedValue::Single(values.join(&self.delimiter))))
    }

    fn decode(&self, encoded: &EncodedValue) -> Result<Option<Vec<String>>, CodecError> {
        match encoded.first() {
            Some("") => Ok(Some(Vec::new())),
            Some(s) => Ok(Some(
                s.split(self.delimiter.as_str()).map(str::to_string).collect(),
            )),
            None => Ok(None),
        }
    }
}
