//! Codecs for single-valued parameters

use crate::codec::QueryParamCodec;
use crate::encoded::EncodedValue;
use crate::error::CodecError;
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// First string of the value, `None` when it is empty.
fn non_empty(encoded: &EncodedValue) -> Option<&str> {
    encoded.first().filter(|s| !s.is_empty())
}

/// Plain strings. The default codec; empty strings are kept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StringParam;

impl QueryParamCodec for StringParam {
    type Value = String;

    fn encode(&self, value: Option<&String>) -> Result<Option<EncodedValue>, CodecError> {
        Ok(value.map(|s| EncodedValue::Single(s.clone())))
    }

    fn decode(&self, encoded: &EncodedValue) -> Result<Option<String>, CodecError> {
        Ok(encoded.first().map(str::to_string))
    }
}

/// Floating point numbers. Integral values are written without a fraction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NumberParam;

impl QueryParamCodec for NumberParam {
    type Value = f64;

    fn encode(&self, value: Option<&f64>) -> Result<Option<EncodedValue>, CodecError> {
        Ok(value.map(|n| EncodedValue::Single(n.to_string())))
    }

    fn decode(&self, encoded: &EncodedValue) -> Result<Option<f64>, CodecError> {
        match non_empty(encoded) {
            Some(s) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| CodecError::invalid(s, "a number")),
            None => Ok(None),
        }
    }
}

/// Signed integers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntParam;

impl QueryParamCodec for IntParam {
    type Value = i64;

    fn encode(&self, value: Option<&i64>) -> Result<Option<EncodedValue>, CodecError> {
        Ok(value.map(|n| EncodedValue::Single(n.to_string())))
    }

    fn decode(&self, encoded: &EncodedValue) -> Result<Option<i64>, CodecError> {
        match non_empty(encoded) {
            Some(s) => s
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| CodecError::invalid(s, "an integer")),
            None => Ok(None),
        }
    }
}

/// Booleans written as `1`/`0`. `true`/`false` are accepted when reading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BooleanParam;

impl QueryParamCodec for BooleanParam {
    type Value = bool;

    fn encode(&self, value: Option<&bool>) -> Result<Option<EncodedValue>, CodecError> {
        Ok(value.map(|b| EncodedValue::from(if *b { "1" } else { "0" })))
    }

    fn decode(&self, encoded: &EncodedValue) -> Result<Option<bool>, CodecError> {
        match non_empty(encoded) {
            Some("1") | Some("true") => Ok(Some(true)),
            Some("0") | Some("false") => Ok(Some(false)),
            Some(other) => Err(CodecError::invalid(other, "1 or 0")),
            None => Ok(None),
        }
    }
}

/// Calendar dates as `YYYY-MM-DD`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateParam;

impl QueryParamCodec for DateParam {
    type Value = NaiveDate;

    fn encode(&self, value: Option<&NaiveDate>) -> Result<Option<EncodedValue>, CodecError> {
        Ok(value.map(|d| EncodedValue::Single(d.format(DATE_FORMAT).to_string())))
    }

    fn decode(&self, encoded: &EncodedValue) -> Result<Option<NaiveDate>, CodecError> {
        match non_empty(encoded) {
            Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
                .map(Some)
                .map_err(|_| CodecError::invalid(s, "a YYYY-MM-DD date")),
            None => Ok(None),
        }
    }
}
