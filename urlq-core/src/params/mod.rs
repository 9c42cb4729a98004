//! Standard codecs for common parameter types
//!
//! All of them encode `None` as "no value", so setting a parameter to `None`
//! removes it from the URL.

mod array;
mod json;
mod scalar;

pub use array::{ArrayParam, DelimitedArrayParam, NumericArrayParam};
pub use json::{JsonParam, PackedParam};
pub use scalar::{BooleanParam, DateParam, IntParam, NumberParam, StringParam};
