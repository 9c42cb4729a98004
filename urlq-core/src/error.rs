use thiserror::Error;

/// Failure inside a single codec's encode or decode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Invalid value {value:?}, expected {expected}")]
    Invalid {
        value: String,
        expected: &'static str,
    },
    #[error("JSON error: {0}")]
    Json(String),
    #[error("{0}")]
    Custom(String),
}

impl CodecError {
    pub fn invalid(value: impl Into<String>, expected: &'static str) -> Self {
        CodecError::Invalid {
            value: value.into(),
            expected,
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(e: serde_json::Error) -> Self {
        CodecError::Json(e.to_string())
    }
}

/// Errors surfaced by bindings and the dispatcher
#[derive(Error, Debug, Clone)]
pub enum QueryParamError {
    #[error("No {0} configured: query params were used outside of a query param provider")]
    MissingContext(&'static str),
    #[error("Failed to decode query param '{name}': {source}")]
    Decode {
        name: String,
        #[source]
        source: CodecError,
    },
    #[error("Failed to encode query param '{name}': {source}")]
    Encode {
        name: String,
        #[source]
        source: CodecError,
    },
    #[error("Unknown query param '{0}'")]
    UnknownParameter(String),
    #[error("Query param '{0}' is configured more than once")]
    DuplicateParameter(String),
    #[error("Query param name must not be empty")]
    EmptyName,
    #[error("Value for query param '{name}' has the wrong type, expected {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
    },
}
