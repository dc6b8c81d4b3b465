use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type CardResult<T> = Result<T, CardError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CardError {
    #[error("JSON error: {0}")]
    JsonError(String),

    #[error("YAML error: {0}")]
    YamlError(String),

    #[error("Failed to read '{path}': {reason}")]
    Io { path: String, reason: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid card type '{found}': root element must be 'AdaptiveCard'")]
    InvalidCardType { found: String },

    #[error("Missing required property '{property}' for element '{element}'")]
    MissingProperty { element: String, property: String },

    #[error("Invalid property '{property}' for element '{element}': {reason}")]
    InvalidProperty {
        element: String,
        property: String,
        reason: String,
    },

    #[error("Duplicate input id '{id}': input ids must be unique within the card")]
    DuplicateId { id: String },

    #[error("Maximum nesting depth ({max_depth}) exceeded")]
    MaxNestingDepthExceeded { max_depth: usize },

    #[error("Unsupported host config format for '{path}': expected .json, .yaml or .yml")]
    UnsupportedConfigFormat { path: String },

    #[error("Action '{kind}' dropped: {reason}")]
    ActionDropped { kind: String, reason: String },
}

impl From<serde_json::Error> for CardError {
    fn from(err: serde_json::Error) -> Self {
        CardError::JsonError(err.to_string())
    }
}

impl From<serde_yaml::Error> for CardError {
    fn from(err: serde_yaml::Error) -> Self {
        CardError::YamlError(err.to_string())
    }
}

/// Error category reported to the host through `on_parse_error`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    InvalidPropertyValue,
    RequiredPropertyMissing,
    InvalidJson,
    UnknownElementType,
    CollectionCantBeEmpty,
    IdCollision,
}

/// Structured `{error, message}` record handed to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseErrorReport {
    pub error: ErrorCode,
    pub message: String,
}

impl ParseErrorReport {
    pub fn new(error: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error,
            message: message.into(),
        }
    }
}

impl From<&CardError> for ParseErrorReport {
    fn from(err: &CardError) -> Self {
        let code = match err {
            CardError::JsonError(_) | CardError::YamlError(_) => ErrorCode::InvalidJson,
            CardError::MissingProperty { .. } => ErrorCode::RequiredPropertyMissing,
            CardError::DuplicateId { .. } => ErrorCode::IdCollision,
            CardError::InvalidCardType { .. } => ErrorCode::UnknownElementType,
            _ => ErrorCode::InvalidPropertyValue,
        };
        ParseErrorReport::new(code, err.to_string())
    }
}
