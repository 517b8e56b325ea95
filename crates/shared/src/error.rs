use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MdiError {
    #[error("unknown code '{code}'")]
    UnknownCode { code: String },
    #[error("field {index} is out of range (code has {num_words} words)")]
    FieldOutOfRange { index: usize, num_words: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOperation {
    SetMode,
    SendMdi,
}

/// The machine controller refused or could not accept a request.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{operation:?} failed: {message}")]
pub struct DispatchError {
    pub operation: DispatchOperation,
    pub message: String,
}

impl DispatchError {
    pub fn new(operation: DispatchOperation, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}
