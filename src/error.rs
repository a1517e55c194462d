//! Error type shared by the helpers that can refuse their input.

use thiserror::Error;

/// Why a helper produced no value. Parsing itself never fails; these cover
/// bad arguments (empty key, empty template, empty URL) and missing keys.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HelperError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },
    #[error("key '{key}' not found")]
    NotFound { key: String },
}

impl HelperError {
    pub fn kind(&self) -> &'static str {
        match self {
            HelperError::InvalidArgument { .. } => "invalid_argument",
            HelperError::NotFound { .. } => "not_found",
        }
    }
}
