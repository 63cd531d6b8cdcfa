//! API error classification
//!
//! Only two kinds matter to callers: not-found (a signal for single-record
//! fetches) and everything else. Server error bodies are never parsed.

use thiserror::Error;

use crate::catalogue::{Capability, Catalogue};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,

    #[error("server responded with status {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("could not decode response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("catalogue '{catalogue}' does not support {capability}")]
    Unsupported {
        catalogue: Catalogue,
        capability: Capability,
    },

    #[error("invalid API URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
