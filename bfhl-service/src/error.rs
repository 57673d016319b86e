//! Dispatcher error taxonomy.
//!
//! Validation errors reach the caller verbatim as 400s. Everything else
//! becomes a 500 with a fixed message; the cause is only logged.

use crate::services::providers::ProviderError;
use axum::http::StatusCode;
use thiserror::Error;

pub const EXACTLY_ONE_KEY: &str = "Request must contain exactly one key";
pub const INVALID_KEY: &str = "Invalid key";
pub const INVALID_FIBONACCI: &str = "Invalid fibonacci input";
pub const INVALID_PRIME: &str = "Invalid prime array input";
pub const INVALID_LCM: &str = "Invalid lcm array input";
pub const INVALID_HCF: &str = "Invalid hcf array input";
pub const AI_EXPECTS_STRING: &str = "AI expects a non-empty string";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum BfhlError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("Gemini API failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl BfhlError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BfhlError::Validation(_) => StatusCode::BAD_REQUEST,
            BfhlError::Provider(_) | BfhlError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to put in the response envelope.
    pub fn public_message(&self) -> &'static str {
        match self {
            BfhlError::Validation(msg) => *msg,
            BfhlError::Provider(_) | BfhlError::Internal(_) => INTERNAL_SERVER_ERROR,
        }
    }

    /// Label used for the `outcome` metric.
    pub fn outcome(&self) -> &'static str {
        match self {
            BfhlError::Validation(_) => "invalid",
            BfhlError::Provider(_) => "upstream_error",
            BfhlError::Internal(_) => "error",
        }
    }
}
