use http::StatusCode;
use thiserror::Error;

use crate::api::alpha_ess::Endpoint;

/// Failure of a single API call.
///
/// The [`Display`](std::fmt::Display) output is what the display consumer gets, so the vendor
/// code and message must survive verbatim for the hints to match on them.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("configuration incomplete: missing `{0}`")]
    Configuration(&'static str),

    #[error("network error ({endpoint}): {source}")]
    Transport {
        endpoint: Endpoint,
        source: reqwest::Error,
    },

    #[error("API Error ({}, {endpoint}): {body}", status.as_u16())]
    HttpStatus {
        endpoint: Endpoint,
        status: StatusCode,
        body: String,
    },

    #[error("API reports error ({code}, {endpoint}): {message}")]
    Application {
        endpoint: Endpoint,
        code: i64,
        message: String,
    },

    #[error("invalid response ({endpoint}): {reason}")]
    InvalidResponse { endpoint: Endpoint, reason: String },
}

impl ApiError {
    /// Vendor application code, if the API got as far as returning one.
    pub const fn code(&self) -> Option<i64> {
        match self {
            Self::Application { code, .. } => Some(*code),
            _ => None,
        }
    }
}
