//! Client error types

use serde::Deserialize;
use thiserror::Error;

/// Error envelope returned by the API for every non-2xx response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
    /// Present on 429 responses
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub remaining: Option<u32>,
    #[serde(default)]
    pub reset: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
        body: Option<ApiErrorBody>,
    },

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No session token configured")]
    MissingToken,
}

impl ClientError {
    /// HTTP status of an API error
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) | Self::MissingToken => None,
        }
    }

    /// Machine-readable API error code
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }

    pub(crate) fn from_response(status: u16, text: &str) -> Self {
        match serde_json::from_str::<ApiErrorBody>(text) {
            Ok(body) => Self::Api {
                status,
                code: body.error.code.clone(),
                message: body.error.message.clone(),
                body: Some(body),
            },
            Err(_) => Self::Api {
                status,
                code: "UNKNOWN".to_string(),
                message: text.to_string(),
                body: None,
            },
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
