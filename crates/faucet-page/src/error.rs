//! Error handling for the faucet page.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

/// Faucet page error types
#[derive(Error, Debug)]
pub enum FaucetError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Verification request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Verification server answered with HTTP {0}")]
    UpstreamStatus(u16),

    #[error("Session or claim status lookup failed: {0}")]
    Provider(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl FaucetError {
    /// Whether the error came from talking to the verification server
    pub fn is_network(&self) -> bool {
        matches!(self, FaucetError::Transport(_) | FaucetError::UpstreamStatus(_))
    }
}

impl IntoResponse for FaucetError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = if self.is_network() {
            (StatusCode::BAD_GATEWAY, "Verification server unavailable".to_string())
        } else {
            match self {
                FaucetError::Config(_)
                | FaucetError::InvalidConfig(_)
                | FaucetError::InvalidUrl(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error".to_string())
                }
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string()),
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

/// Result type alias for faucet operations
pub type FaucetResult<T> = Result<T, FaucetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_classification() {
        assert!(FaucetError::UpstreamStatus(502).is_network());
        assert!(!FaucetError::Provider("down".to_string()).is_network());
        assert!(!FaucetError::Internal(anyhow::anyhow!("boom")).is_network());
    }

    #[test]
    fn test_error_response_status() {
        let response = FaucetError::UpstreamStatus(500).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = FaucetError::Provider("lookup failed".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = FaucetError::InvalidConfig("port".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    }
}
