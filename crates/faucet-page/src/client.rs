//! Client for the remote verification server.
//!
//! The server exposes two JSON endpoints, one that emails a verification code
//! and one that checks it and issues the token. Both answer with a body
//! carrying a numeric `status` where `1` means success.

use crate::config::VerificationConfig;
use crate::error::{FaucetError, FaucetResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Body of the "send verification code" request
#[derive(Debug, Serialize)]
pub struct SendCodeRequest<'a> {
    pub email: &'a str,
}

/// Body of the "verify code" request
#[derive(Debug, Serialize)]
pub struct VerifyCodeRequest<'a> {
    pub email: &'a str,
    pub code: &'a str,
}

/// How the verification server judged a request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VerificationOutcome {
    Accepted,
    /// Any status other than 1, including a missing one
    Rejected { status: Option<f64> },
}

impl VerificationOutcome {
    /// Interpret a response body
    pub fn from_body(body: &[u8]) -> Self {
        let status = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|value| value.get("status").and_then(serde_json::Value::as_f64));

        match status {
            Some(s) if s == 1.0 => VerificationOutcome::Accepted,
            status => VerificationOutcome::Rejected { status },
        }
    }
}

/// The two calls the claim page makes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VerificationClient: Send + Sync {
    /// Ask the server to email a verification code
    async fn send_code(&self, email: &str) -> FaucetResult<VerificationOutcome>;

    /// Submit the code the user received
    async fn verify_code(&self, email: &str, code: &str) -> FaucetResult<VerificationOutcome>;
}

/// [`VerificationClient`] over HTTP.
///
/// Neither call carries an auth header or cookies.
#[derive(Debug, Clone)]
pub struct HttpVerificationClient {
    http_client: Client,
    send_code_url: Url,
    verify_code_url: Url,
}

impl HttpVerificationClient {
    /// Create a client for the configured verification server
    pub fn new(config: &VerificationConfig) -> FaucetResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build()?;

        Ok(Self {
            http_client,
            send_code_url: config.send_code_url()?,
            verify_code_url: config.verify_code_url()?,
        })
    }

    /// Endpoint the codes are requested from, for health reporting
    pub fn endpoint(&self) -> &Url {
        &self.send_code_url
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        url: &Url,
        body: &T,
    ) -> FaucetResult<VerificationOutcome> {
        let response = self.http_client.post(url.clone()).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Verification server returned {} for {}", status, url);
            return Err(FaucetError::UpstreamStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        let outcome = VerificationOutcome::from_body(&body);
        debug!("Server response from {}: {:?}", url, outcome);
        Ok(outcome)
    }
}

#[async_trait]
impl VerificationClient for HttpVerificationClient {
    async fn send_code(&self, email: &str) -> FaucetResult<VerificationOutcome> {
        self.post(&self.send_code_url, &SendCodeRequest { email }).await
    }

    async fn verify_code(&self, email: &str, code: &str) -> FaucetResult<VerificationOutcome> {
        self.post(&self.verify_code_url, &VerifyCodeRequest { email, code }).await
    }
}
