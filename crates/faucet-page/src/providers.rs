//! Session and claim-status lookups.
//!
//! Both are owned by external systems (the auth provider and the claim
//! ledger). The page only consumes them through these traits, resolved once
//! per request before the page renders.

use crate::error::{FaucetError, FaucetResult};
use async_trait::async_trait;
use axum::http::HeaderMap;
use tracing::debug;

/// Opaque authenticated identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
}

/// Resolves the visitor's session from the incoming request
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn session(&self, headers: &HeaderMap) -> FaucetResult<Option<Session>>;
}

/// Answers whether a session already claimed within the eligibility window
#[async_trait]
pub trait ClaimStatusProvider: Send + Sync {
    async fn has_claimed(&self, session: &Session) -> FaucetResult<bool>;
}

/// Every visitor is anonymous
#[derive(Debug, Default, Clone)]
pub struct NoSession;

#[async_trait]
impl SessionProvider for NoSession {
    async fn session(&self, _headers: &HeaderMap) -> FaucetResult<Option<Session>> {
        Ok(None)
    }
}

/// Reads the session id from a header set by an authenticating proxy
#[derive(Debug, Clone)]
pub struct HeaderSessionProvider {
    header: String,
}

impl HeaderSessionProvider {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
        }
    }
}

#[async_trait]
impl SessionProvider for HeaderSessionProvider {
    async fn session(&self, headers: &HeaderMap) -> FaucetResult<Option<Session>> {
        let Some(value) = headers.get(self.header.as_str()) else {
            return Ok(None);
        };

        let id = value
            .to_str()
            .map_err(|e| {
                FaucetError::Provider(format!("Malformed {} header: {}", self.header, e))
            })?
            .trim();

        if id.is_empty() {
            return Ok(None);
        }

        debug!("Resolved session {} from {}", id, self.header);
        Ok(Some(Session { id: id.to_string() }))
    }
}

/// Nobody has ever claimed
#[derive(Debug, Default, Clone)]
pub struct NeverClaimed;

#[async_trait]
impl ClaimStatusProvider for NeverClaimed {
    async fn has_claimed(&self, _session: &Session) -> FaucetResult<bool> {
        Ok(false)
    }
}
