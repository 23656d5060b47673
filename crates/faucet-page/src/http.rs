//! HTTP server and routes for the claim page.

use crate::{
    client::{HttpVerificationClient, VerificationClient},
    config::FaucetConfig,
    controller::{ClaimFlow, Notice, PageState, Stage},
    error::{FaucetError, FaucetResult},
    messages::Messages,
    networks::{network_details, NetworkDetails},
    providers::{
        ClaimStatusProvider, HeaderSessionProvider, NeverClaimed, NoSession, Session,
        SessionProvider,
    },
    view::{PageView, STAGE_CODE},
};
use axum::{
    extract::{Form, Query, State},
    http::HeaderMap,
    response::{Html, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};

/// Shared application state
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<FaucetConfig>,
    pub messages: &'static Messages,
    pub networks: Arc<NetworkDetails>,
    pub client: Arc<dyn VerificationClient>,
    pub sessions: Arc<dyn SessionProvider>,
    pub claims: Arc<dyn ClaimStatusProvider>,
}

impl SharedState {
    /// Assemble state from configuration and the external collaborators
    pub fn new(
        config: FaucetConfig,
        client: Arc<dyn VerificationClient>,
        sessions: Arc<dyn SessionProvider>,
        claims: Arc<dyn ClaimStatusProvider>,
    ) -> Self {
        Self {
            messages: Messages::for_locale(config.page.locale),
            networks: Arc::new(network_details(&config.networks)),
            config: Arc::new(config),
            client,
            sessions,
            claims,
        }
    }

    /// Session and claim status, fetched before anything renders
    async fn lookup(&self, headers: &HeaderMap) -> FaucetResult<(Option<Session>, bool)> {
        let session = self.sessions.session(headers).await?;
        let claimed = match &session {
            Some(session) => self.claims.has_claimed(session).await?,
            None => false,
        };
        Ok((session, claimed))
    }

    fn render(&self, state: &PageState, notice: Option<Notice>) -> Html<String> {
        Html(
            PageView {
                page: &self.config.page,
                messages: self.messages,
                state,
                notice,
                networks: &self.networks,
            }
            .render(),
        )
    }
}

/// Address to prefill from the query string.
///
/// Only a single `addr` counts. A missing or repeated one leaves the field empty.
pub fn prefilled_address(query: &[(String, String)]) -> &str {
    let mut values = query.iter().filter(|(key, _)| key == "addr");
    match (values.next(), values.next()) {
        (Some((_, value)), None) => value,
        _ => "",
    }
}

/// Submitted claim form
#[derive(Debug, Default, Deserialize)]
pub struct ClaimForm {
    #[serde(default)]
    pub address: String,
    pub code: Option<String>,
    pub stage: Option<String>,
    /// Present only when the consent checkbox is checked
    pub consent: Option<String>,
}

impl ClaimForm {
    fn into_flow(self) -> ClaimFlow {
        let stage = match self.stage.as_deref() {
            Some(STAGE_CODE) => Stage::CollectingCode {
                code: self.code.unwrap_or_default(),
            },
            _ => Stage::CollectingEmail,
        };
        ClaimFlow::restore(self.address, stage, self.consent.is_some())
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub verification_endpoint: String,
}

/// Create the HTTP router with all endpoints
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(show_page).post(submit_claim))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Render the page, prefilled from `?addr=`
async fn show_page(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
) -> FaucetResult<Html<String>> {
    let (session, claimed) = state.lookup(&headers).await?;
    let page = PageState::resolve(session.as_ref(), claimed, prefilled_address(&query));

    debug!("Rendering page (session: {}, claimed: {})", session.is_some(), claimed);
    Ok(state.render(&page, None))
}

/// Press the action button
async fn submit_claim(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Form(form): Form<ClaimForm>,
) -> FaucetResult<Html<String>> {
    let (session, claimed) = state.lookup(&headers).await?;

    let page = match PageState::resolve(session.as_ref(), claimed, "") {
        PageState::Unclaimed(_) => {
            let mut flow = form.into_flow();
            let notice = flow.process_claim(state.client.as_ref()).await;
            return Ok(state.render(&PageState::Unclaimed(flow), notice));
        }
        other => other,
    };

    debug!("Claim submitted outside the claim flow; rendering {:?}", page);
    Ok(state.render(&page, None))
}

/// Health check endpoint
async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        verification_endpoint: state.config.verification.base_url.clone(),
    })
}

/// Start the HTTP server
pub async fn start_server(config: &FaucetConfig) -> FaucetResult<()> {
    info!("Starting faucet page...");

    let client = Arc::new(HttpVerificationClient::new(&config.verification)?);
    info!("Verification server: {}", client.endpoint());

    let sessions: Arc<dyn SessionProvider> = match &config.http.session_header {
        Some(header) => {
            info!("Reading sessions from the {} header", header);
            Arc::new(HeaderSessionProvider::new(header.clone()))
        }
        None => Arc::new(NoSession),
    };

    let state = SharedState::new(config.clone(), client, sessions, Arc::new(NeverClaimed));
    let app = create_router(state);

    let bind_addr = format!("{}:{}", config.http.bind_address, config.http.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| {
            FaucetError::Internal(anyhow::anyhow!("Failed to bind to {}: {}", bind_addr, e))
        })?;

    info!("Faucet page listening on {}", bind_addr);
    info!("Endpoints:");
    info!("  GET  /        - Claim page (?addr= prefills the address)");
    info!("  POST /        - Submit the claim form");
    info!("  GET  /health  - Health check");

    axum::serve(listener, app)
        .await
        .map_err(|e| FaucetError::Internal(anyhow::anyhow!("Server error: {}", e)))?;

    Ok(())
}
