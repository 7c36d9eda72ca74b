use std::{net::SocketAddr, sync::Arc};

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use mail_relay::{MailTransport, SmtpRelay};
use server_api::{submit_contact, ApiContext};
use shared::{
    error::ApiError,
    protocol::{contact_route, ContactAccepted, ContactPayload, ErrorBody},
};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;

use config::{load_settings, Settings};

#[derive(Clone)]
struct AppState {
    api: ApiContext,
}

const MAX_CONTACT_BODY_BYTES: usize = 64 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = load_settings();
    let relay = build_relay(&settings)?;
    let state = AppState {
        api: ApiContext::new(relay),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn build_relay(settings: &Settings) -> anyhow::Result<Option<Arc<dyn MailTransport>>> {
    let Some(relay_config) = settings.relay_config() else {
        warn!("mail relay credentials missing; contact submissions will fail with a configuration error");
        return Ok(None);
    };
    let relay: Arc<dyn MailTransport> = Arc::new(SmtpRelay::new(&relay_config)?);
    info!(host = %relay_config.host, port = relay_config.port, "mail relay configured");
    Ok(Some(relay))
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for shutdown signal");
    }
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(contact_route(), post(http_contact))
        .layer(RequestBodyLimitLayer::new(MAX_CONTACT_BODY_BYTES))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_contact(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ContactAccepted>, (StatusCode, Json<ErrorBody>)> {
    let payload: ContactPayload = serde_json::from_slice(&body).map_err(|error| {
        warn!(%error, "rejecting unparseable contact request");
        reject(ApiError::invalid_request())
    })?;
    let accepted = submit_contact(&state.api, payload).await.map_err(reject)?;
    Ok(Json(accepted))
}

fn reject(err: ApiError) -> (StatusCode, Json<ErrorBody>) {
    let status = if err.code.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(err.into()))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
