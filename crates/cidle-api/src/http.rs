use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;

use crate::{error::ApiError, handler::HookHandler};

const SIGNATURE_HEADER: &str = "x-hub-signature";

/// HTTP surface builder.
pub struct HttpApi<H> {
    handler: Arc<H>,
}

impl<H> HttpApi<H>
where
    H: HookHandler,
{
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }

    /// Build axum router with mounted endpoints.
    ///
    /// Routes:
    /// - POST /hooks/ci - webhook-triggered start
    /// - POST /hooks/stop - timer-triggered stop
    /// - GET /healthz - liveness
    pub fn router(self) -> Router {
        Router::new()
            .route("/hooks/ci", post(start_hook::<H>))
            .route("/hooks/stop", post(stop_hook::<H>))
            .route("/healthz", get(healthz))
            .with_state(self.handler)
    }
}

#[derive(Debug, Serialize)]
struct HookResponse {
    status: &'static str,
}

/// POST /hooks/ci
async fn start_hook<H>(
    State(handler): State<Arc<H>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
    H: HookHandler,
{
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    handler.start(&body, signature).await?;

    Ok((StatusCode::ACCEPTED, Json(HookResponse { status: "accepted" })))
}

/// POST /hooks/stop
async fn stop_hook<H>(State(handler): State<Arc<H>>) -> Result<impl IntoResponse, ApiError>
where
    H: HookHandler,
{
    handler.stop().await?;

    Ok((StatusCode::ACCEPTED, Json(HookResponse { status: "accepted" })))
}

/// GET /healthz
async fn healthz() -> impl IntoResponse {
    Json(HookResponse { status: "ok" })
}
