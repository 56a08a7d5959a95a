use cidle_core::OrchestratorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("orchestration failed: {0}")]
    Core(#[from] OrchestratorError),
}

#[cfg(feature = "http")]
mod http_impl {
    use axum::{
        Json,
        http::StatusCode,
        response::{IntoResponse, Response},
    };
    use cidle_core::OrchestratorError;
    use serde::Serialize;

    use super::ApiError;

    #[derive(Serialize)]
    struct ErrorBody {
        error: String,
    }

    impl IntoResponse for ApiError {
        fn into_response(self) -> Response {
            let status = match &self {
                ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                ApiError::Core(OrchestratorError::Auth(_)) => StatusCode::UNAUTHORIZED,
                ApiError::Core(OrchestratorError::InstanceNotFound { .. }) => StatusCode::CONFLICT,
                ApiError::Core(OrchestratorError::ReadinessTimeout { .. }) => {
                    StatusCode::GATEWAY_TIMEOUT
                }
                ApiError::Core(OrchestratorError::Cloud(_)) => StatusCode::BAD_GATEWAY,
            };

            let body = ErrorBody {
                error: self.to_string(),
            };
            (status, Json(body)).into_response()
        }
    }
}
