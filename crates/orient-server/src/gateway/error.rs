use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("empty query")]
    EmptyQuery,

    #[error("search failed: {0}")]
    SearchFailed(String),

    #[error("invalid catalog payload: {0}")]
    InvalidCatalog(String),

    #[error("career not found: {0}")]
    CareerNotFound(String),

    #[error("audit log error: {0}")]
    AuditFailed(String),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::EmptyQuery => StatusCode::BAD_REQUEST,
            GatewayError::SearchFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::InvalidCatalog(_) => StatusCode::BAD_REQUEST,
            GatewayError::CareerNotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::AuditFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
