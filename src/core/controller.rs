use std::sync::Arc;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use crate::catalog::domain::CatalogService;
use crate::core::command::CommandError;

#[derive(Clone)]
pub struct AppState {
    pub(crate) catalog_service: Arc<dyn CatalogService>,
}

impl AppState {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> AppState {
        AppState {
            catalog_service,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    pub success: bool,
}

impl MessageResponse {
    pub fn ok(message: &str) -> Self {
        Self {
            message: message.to_string(),
            success: true,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    success: bool,
    status_code: u16,
}

#[derive(Debug)]
pub struct ServerError {
    pub status: StatusCode,
    pub message: String,
}

impl ServerError {
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.message.as_str(),
            success: false,
            status_code: self.status.as_u16(),
        };
        (self.status, Json(body)).into_response()
    }
}

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    ServerError::new(StatusCode::BAD_REQUEST, format!("Invalid request body: {}", err).as_str())
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        let status = match err {
            CommandError::DuplicateKey { .. } => StatusCode::CONFLICT,
            CommandError::NotFound { .. } => StatusCode::NOT_FOUND,
            CommandError::Validation { .. } => StatusCode::BAD_REQUEST,
            CommandError::Serialization { .. } => StatusCode::BAD_REQUEST,
            CommandError::Unavailable { .. } => StatusCode::BAD_GATEWAY,
            CommandError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            CommandError::Runtime { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = ?err, "request failed");
        }
        ServerError::new(status, err.message())
    }
}
