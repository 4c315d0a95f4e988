//! HTTP mapping for [`AppError`].
//!
//! Every error response has the same body:
//!
//! ```json
//! {"code": "NOT_FOUND", "detail": "Employee not found"}
//! ```
//!
//! Clients match on `code`; `detail` is shown to users as-is.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Stable error code constants.
pub mod error_code {
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const CONFLICT: &str = "CONFLICT";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    pub detail: String,
}

impl AppError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidRequest(_) => error_code::INVALID_REQUEST,
            AppError::Conflict(_) => error_code::CONFLICT,
            AppError::NotFound(_) => error_code::NOT_FOUND,
            _ => error_code::INTERNAL_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            code: Some(self.error_code().to_string()),
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
