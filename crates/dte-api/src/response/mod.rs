//! API error type and response helpers.
//!
//! Every failure leaves the server as `{ "error": { code, message, details? } }`
//! with a status matching the code; successes wrap their payload in the DTO
//! layer's `ApiResponse`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dte_common::AppError;
use dte_core::AuthError;
use dte_service::ServiceError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// Result alias used by every handler
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Authentication outcome surfaced over HTTP; the message is the
    /// user-safe Portuguese string the dashboard displays
    #[error("{}", .0.user_message())]
    Auth(#[from] AuthError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// Malformed path, query or body; `code` tells the client which
    #[error("{message}")]
    BadRequest {
        code: &'static str,
        message: String,
    },

    #[error("Não autenticado")]
    MissingSession,

    #[error("Acesso restrito a administradores")]
    AdminRequired,

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

fn auth_status(e: &AuthError) -> StatusCode {
    match e {
        AuthError::NotFound
        | AuthError::WrongPassword
        | AuthError::WrongCurrentPassword
        | AuthError::SocialOnlyAccount => StatusCode::UNAUTHORIZED,
        AuthError::AccountDisabled => StatusCode::FORBIDDEN,
        AuthError::DuplicateUsername | AuthError::DuplicateEmail => StatusCode::CONFLICT,
        AuthError::WeakPassword => StatusCode::BAD_REQUEST,
        AuthError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl ApiError {
    /// HTTP status for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::App(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Service(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Auth(e) => auth_status(e),
            Self::Validation(_) | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::MissingSession => StatusCode::UNAUTHORIZED,
            Self::AdminRequired => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable code carried in the error body
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::Auth(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BadRequest { code, .. } => code,
            Self::MissingSession => "NOT_AUTHENTICATED",
            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::BadRequest {
            code: "INVALID_PATH_PARAMETER",
            message: format!("Invalid path parameter: {}", msg.into()),
        }
    }

    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::BadRequest {
            code: "INVALID_QUERY_PARAMETER",
            message: format!("Invalid query parameter: {}", msg.into()),
        }
    }

    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::BadRequest {
            code: "INVALID_BODY",
            message: format!("Invalid request body: {}", msg.into()),
        }
    }

    /// Field-level payload for validation failures, absent otherwise
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Validation(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        }
    }
}

/// Wire shape of an error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = ?self, "Request failed with a server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// 201 wrapper; the inner response supplies headers and body
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, self.0).into_response()
    }
}

/// Bare 204
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}
