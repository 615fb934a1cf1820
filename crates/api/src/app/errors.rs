use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use triad_auth::AuthError;
use triad_core::DomainError;
use triad_infra::StoreError;

/// Failure reported through the JSON envelope.
///
/// The client only sees the status and its fixed message; the cause is
/// logged where the error is converted.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest,
    NotFound,
    MethodNotAllowed,
    Unprocessable,
    Internal,
    Unavailable,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::BadRequest => "bad request",
            Self::NotFound => "resource not found",
            Self::MethodNotAllowed => "method not allowed",
            Self::Unprocessable => "unprocessable",
            Self::Internal => "internal server error",
            Self::Unavailable => "service unavailable",
        }
    }

    /// Envelope for a bare framework response with this status, if we have one.
    pub fn from_status(status: StatusCode) -> Option<Self> {
        match status {
            StatusCode::BAD_REQUEST => Some(Self::BadRequest),
            StatusCode::NOT_FOUND => Some(Self::NotFound),
            StatusCode::METHOD_NOT_ALLOWED => Some(Self::MethodNotAllowed),
            StatusCode::UNPROCESSABLE_ENTITY => Some(Self::Unprocessable),
            StatusCode::INTERNAL_SERVER_ERROR => Some(Self::Internal),
            StatusCode::SERVICE_UNAVAILABLE => Some(Self::Unavailable),
            _ => None,
        }
    }

    /// Translate a store failure, letting the caller choose the status for
    /// the record-level cases. Infrastructure failures always map to 5xx.
    pub fn from_store(err: StoreError, on_record_error: ApiError) -> Self {
        match err {
            StoreError::Unavailable(msg) => {
                tracing::error!(cause = %msg, "storage unavailable");
                Self::Unavailable
            }
            StoreError::Backend(msg) => {
                tracing::error!(cause = %msg, "storage backend failure");
                Self::Internal
            }
            other => {
                tracing::warn!(cause = %other, status = %on_record_error.status(), "store rejected request");
                on_record_error
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let status = match &err {
            StoreError::NotFound => Self::NotFound,
            _ => Self::Unprocessable,
        };
        Self::from_store(err, status)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let status = match &err {
            DomainError::NotFound | DomainError::InvalidId(_) => Self::NotFound,
            DomainError::Validation(_) | DomainError::Conflict(_) => Self::Unprocessable,
        };
        tracing::warn!(cause = %err, status = %status.status(), "request rejected");
        status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        json_error(self.status(), self.message())
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "error": status.as_u16(),
            "message": message.into(),
        })),
    )
        .into_response()
}

/// 401 carrying the auth failure code and description.
pub fn auth_error_response(err: &AuthError) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "success": false,
            "error": StatusCode::UNAUTHORIZED.as_u16(),
            "code": err.code(),
            "message": err.description(),
        })),
    )
        .into_response()
}

/// Parse a path id; anything that is not an integer does not name a record.
pub fn parse_id<T>(raw: &str) -> Result<T, ApiError>
where
    T: std::str::FromStr<Err = DomainError>,
{
    raw.parse().map_err(ApiError::from)
}
