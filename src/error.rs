use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Everything a handler can fail with, mapped onto the response envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),
    /// Bad login credentials. Deliberately the same message for an unknown
    /// email and a wrong password.
    #[error("Invalid input")]
    InvalidCredentials,
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("Access denied - admin only")]
    Forbidden,
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(&'static str),
    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidCredentials => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref e) = self {
            // The client only ever sees the generic message.
            error!(error = %e, "unexpected failure");
        }
        let body = ErrorBody {
            success: false,
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::Validation("Missing fields").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::InvalidCredentials.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Unauthorized("Unauthorized - no token provided").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::NotFound("Project not found").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("User already exists").status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_never_leaks_the_cause() {
        let err = ApiError::Internal(anyhow::anyhow!("connection refused"));
        assert_eq!(err.to_string(), "Internal Server Error");
    }

    #[test]
    fn login_failures_share_one_message() {
        assert_eq!(ApiError::InvalidCredentials.to_string(), "Invalid input");
    }
}
