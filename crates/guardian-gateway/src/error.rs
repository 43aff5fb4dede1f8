// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping from domain errors to HTTP responses.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use guardian_core::GuardianError;
use serde::Serialize;

/// Error body returned by every failing route.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A [`GuardianError`] on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub GuardianError);

impl From<GuardianError> for ApiError {
    fn from(err: GuardianError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(GuardianError::Validation(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(GuardianError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(GuardianError::Validation(rejection.body_text()))
    }
}

impl ApiError {
    /// Status code and client-facing message. Internal detail never leaves here.
    fn parts(&self) -> (StatusCode, String) {
        match &self.0 {
            GuardianError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            GuardianError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".into()),
            GuardianError::NotFound => (StatusCode::NOT_FOUND, "not found".into()),
            GuardianError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".into(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.parts();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (status, Json(ErrorResponse { error })).into_response()
    }
}
