// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bearer-session authentication middleware.
//!
//! A request passes when `Authorization: Bearer <token>` names a live
//! session. The resolved [`AuthSession`] is stored in request extensions for
//! handlers to extract. Anything else is rejected with 401.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::typed_header::TypedHeaderRejection;
use axum_extra::TypedHeader;
use guardian_core::{GuardianError, User};

use crate::error::ApiError;
use crate::server::GatewayState;

/// The authenticated caller of a request.
#[derive(Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("user", &self.user)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Resolve the bearer token to a user or reject the request.
pub async fn session_middleware(
    State(state): State<GatewayState>,
    bearer: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Ok(TypedHeader(Authorization(bearer))) = bearer else {
        tracing::debug!("request rejected: missing bearer token");
        return Err(GuardianError::Unauthorized.into());
    };

    let token = bearer.token().to_string();
    let user = state.accounts.authenticate(&token).await?;
    request.extensions_mut().insert(AuthSession { user, token });
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use guardian_core::UserId;

    use super::*;

    #[test]
    fn session_debug_redacts_token() {
        let session = AuthSession {
            user: User {
                id: UserId(1),
                username: "alice".into(),
                password_hash: "$argon2id$v=19$x".into(),
                created_at: "2026-01-01T00:00:00.000Z".into(),
            },
            token: "a1b2c3d4e5".into(),
        };
        let debug = format!("{session:?}");
        assert!(debug.contains("alice"));
        assert!(!debug.contains("a1b2c3d4e5"));
        assert!(debug.contains("\"[REDACTED]\""));
    }
}
