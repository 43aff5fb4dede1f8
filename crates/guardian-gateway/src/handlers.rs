// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route handlers.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use guardian_auth::Session;
use guardian_core::{
    Credential, CredentialId, CredentialUpdate, GuardianError, HealthStatus, NewCredential, User,
};
use guardian_strength::{GeneratorKind, Strength, StrengthReport};
use guardian_vault::{CredentialFilter, CredentialView, VaultStats};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::auth::AuthSession;
use crate::error::ApiError;
use crate::server::GatewayState;

/// Body of `/api/register` and `/api/login`.
#[derive(Deserialize)]
pub struct AccountRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AccountRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Query string of `GET /api/passwords`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub filter: Option<String>,
    pub value: Option<String>,
    pub search: Option<String>,
}

/// Query string of `GET /api/generate`.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateQuery {
    pub kind: Option<String>,
    pub length: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub kind: &'static str,
    pub value: String,
    pub strength: Strength,
}

#[derive(Deserialize)]
pub struct StrengthRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct StrengthResponse {
    pub strength: Strength,
    #[serde(flatten)]
    pub report: StrengthReport,
    pub missing: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: &'static str,
    pub uptime_secs: u64,
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> impl IntoResponse {
    let (code, status) = match state.storage.health_check().await {
        Ok(HealthStatus::Healthy) => (StatusCode::OK, "healthy".to_string()),
        Ok(HealthStatus::Degraded(why)) => (StatusCode::OK, format!("degraded: {why}")),
        Ok(HealthStatus::Unhealthy(why)) => {
            (StatusCode::SERVICE_UNAVAILABLE, format!("unhealthy: {why}"))
        }
        Err(e) => {
            tracing::warn!(error = %e, "storage health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy".to_string())
        }
    };
    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            uptime_secs: state.start_time.elapsed().as_secs(),
        }),
    )
}

/// POST /api/register: create the account and log it in.
pub async fn post_register(
    State(state): State<GatewayState>,
    body: Result<Json<AccountRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Session>), ApiError> {
    let Json(body) = body?;
    let password = SecretString::from(body.password);
    state.accounts.register(&body.username, &password).await?;
    let session = state.accounts.login(&body.username, &password).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// POST /api/login
pub async fn post_login(
    State(state): State<GatewayState>,
    body: Result<Json<AccountRequest>, JsonRejection>,
) -> Result<Json<Session>, ApiError> {
    let Json(body) = body?;
    let password = SecretString::from(body.password);
    Ok(Json(state.accounts.login(&body.username, &password).await?))
}

/// POST /api/logout
pub async fn post_logout(
    State(state): State<GatewayState>,
    Extension(session): Extension<AuthSession>,
) -> Result<StatusCode, ApiError> {
    state.accounts.logout(&session.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/user
pub async fn get_user(Extension(session): Extension<AuthSession>) -> Json<User> {
    Json(session.user)
}

/// GET /api/passwords?filter=&value=&search=
pub async fn list_passwords(
    State(state): State<GatewayState>,
    Extension(session): Extension<AuthSession>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<CredentialView>, ApiError> {
    let Query(query) = query?;
    let filter = CredentialFilter::from_query(query.filter.as_deref(), query.value.as_deref());
    let view = state
        .vault
        .view(session.user.id, &filter, query.search.as_deref())
        .await?;
    Ok(Json(view))
}

/// POST /api/passwords
pub async fn create_password(
    State(state): State<GatewayState>,
    Extension(session): Extension<AuthSession>,
    body: Result<Json<NewCredential>, JsonRejection>,
) -> Result<(StatusCode, Json<Credential>), ApiError> {
    let Json(body) = body?;
    let row = state.vault.create(session.user.id, body).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PATCH /api/passwords/{id}
pub async fn update_password(
    State(state): State<GatewayState>,
    Extension(session): Extension<AuthSession>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<CredentialUpdate>, JsonRejection>,
) -> Result<Json<Credential>, ApiError> {
    let Path(id) = id?;
    let Json(body) = body?;
    let row = state
        .vault
        .update(session.user.id, CredentialId(id), body)
        .await?;
    Ok(Json(row))
}

/// DELETE /api/passwords/{id}
pub async fn delete_password(
    State(state): State<GatewayState>,
    Extension(session): Extension<AuthSession>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.vault.delete(session.user.id, CredentialId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/passwords/stats
pub async fn get_stats(
    State(state): State<GatewayState>,
    Extension(session): Extension<AuthSession>,
) -> Result<Json<VaultStats>, ApiError> {
    Ok(Json(state.vault.stats(session.user.id).await?))
}

/// GET /api/generate?kind=password|passcode&length=
pub async fn get_generate(
    State(state): State<GatewayState>,
    query: Result<Query<GenerateQuery>, QueryRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Query(query) = query?;
    let (name, kind) = match query.kind.as_deref().unwrap_or("password") {
        "password" => (
            "password",
            GeneratorKind::Password {
                length: query.length.unwrap_or(state.generator.password_length),
            },
        ),
        "passcode" => (
            "passcode",
            GeneratorKind::Passcode {
                length: query.length.unwrap_or(state.generator.passcode_length),
            },
        ),
        other => {
            return Err(GuardianError::Validation(format!(
                "unknown kind `{other}`, expected `password` or `passcode`"
            ))
            .into());
        }
    };
    let value = kind.generate(&mut rand::thread_rng())?;
    let strength = guardian_strength::classify(&value);
    Ok(Json(GenerateResponse {
        kind: name,
        value,
        strength,
    }))
}

/// POST /api/strength
pub async fn post_strength(
    body: Result<Json<StrengthRequest>, JsonRejection>,
) -> Result<Json<StrengthResponse>, ApiError> {
    let Json(body) = body?;
    let report = guardian_strength::check(&body.password);
    Ok(Json(StrengthResponse {
        strength: report.strength(),
        missing: report.missing(),
        report,
    }))
}
