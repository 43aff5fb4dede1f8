// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Guardian credential vault.

use thiserror::Error;

/// The primary error type used across all Guardian crates.
#[derive(Debug, Error)]
pub enum GuardianError {
    /// Configuration errors (invalid TOML, out-of-range values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, migrations).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Input rejected before it reached storage.
    #[error("validation error: {0}")]
    Validation(String),

    /// The row does not exist or is owned by another user.
    #[error("not found")]
    NotFound,

    /// Missing, expired, or invalid credentials or session token.
    #[error("unauthorized")]
    Unauthorized,

    /// A uniqueness constraint would be violated (e.g. a taken username).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Password hashing or token generation failures.
    #[error("auth error: {0}")]
    Auth(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GuardianError {
    /// Wrap any error as a storage failure.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage {
            source: Box::new(err),
        }
    }
}
