// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Guardian credential vault.
//!
//! This crate provides the error type, the plain record types stored per
//! user, and the storage trait every persistence backend implements. The
//! other workspace crates depend on it and never on each other's internals.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::GuardianError;
pub use traits::{PluginAdapter, StorageAdapter};
pub use types::{
    Category, Credential, CredentialId, CredentialUpdate, HealthStatus, NewCredential, NewUser,
    SessionRecord, User, UserId,
};
