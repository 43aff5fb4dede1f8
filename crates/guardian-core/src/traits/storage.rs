// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for persistence backends (SQLite, etc.).

use async_trait::async_trait;

use crate::error::GuardianError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{
    Credential, CredentialId, CredentialUpdate, NewCredential, NewUser, SessionRecord, User,
    UserId,
};

/// Adapter for storage and persistence backends.
///
/// The storage layer performs no ownership checks: callers look a row up by
/// id and compare its `user_id` with the session user before acting on it.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), GuardianError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), GuardianError>;

    // --- Users ---

    /// Inserts an account. A taken username is [`GuardianError::Conflict`].
    async fn create_user(&self, user: &NewUser) -> Result<User, GuardianError>;

    async fn get_user(&self, id: UserId) -> Result<Option<User>, GuardianError>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, GuardianError>;

    // --- Credentials ---

    /// All rows owned by `user`, oldest first.
    async fn list_credentials(&self, user: UserId) -> Result<Vec<Credential>, GuardianError>;

    async fn get_credential(&self, id: CredentialId) -> Result<Option<Credential>, GuardianError>;

    async fn create_credential(
        &self,
        user: UserId,
        credential: &NewCredential,
    ) -> Result<Credential, GuardianError>;

    /// Applies the present fields of `update`. Returns `None` if the row vanished.
    async fn update_credential(
        &self,
        id: CredentialId,
        update: &CredentialUpdate,
    ) -> Result<Option<Credential>, GuardianError>;

    /// Returns whether a row was deleted.
    async fn delete_credential(&self, id: CredentialId) -> Result<bool, GuardianError>;

    // --- Sessions ---

    async fn create_session(&self, session: &SessionRecord) -> Result<(), GuardianError>;

    async fn get_session(&self, token_hash: &str) -> Result<Option<SessionRecord>, GuardianError>;

    async fn delete_session(&self, token_hash: &str) -> Result<(), GuardianError>;

    /// Deletes sessions whose `expires_at` is before `now`. Returns the count removed.
    async fn purge_expired_sessions(&self, now: &str) -> Result<usize, GuardianError>;
}
