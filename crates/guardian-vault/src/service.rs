// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ownership-checked credential operations.
//!
//! A row that does not exist and a row owned by someone else both surface as
//! [`GuardianError::NotFound`], so ids are never confirmed across accounts.

use std::sync::Arc;

use guardian_core::{
    Credential, CredentialId, CredentialUpdate, GuardianError, NewCredential, StorageAdapter,
    UserId,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::filter::{search, CredentialFilter};
use crate::stats::VaultStats;

/// A filtered, searched list with its heading.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialView {
    pub title: String,
    pub credentials: Vec<Credential>,
}

/// Credential CRUD scoped to the calling user.
#[derive(Clone)]
pub struct VaultService {
    storage: Arc<dyn StorageAdapter>,
}

impl VaultService {
    pub fn new(storage: Arc<dyn StorageAdapter>) -> Self {
        Self { storage }
    }

    /// Every row owned by `user`, oldest first.
    pub async fn list(&self, user: UserId) -> Result<Vec<Credential>, GuardianError> {
        self.storage.list_credentials(user).await
    }

    /// Apply `filter`, then `term`, to the user's rows.
    pub async fn view(
        &self,
        user: UserId,
        filter: &CredentialFilter,
        term: Option<&str>,
    ) -> Result<CredentialView, GuardianError> {
        let rows = filter.apply(self.list(user).await?);
        let credentials = match term {
            Some(term) => search(rows, term),
            None => rows,
        };
        debug!(user_id = %user, ?filter, count = credentials.len(), "credential view");
        Ok(CredentialView {
            title: filter.title(),
            credentials,
        })
    }

    pub async fn stats(&self, user: UserId) -> Result<VaultStats, GuardianError> {
        Ok(VaultStats::from_credentials(&self.list(user).await?))
    }

    /// Fetch one row, checking ownership.
    pub async fn get(&self, user: UserId, id: CredentialId) -> Result<Credential, GuardianError> {
        match self.storage.get_credential(id).await? {
            Some(row) if row.is_owned_by(user) => Ok(row),
            Some(_) => {
                warn!(user_id = %user, credential_id = %id, "access to foreign credential denied");
                Err(GuardianError::NotFound)
            }
            None => Err(GuardianError::NotFound),
        }
    }

    /// Store a new row owned by `user`.
    ///
    /// Title, username, and category are trimmed; the secret is stored as
    /// given. All four must be non-blank.
    pub async fn create(
        &self,
        user: UserId,
        credential: NewCredential,
    ) -> Result<Credential, GuardianError> {
        require("title", &credential.title)?;
        require("username", &credential.username)?;
        require("password", &credential.password)?;
        require("category", &credential.category)?;

        let new = NewCredential {
            title: credential.title.trim().to_string(),
            username: credential.username.trim().to_string(),
            password: credential.password,
            category: credential.category.trim().to_string(),
        };
        let row = self.storage.create_credential(user, &new).await?;
        info!(
            user_id = %user,
            credential_id = %row.id,
            category = %row.category,
            "credential created"
        );
        Ok(row)
    }

    /// Change the fields present in `update`.
    pub async fn update(
        &self,
        user: UserId,
        id: CredentialId,
        update: CredentialUpdate,
    ) -> Result<Credential, GuardianError> {
        if update.is_empty() {
            return Err(GuardianError::Validation("nothing to update".into()));
        }
        for (field, value) in [
            ("title", &update.title),
            ("username", &update.username),
            ("password", &update.password),
            ("category", &update.category),
        ] {
            if let Some(value) = value {
                require(field, value)?;
            }
        }
        let update = CredentialUpdate {
            title: update.title.map(|s| s.trim().to_string()),
            username: update.username.map(|s| s.trim().to_string()),
            password: update.password,
            category: update.category.map(|s| s.trim().to_string()),
        };

        self.get(user, id).await?;
        let row = self
            .storage
            .update_credential(id, &update)
            .await?
            .ok_or(GuardianError::NotFound)?;
        info!(user_id = %user, credential_id = %id, "credential updated");
        Ok(row)
    }

    pub async fn delete(&self, user: UserId, id: CredentialId) -> Result<(), GuardianError> {
        self.get(user, id).await?;
        if !self.storage.delete_credential(id).await? {
            return Err(GuardianError::NotFound);
        }
        info!(user_id = %user, credential_id = %id, "credential deleted");
        Ok(())
    }
}

fn require(field: &str, value: &str) -> Result<(), GuardianError> {
    if value.trim().is_empty() {
        return Err(GuardianError::Validation(format!("{field} is required")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use guardian_config::model::StorageConfig;
    use guardian_core::{NewUser, User};
    use guardian_storage::SqliteStorage;
    use tempfile::TempDir;
    use tracing_test::traced_test;

    use super::*;

    struct Fixture {
        vault: VaultService,
        alice: User,
        bob: User,
        _dir: TempDir,
    }

    async fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(SqliteStorage::new(StorageConfig {
            database_path: dir.path().join("vault.db").to_string_lossy().into_owned(),
            wal_mode: true,
        }));
        storage.initialize().await.unwrap();
        let mut users = Vec::new();
        for name in ["alice", "bob"] {
            let user = storage
                .create_user(&NewUser {
                    username: name.into(),
                    password_hash: "hash".into(),
                })
                .await
                .unwrap();
            users.push(user);
        }
        let bob = users.pop().unwrap();
        let alice = users.pop().unwrap();
        Fixture {
            vault: VaultService::new(storage),
            alice,
            bob,
            _dir: dir,
        }
    }

    fn new_cred(title: &str, password: &str, category: &str) -> NewCredential {
        NewCredential {
            title: title.into(),
            username: "me@mail.test".into(),
            password: password.into(),
            category: category.into(),
        }
    }

    #[tokio::test]
    async fn create_trims_and_assigns_owner() {
        let f = fixture().await;
        let row = f
            .vault
            .create(f.alice.id, new_cred("  Mail ", " Sp4ce! pw ", "website "))
            .await
            .unwrap();
        assert_eq!(row.user_id, f.alice.id);
        assert_eq!(row.title, "Mail");
        assert_eq!(row.category, "website");
        assert_eq!(row.password, " Sp4ce! pw ");
    }

    #[tokio::test]
    async fn create_rejects_blank_fields() {
        let f = fixture().await;
        let err = f
            .vault
            .create(f.alice.id, new_cred("Mail", "   ", "website"))
            .await
            .unwrap_err();
        assert!(matches!(err, GuardianError::Validation(msg) if msg == "password is required"));
        assert!(f.vault.list(f.alice.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rows_are_private_to_their_owner() {
        let f = fixture().await;
        let row = f
            .vault
            .create(f.alice.id, new_cred("Mail", "pw", "website"))
            .await
            .unwrap();

        assert!(f.vault.list(f.bob.id).await.unwrap().is_empty());
        assert!(matches!(f.vault.get(f.bob.id, row.id).await, Err(GuardianError::NotFound)));

        let patch = CredentialUpdate {
            title: Some("Hijacked".into()),
            ..CredentialUpdate::default()
        };
        assert!(matches!(
            f.vault.update(f.bob.id, row.id, patch).await,
            Err(GuardianError::NotFound)
        ));
        assert!(matches!(
            f.vault.delete(f.bob.id, row.id).await,
            Err(GuardianError::NotFound)
        ));
        assert_eq!(f.vault.get(f.alice.id, row.id).await.unwrap().title, "Mail");
    }

    #[tokio::test]
    async fn missing_row_is_not_found() {
        let f = fixture().await;
        assert!(matches!(
            f.vault.delete(f.alice.id, CredentialId(404)).await,
            Err(GuardianError::NotFound)
        ));
    }

    #[tokio::test]
    async fn update_validates_patch() {
        let f = fixture().await;
        let row = f
            .vault
            .create(f.alice.id, new_cred("Mail", "pw", "website"))
            .await
            .unwrap();

        assert!(matches!(
            f.vault.update(f.alice.id, row.id, CredentialUpdate::default()).await,
            Err(GuardianError::Validation(_))
        ));
        let blank = CredentialUpdate {
            category: Some(" ".into()),
            ..CredentialUpdate::default()
        };
        assert!(matches!(
            f.vault.update(f.alice.id, row.id, blank).await,
            Err(GuardianError::Validation(_))
        ));

        let patch = CredentialUpdate {
            password: Some("N3w!Secret".into()),
            ..CredentialUpdate::default()
        };
        let updated = f.vault.update(f.alice.id, row.id, patch).await.unwrap();
        assert_eq!(updated.password, "N3w!Secret");
        assert_eq!(updated.title, "Mail");
    }

    #[tokio::test]
    async fn view_filters_then_searches() {
        let f = fixture().await;
        for (title, pw, cat) in [
            ("GitHub", "Str0ng!Pass", "website"),
            ("Bank", "weak", "website"),
            ("Diary", "weak", "document"),
        ] {
            f.vault.create(f.alice.id, new_cred(title, pw, cat)).await.unwrap();
        }

        let weak = f
            .vault
            .view(f.alice.id, &CredentialFilter::Weak, Some("bank"))
            .await
            .unwrap();
        assert_eq!(weak.title, "Weak Passwords");
        assert_eq!(weak.credentials.len(), 1);
        assert_eq!(weak.credentials[0].title, "Bank");

        let dupes = f
            .vault
            .view(f.alice.id, &CredentialFilter::Duplicate, None)
            .await
            .unwrap();
        assert_eq!(dupes.credentials.len(), 2);

        let stats = f.vault.stats(f.alice.id).await.unwrap();
        assert_eq!((stats.total, stats.strong, stats.weak, stats.duplicates), (3, 1, 2, 1));
        assert_eq!(f.vault.stats(f.bob.id).await.unwrap().total, 0);
    }

    #[tokio::test]
    #[traced_test]
    async fn foreign_access_is_logged_without_secret() {
        let f = fixture().await;
        let row = f
            .vault
            .create(f.alice.id, new_cred("Mail", "T0p$ecret!", "website"))
            .await
            .unwrap();
        let _ = f.vault.get(f.bob.id, row.id).await;

        assert!(logs_contain("access to foreign credential denied"));
        assert!(logs_contain("credential created"));
        assert!(!logs_contain("T0p$ecret!"));
    }
}
