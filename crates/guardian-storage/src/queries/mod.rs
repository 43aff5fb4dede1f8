// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for CRUD operations on storage entities.

pub mod credentials;
pub mod sessions;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support {
    use guardian_core::{NewUser, User};
    use tempfile::TempDir;

    use crate::database::Database;

    pub async fn setup_db() -> (Database, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        (db, dir)
    }

    pub async fn make_user(db: &Database, username: &str) -> User {
        let new = NewUser {
            username: username.to_string(),
            password_hash: "$argon2id$v=19$placeholder".to_string(),
        };
        super::users::create_user(db, &new).await.unwrap()
    }
}
