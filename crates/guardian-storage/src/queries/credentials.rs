// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential CRUD operations.
//!
//! These queries do not check ownership; the service layer compares the
//! row's `user_id` with the session user first.

use guardian_core::types::format_timestamp;
use guardian_core::{
    Credential, CredentialId, CredentialUpdate, GuardianError, NewCredential, UserId,
};
use rusqlite::{params, OptionalExtension};

use crate::database::{map_tr_err, Database};

const SELECT_COLUMNS: &str =
    "SELECT id, user_id, title, username, password, category, created_at FROM credentials";

fn row_to_credential(row: &rusqlite::Row<'_>) -> rusqlite::Result<Credential> {
    Ok(Credential {
        id: CredentialId(row.get(0)?),
        user_id: UserId(row.get(1)?),
        title: row.get(2)?,
        username: row.get(3)?,
        password: row.get(4)?,
        category: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn select_by_id(conn: &rusqlite::Connection, id: i64) -> rusqlite::Result<Option<Credential>> {
    conn.query_row(
        &format!("{SELECT_COLUMNS} WHERE id = ?1"),
        params![id],
        row_to_credential,
    )
    .optional()
}

/// All credentials owned by `user`, in insertion order.
pub async fn list_credentials(
    db: &Database,
    user: UserId,
) -> Result<Vec<Credential>, GuardianError> {
    db.connection()
        .call(move |conn| -> Result<Vec<Credential>, rusqlite::Error> {
            let sql = format!("{SELECT_COLUMNS} WHERE user_id = ?1 ORDER BY id");
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![user.0], row_to_credential)?;
            let mut credentials = Vec::new();
            for row in rows {
                credentials.push(row?);
            }
            Ok(credentials)
        })
        .await
        .map_err(map_tr_err)
}

/// Get a credential by id, regardless of owner.
pub async fn get_credential(
    db: &Database,
    id: CredentialId,
) -> Result<Option<Credential>, GuardianError> {
    db.connection()
        .call(move |conn| select_by_id(conn, id.0))
        .await
        .map_err(map_tr_err)
}

/// Insert a credential owned by `user`.
pub async fn create_credential(
    db: &Database,
    user: UserId,
    credential: &NewCredential,
) -> Result<Credential, GuardianError> {
    let new = credential.clone();
    let created_at = format_timestamp(chrono::Utc::now());
    db.connection()
        .call(move |conn| -> Result<Credential, rusqlite::Error> {
            conn.execute(
                "INSERT INTO credentials (user_id, title, username, password, category, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![user.0, new.title, new.username, new.password, new.category, created_at],
            )?;
            Ok(Credential {
                id: CredentialId(conn.last_insert_rowid()),
                user_id: user,
                title: new.title,
                username: new.username,
                password: new.password,
                category: new.category,
                created_at,
            })
        })
        .await
        .map_err(map_tr_err)
}

/// Apply the present fields of `update` and return the new row.
///
/// Absent fields bind as NULL and `COALESCE` keeps the current value.
pub async fn update_credential(
    db: &Database,
    id: CredentialId,
    update: &CredentialUpdate,
) -> Result<Option<Credential>, GuardianError> {
    let update = update.clone();
    db.connection()
        .call(move |conn| -> Result<Option<Credential>, rusqlite::Error> {
            let tx = conn.transaction()?;
            let changed = tx.execute(
                "UPDATE credentials SET
                     title = COALESCE(?1, title),
                     username = COALESCE(?2, username),
                     password = COALESCE(?3, password),
                     category = COALESCE(?4, category)
                 WHERE id = ?5",
                params![update.title, update.username, update.password, update.category, id.0],
            )?;
            let row = if changed == 0 {
                None
            } else {
                select_by_id(&tx, id.0)?
            };
            tx.commit()?;
            Ok(row)
        })
        .await
        .map_err(map_tr_err)
}

/// Delete a credential. Returns whether a row was removed.
pub async fn delete_credential(db: &Database, id: CredentialId) -> Result<bool, GuardianError> {
    db.connection()
        .call(move |conn| -> Result<bool, rusqlite::Error> {
            let changed = conn.execute("DELETE FROM credentials WHERE id = ?1", params![id.0])?;
            Ok(changed > 0)
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::test_support::{make_user, setup_db};

    fn new_credential(title: &str, password: &str, category: &str) -> NewCredential {
        NewCredential {
            title: title.to_string(),
            username: format!("{}@example.com", title.to_lowercase()),
            password: password.to_string(),
            category: category.to_string(),
        }
    }

    #[tokio::test]
    async fn create_and_get_credential_roundtrips() {
        let (db, _dir) = setup_db().await;
        let alice = make_user(&db, "alice").await;

        let row = new_credential("Mail", "Secr3t!pw", "website");
        let created = create_credential(&db, alice.id, &row).await.unwrap();
        assert_eq!(created.user_id, alice.id);

        let fetched = get_credential(&db, created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn list_returns_only_owned_rows_in_order() {
        let (db, _dir) = setup_db().await;
        let alice = make_user(&db, "alice").await;
        let bob = make_user(&db, "bob").await;

        create_credential(&db, alice.id, &new_credential("A1", "x", "website")).await.unwrap();
        create_credential(&db, bob.id, &new_credential("B1", "y", "document")).await.unwrap();
        create_credential(&db, alice.id, &new_credential("A2", "z", "other")).await.unwrap();

        let rows = list_credentials(&db, alice.id).await.unwrap();
        let titles: Vec<_> = rows.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["A1", "A2"]);
        assert!(rows.iter().all(|c| c.user_id == alice.id));
    }

    #[tokio::test]
    async fn partial_update_keeps_other_columns() {
        let (db, _dir) = setup_db().await;
        let alice = make_user(&db, "alice").await;
        let created = create_credential(&db, alice.id, &new_credential("Mail", "old", "website"))
            .await
            .unwrap();

        let patch = CredentialUpdate {
            password: Some("N3w!password".into()),
            ..CredentialUpdate::default()
        };
        let updated = update_credential(&db, created.id, &patch).await.unwrap().unwrap();
        assert_eq!(updated.password, "N3w!password");
        assert_eq!(updated.title, "Mail");
        assert_eq!(updated.category, "website");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn update_missing_row_is_none() {
        let (db, _dir) = setup_db().await;
        let patch = CredentialUpdate {
            title: Some("x".into()),
            ..CredentialUpdate::default()
        };
        assert!(update_credential(&db, CredentialId(77), &patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_went_away() {
        let (db, _dir) = setup_db().await;
        let alice = make_user(&db, "alice").await;
        let created = create_credential(&db, alice.id, &new_credential("Mail", "pw", "website"))
            .await
            .unwrap();

        assert!(delete_credential(&db, created.id).await.unwrap());
        assert!(!delete_credential(&db, created.id).await.unwrap());
        assert!(get_credential(&db, created.id).await.unwrap().is_none());
    }
}
