// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User account queries.

use guardian_core::types::format_timestamp;
use guardian_core::{GuardianError, NewUser, User, UserId};
use rusqlite::{params, ErrorCode, OptionalExtension};

use crate::database::{map_tr_err, Database};

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: UserId(row.get(0)?),
        username: row.get(1)?,
        password_hash: row.get(2)?,
        created_at: row.get(3)?,
    })
}

/// Insert a user. A taken username is [`GuardianError::Conflict`].
pub async fn create_user(db: &Database, user: &NewUser) -> Result<User, GuardianError> {
    let user = user.clone();
    let created_at = format_timestamp(chrono::Utc::now());
    let username = user.username.clone();

    let inserted = db
        .connection()
        .call(move |conn| -> Result<Option<User>, rusqlite::Error> {
            let result = conn.execute(
                "INSERT INTO users (username, password_hash, created_at) VALUES (?1, ?2, ?3)",
                params![user.username, user.password_hash, created_at],
            );
            match result {
                Ok(_) => Ok(Some(User {
                    id: UserId(conn.last_insert_rowid()),
                    username: user.username,
                    password_hash: user.password_hash,
                    created_at,
                })),
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == ErrorCode::ConstraintViolation =>
                {
                    Ok(None)
                }
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)?;

    inserted.ok_or_else(|| GuardianError::Conflict(format!("username `{username}` is taken")))
}

/// Get a user by id.
pub async fn get_user(db: &Database, id: UserId) -> Result<Option<User>, GuardianError> {
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT id, username, password_hash, created_at FROM users WHERE id = ?1",
                params![id.0],
                row_to_user,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Get a user by exact username.
pub async fn get_user_by_username(
    db: &Database,
    username: &str,
) -> Result<Option<User>, GuardianError> {
    let username = username.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT id, username, password_hash, created_at FROM users WHERE username = ?1",
                params![username],
                row_to_user,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}
