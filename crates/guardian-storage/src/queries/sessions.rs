// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Login session queries.

use guardian_core::{GuardianError, SessionRecord, UserId};
use rusqlite::{params, OptionalExtension};

use crate::database::{map_tr_err, Database};

/// Store a new session.
pub async fn create_session(db: &Database, session: &SessionRecord) -> Result<(), GuardianError> {
    let session = session.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO sessions (token_hash, user_id, created_at, expires_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    session.token_hash,
                    session.user_id.0,
                    session.created_at,
                    session.expires_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Look a session up by token digest. Expiry is checked by the caller.
pub async fn get_session(
    db: &Database,
    token_hash: &str,
) -> Result<Option<SessionRecord>, GuardianError> {
    let token_hash = token_hash.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT token_hash, user_id, created_at, expires_at
                 FROM sessions WHERE token_hash = ?1",
                params![token_hash],
                |row| {
                    Ok(SessionRecord {
                        token_hash: row.get(0)?,
                        user_id: UserId(row.get(1)?),
                        created_at: row.get(2)?,
                        expires_at: row.get(3)?,
                    })
                },
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Delete a session. Deleting an unknown token is not an error.
pub async fn delete_session(db: &Database, token_hash: &str) -> Result<(), GuardianError> {
    let token_hash = token_hash.to_string();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute("DELETE FROM sessions WHERE token_hash = ?1", params![token_hash])?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Delete every session that expired at or before `now`.
pub async fn purge_expired_sessions(db: &Database, now: &str) -> Result<usize, GuardianError> {
    let now = now.to_string();
    db.connection()
        .call(move |conn| conn.execute("DELETE FROM sessions WHERE expires_at <= ?1", params![now]))
        .await
        .map_err(map_tr_err)
}
