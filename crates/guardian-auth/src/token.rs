// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Opaque bearer tokens.

use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Raw token length in bytes before hex encoding.
pub const TOKEN_BYTES: usize = 32;

/// A freshly minted token and the digest that gets stored.
pub struct SessionToken {
    pub token: String,
    pub digest: String,
}

impl SessionToken {
    /// Draw a new token from the OS random source.
    pub fn generate() -> Self {
        let mut raw = Zeroizing::new([0u8; TOKEN_BYTES]);
        rand::rngs::OsRng.fill_bytes(raw.as_mut());
        let token = hex::encode(raw.as_ref());
        let digest = hash_token(&token);
        Self { token, digest }
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionToken")
            .field("token", &"[REDACTED]")
            .field("digest", &self.digest)
            .finish()
    }
}

/// Hex SHA-256 of a presented token, the key sessions are stored under.
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
