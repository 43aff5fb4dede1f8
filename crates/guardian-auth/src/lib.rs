// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Accounts and login sessions for the Guardian credential vault.
//!
//! Account passwords are stored as Argon2id PHC strings. A login hands out a
//! random bearer token exactly once; storage only ever sees its SHA-256
//! digest.

pub mod password;
pub mod service;
pub mod token;

pub use password::{hash_password, verify_password};
pub use service::{AccountService, Session};
pub use token::{hash_token, SessionToken};
