// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential vault operations for the Guardian credential vault.
//!
//! [`VaultService`] is the only path to a user's rows: every read and write
//! goes through an ownership check against the session user. The filter and
//! statistics modules are pure functions over an already-loaded list.

pub mod filter;
pub mod service;
pub mod stats;

pub use filter::{search, CredentialFilter};
pub use service::{CredentialView, VaultService};
pub use stats::VaultStats;
