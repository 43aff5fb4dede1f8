// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Guardian integration tests.
//!
//! [`TestHarness`] wires a temp SQLite database, the account and vault
//! services, and the HTTP router, and drives requests through the router
//! without binding a socket.

pub mod harness;

pub use harness::{TestHarness, TestHarnessBuilder, TestResponse};
