// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON HTTP API for the Guardian credential vault.
//!
//! Account routes are public; everything under `/api/passwords` and
//! `/api/user` requires a bearer session token from `/api/login`.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;

pub use auth::AuthSession;
pub use error::ApiError;
pub use server::{build_router, start_server, GatewayState, ServerConfig};
