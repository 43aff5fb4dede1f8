// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `guardian serve`: open storage, wire services, and run the API.

use std::sync::Arc;

use guardian_auth::AccountService;
use guardian_config::GuardianConfig;
use guardian_core::{GuardianError, StorageAdapter};
use guardian_gateway::{start_server, GatewayState, ServerConfig};
use guardian_storage::SqliteStorage;
use guardian_vault::VaultService;
use tracing::{info, warn};

use crate::shutdown;

/// Run the server until SIGINT or SIGTERM.
pub async fn run_serve(config: GuardianConfig) -> Result<(), GuardianError> {
    init_tracing(&config.server.log_level);
    info!(version = env!("CARGO_PKG_VERSION"), "starting guardian");

    let storage = SqliteStorage::new(config.storage.clone());
    storage.initialize().await?;
    let storage: Arc<dyn StorageAdapter> = Arc::new(storage);
    info!(path = %config.storage.database_path, "storage ready");

    let accounts = AccountService::new(storage.clone(), config.auth.clone());
    if let Err(e) = accounts.purge_expired().await {
        warn!(error = %e, "failed to purge expired sessions");
    }
    let vault = VaultService::new(storage.clone());

    let state = GatewayState {
        accounts,
        vault,
        storage: storage.clone(),
        generator: config.generator.clone(),
        start_time: std::time::Instant::now(),
    };
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    let cancel = shutdown::install_signal_handler();
    let result = start_server(&server_config, state, cancel).await;

    if let Err(e) = storage.close().await {
        warn!(error = %e, "storage close failed");
    }
    info!("guardian stopped");
    result
}

/// Initializes the tracing subscriber with the given log level.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("guardian={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
