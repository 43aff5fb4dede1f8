// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Guardian - a personal credential vault.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod check;
mod generate;
mod serve;
mod shutdown;

use clap::{Parser, Subcommand};

/// Guardian - a personal credential vault.
#[derive(Parser, Debug)]
#[command(name = "guardian", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP API server.
    Serve,
    /// Generate a password or passcode.
    Generate {
        #[command(subcommand)]
        kind: Option<generate::GenerateKind>,
    },
    /// Report the strength of a password (prompted when omitted).
    Check {
        /// Password to check. Prefer the prompt: arguments end up in shell history.
        password: Option<String>,
    },
}

impl Commands {
    /// Whether the subcommand reads `guardian.toml` and the environment.
    fn needs_config(&self) -> bool {
        !matches!(self, Commands::Check { .. })
    }
}

/// Load and validate configuration, exiting with diagnostics on failure.
fn load_config() -> guardian_config::GuardianConfig {
    match guardian_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            guardian_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match &cli.command {
        Some(command) if command.needs_config() => load_config(),
        _ => guardian_config::GuardianConfig::default(),
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Generate { kind }) => generate::run_generate(&config, kind),
        Some(Commands::Check { password }) => check::run_check(password),
        None => {
            println!("guardian: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
