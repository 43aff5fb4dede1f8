// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `guardian generate`: print a fresh password or passcode.

use clap::Subcommand;
use guardian_config::GuardianConfig;
use guardian_core::GuardianError;
use guardian_strength::GeneratorKind;

#[derive(Subcommand, Debug)]
pub enum GenerateKind {
    /// Mixed-class password (the default).
    Password {
        #[arg(short, long)]
        length: Option<usize>,
    },
    /// All-digit passcode, 4 to 12 digits.
    Passcode {
        #[arg(short, long)]
        length: Option<usize>,
    },
}

/// Resolve the requested kind against configured default lengths.
pub fn resolve(config: &GuardianConfig, kind: Option<GenerateKind>) -> GeneratorKind {
    match kind {
        None => GeneratorKind::Password {
            length: config.generator.password_length,
        },
        Some(GenerateKind::Password { length }) => GeneratorKind::Password {
            length: length.unwrap_or(config.generator.password_length),
        },
        Some(GenerateKind::Passcode { length }) => GeneratorKind::Passcode {
            length: length.unwrap_or(config.generator.passcode_length),
        },
    }
}

pub fn run_generate(
    config: &GuardianConfig,
    kind: Option<GenerateKind>,
) -> Result<(), GuardianError> {
    let value = resolve(config, kind).generate(&mut rand::thread_rng())?;
    println!("{value}");
    Ok(())
}
