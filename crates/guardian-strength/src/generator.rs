// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Random password and passcode generation.
//!
//! Passwords get one character from every class, are padded from the union
//! alphabet, then shuffled. The RNG is a parameter so callers choose between
//! `rand::thread_rng()` and a seeded generator.

use std::ops::RangeInclusive;

use guardian_core::GuardianError;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";

/// Symbols drawn into generated passwords.
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Character classes every generated password must cover.
const CLASSES: [&[u8]; 4] = [UPPERCASE, LOWERCASE, DIGITS, SYMBOLS.as_bytes()];

/// Length of a generated password unless configured otherwise.
pub const DEFAULT_PASSWORD_LENGTH: usize = 12;

/// Shortest password that still has room for every class.
pub const MIN_PASSWORD_LENGTH: usize = CLASSES.len();

/// Longest password the generator will produce.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Length of a generated passcode unless configured otherwise.
pub const DEFAULT_PASSCODE_LENGTH: usize = 6;

/// Accepted passcode lengths.
pub const PASSCODE_LENGTHS: RangeInclusive<usize> = 4..=12;

/// What to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GeneratorKind {
    /// Mixed-class password.
    Password { length: usize },
    /// All-digit code.
    Passcode { length: usize },
}

impl GeneratorKind {
    /// Generate a value of this kind.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, GuardianError> {
        match *self {
            GeneratorKind::Password { length } => generate_password_with_length(rng, length),
            GeneratorKind::Passcode { length } => generate_passcode(rng, length),
        }
    }
}

impl Default for GeneratorKind {
    fn default() -> Self {
        GeneratorKind::Password {
            length: DEFAULT_PASSWORD_LENGTH,
        }
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, alphabet: &[u8]) -> u8 {
    alphabet[rng.gen_range(0..alphabet.len())]
}

/// Generate a [`DEFAULT_PASSWORD_LENGTH`]-character password.
pub fn generate_password<R: Rng + ?Sized>(rng: &mut R) -> String {
    build_password(rng, DEFAULT_PASSWORD_LENGTH)
}

/// Generate a password of `length` characters.
///
/// Lengths outside `MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH` are rejected.
pub fn generate_password_with_length<R: Rng + ?Sized>(
    rng: &mut R,
    length: usize,
) -> Result<String, GuardianError> {
    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
        return Err(GuardianError::Validation(format!(
            "password length must be between {} and {}, got {length}",
            MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
        )));
    }
    Ok(build_password(rng, length))
}

fn build_password<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    let union: Vec<u8> = CLASSES.concat();

    let mut bytes: Vec<u8> = CLASSES.iter().map(|class| pick(rng, class)).collect();
    while bytes.len() < length {
        bytes.push(pick(rng, &union));
    }
    bytes.shuffle(rng);

    debug!(length, "generated password");
    // Every alphabet is ASCII.
    bytes.into_iter().map(char::from).collect()
}

/// Generate an all-digit code of `length` digits.
///
/// Lengths outside [`PASSCODE_LENGTHS`] are rejected.
pub fn generate_passcode<R: Rng + ?Sized>(
    rng: &mut R,
    length: usize,
) -> Result<String, GuardianError> {
    if !PASSCODE_LENGTHS.contains(&length) {
        return Err(GuardianError::Validation(format!(
            "passcode length must be between {} and {}, got {length}",
            PASSCODE_LENGTHS.start(),
            PASSCODE_LENGTHS.end()
        )));
    }

    let code: String = (0..length).map(|_| char::from(pick(rng, DIGITS))).collect();
    debug!(length, "generated passcode");
    Ok(code)
}
