// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password strength classification and credential generation.
//!
//! A password is strong when it is at least eight characters long and mixes
//! upper-case, lower-case, digit, and symbol characters. The generators
//! produce passwords that always satisfy that rule and all-digit passcodes.

pub mod generator;
pub mod strength;

pub use generator::{
    generate_passcode, generate_password, generate_password_with_length, GeneratorKind,
    DEFAULT_PASSCODE_LENGTH, DEFAULT_PASSWORD_LENGTH,
};
pub use strength::{check, classify, is_strong, Strength, StrengthReport, SYMBOL_CLASS};
