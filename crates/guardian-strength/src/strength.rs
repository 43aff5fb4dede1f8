// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Regex-based character-class strength predicate.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Character class a password needs one member of to count as having a symbol.
///
/// `+-=` is a range from `+` to `=`, so `, - . /`, the digits and `: ; <`
/// all match. `|`, `~`, space and quotes do not.
pub const SYMBOL_CLASS: &str = r"[!@#$%^&*()_+-=\[\]{};:,.<>?]";

/// Minimum length, in characters, of a strong password.
pub const MIN_STRONG_LENGTH: usize = 8;

static UPPER: LazyLock<Regex> = LazyLock::new(|| Regex::new("[A-Z]").unwrap());
static LOWER: LazyLock<Regex> = LazyLock::new(|| Regex::new("[a-z]").unwrap());
static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new("[0-9]").unwrap());
static SYMBOL: LazyLock<Regex> = LazyLock::new(|| Regex::new(SYMBOL_CLASS).unwrap());

/// Strong/weak classification of a single password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Strong,
    Weak,
}

/// Outcome of each individual check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrengthReport {
    pub has_upper: bool,
    pub has_lower: bool,
    pub has_digit: bool,
    pub has_symbol: bool,
    pub long_enough: bool,
}

impl StrengthReport {
    /// Strong only when every check passed.
    pub fn strength(&self) -> Strength {
        if self.has_upper && self.has_lower && self.has_digit && self.has_symbol && self.long_enough
        {
            Strength::Strong
        } else {
            Strength::Weak
        }
    }

    /// Names of the checks that failed, in a fixed order.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.long_enough {
            missing.push("length");
        }
        if !self.has_upper {
            missing.push("uppercase");
        }
        if !self.has_lower {
            missing.push("lowercase");
        }
        if !self.has_digit {
            missing.push("digit");
        }
        if !self.has_symbol {
            missing.push("symbol");
        }
        missing
    }
}

/// Run every check against `password`.
pub fn check(password: &str) -> StrengthReport {
    StrengthReport {
        has_upper: UPPER.is_match(password),
        has_lower: LOWER.is_match(password),
        has_digit: DIGIT.is_match(password),
        has_symbol: SYMBOL.is_match(password),
        long_enough: password.chars().count() >= MIN_STRONG_LENGTH,
    }
}

/// Classify `password` as strong or weak.
pub fn classify(password: &str) -> Strength {
    check(password).strength()
}

/// True iff `password` is at least eight characters and contains an
/// upper-case letter, a lower-case letter, a digit, and a member of
/// [`SYMBOL_CLASS`].
pub fn is_strong(password: &str) -> bool {
    classify(password) == Strength::Strong
}
