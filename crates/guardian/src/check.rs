// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `guardian check`: report which strength checks a password passes.

use guardian_core::GuardianError;
use guardian_strength::{Strength, StrengthReport};
use secrecy::{ExposeSecret, SecretString};

/// Take the password from the argument, or prompt for it on a TTY.
fn acquire(password: Option<String>) -> Result<SecretString, GuardianError> {
    if let Some(password) = password {
        return Ok(SecretString::from(password));
    }
    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        let password = rpassword::prompt_password("Password to check: ")
            .map_err(|e| GuardianError::Internal(format!("failed to read password: {e}")))?;
        return Ok(SecretString::from(password));
    }
    Err(GuardianError::Validation(
        "no password given; pass one as an argument or run interactively".to_string(),
    ))
}

/// Human-readable summary of a report.
pub fn describe(report: &StrengthReport) -> String {
    match report.strength() {
        Strength::Strong => "strong".to_string(),
        Strength::Weak => format!("weak (missing: {})", report.missing().join(", ")),
    }
}

pub fn run_check(password: Option<String>) -> Result<(), GuardianError> {
    let password = acquire(password)?;
    let report = guardian_strength::check(password.expose_secret());
    println!("{}", describe(&report));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_password_is_described_as_strong() {
        assert_eq!(describe(&guardian_strength::check("Tr0ub4dor&3")), "strong");
    }

    #[test]
    fn weak_password_lists_missing_checks() {
        let text = describe(&guardian_strength::check("password"));
        assert!(text.starts_with("weak (missing: "), "{text}");
        assert!(text.contains("uppercase"), "{text}");
        assert!(text.contains("digit"), "{text}");
    }

    #[test]
    fn argument_wins_over_prompt() {
        let secret = acquire(Some("given".into())).unwrap();
        assert_eq!(secret.expose_secret(), "given");
    }
}
