// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks constraints serde cannot express: addresses, paths, Argon2
//! parameter minimums, and generator length ranges.

use guardian_strength::generator::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, PASSCODE_LENGTHS};

use crate::diagnostic::ConfigError;
use crate::model::GuardianConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Upper bound on session lifetime: one hundred years.
pub const MAX_SESSION_TTL_HOURS: u32 = 24 * 365 * 100;

/// Validate a deserialized configuration.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &GuardianConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let host = config.server.host.trim();
    if host.is_empty() {
        fail("server.host must not be empty".to_string());
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
        if !is_valid_ip && !is_valid_hostname {
            fail(format!(
                "server.host `{host}` is not a valid IP address or hostname"
            ));
        }
    }

    if !LOG_LEVELS.contains(&config.server.log_level.as_str()) {
        fail(format!(
            "server.log_level must be one of {}, got `{}`",
            LOG_LEVELS.join(", "),
            config.server.log_level
        ));
    }

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    let auth = &config.auth;
    if auth.min_password_length == 0 {
        fail("auth.min_password_length must be at least 1".to_string());
    }
    if auth.session_ttl_hours == 0 {
        fail("auth.session_ttl_hours must be at least 1".to_string());
    } else if auth.session_ttl_hours > MAX_SESSION_TTL_HOURS {
        fail(format!(
            "auth.session_ttl_hours must be at most {MAX_SESSION_TTL_HOURS}, got {}",
            auth.session_ttl_hours
        ));
    }
    if auth.kdf_iterations < 1 {
        fail(format!(
            "auth.kdf_iterations must be at least 1, got {}",
            auth.kdf_iterations
        ));
    }
    if auth.kdf_parallelism < 1 {
        fail(format!(
            "auth.kdf_parallelism must be at least 1, got {}",
            auth.kdf_parallelism
        ));
    }
    // Argon2 requires at least 8 KiB of memory per lane.
    if auth.kdf_memory_cost < auth.kdf_parallelism.max(1).saturating_mul(8) {
        fail(format!(
            "auth.kdf_memory_cost must be at least 8 KiB per lane, got {}",
            auth.kdf_memory_cost
        ));
    }

    let generator = &config.generator;
    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&generator.password_length) {
        fail(format!(
            "generator.password_length must be between {} and {}, got {}",
            MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH, generator.password_length
        ));
    }
    if !PASSCODE_LENGTHS.contains(&generator.passcode_length) {
        fail(format!(
            "generator.passcode_length must be between {} and {}, got {}",
            PASSCODE_LENGTHS.start(),
            PASSCODE_LENGTHS.end(),
            generator.passcode_length
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(config: &GuardianConfig) -> Vec<String> {
        validate_config(config)
            .unwrap_err()
            .into_iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&GuardianConfig::default()).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = GuardianConfig::default();
        config.storage.database_path = "  ".to_string();
        assert!(messages(&config)
            .iter()
            .any(|m| m.contains("storage.database_path")));
    }

    #[test]
    fn bad_host_fails_validation() {
        let mut config = GuardianConfig::default();
        config.server.host = "local host!".to_string();
        assert!(messages(&config).iter().any(|m| m.contains("server.host")));
    }

    #[test]
    fn passcode_length_outside_range_fails() {
        let mut config = GuardianConfig::default();
        config.generator.passcode_length = 13;
        let errors = messages(&config);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("between 4 and 12"));
    }

    #[test]
    fn session_ttl_above_limit_fails() {
        let mut config = GuardianConfig::default();
        config.auth.session_ttl_hours = u32::MAX;
        let errors = messages(&config);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("auth.session_ttl_hours must be at most 876000"));

        config.auth.session_ttl_hours = MAX_SESSION_TTL_HOURS;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = GuardianConfig::default();
        config.server.log_level = "verbose".to_string();
        config.auth.session_ttl_hours = 0;
        config.generator.password_length = 2;
        assert_eq!(messages(&config).len(), 3);
    }

    #[test]
    fn ipv6_host_is_accepted() {
        let mut config = GuardianConfig::default();
        config.server.host = "::1".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
