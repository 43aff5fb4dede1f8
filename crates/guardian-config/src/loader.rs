// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `/etc/guardian/guardian.toml`, then
//! `~/.config/guardian/guardian.toml`, then `./guardian.toml`, with
//! `GUARDIAN_` environment variables applied last.

// figment::Error is external and cannot be boxed without a wrapper.
#![allow(clippy::result_large_err)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::GuardianConfig;

/// Top-level sections, used to split `GUARDIAN_<SECTION>_<KEY>` variables.
const SECTIONS: &[&str] = &["server", "storage", "auth", "generator"];

/// Config files in merge order (later overrides earlier).
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/guardian/guardian.toml")];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("guardian").join("guardian.toml"));
    }
    paths.push(PathBuf::from("guardian.toml"));
    paths
}

/// Build the Figment for the standard hierarchy without extracting it.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(GuardianConfig::default()));
    for path in search_paths() {
        if path.exists() {
            tracing::debug!(path = %path.display(), "merging config file");
        }
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(env_provider())
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<GuardianConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<GuardianConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GuardianConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<GuardianConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GuardianConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Environment provider mapping `GUARDIAN_AUTH_SESSION_TTL_HOURS` to
/// `auth.session_ttl_hours`.
///
/// Only the section prefix is split off; `Env::split("_")` would break keys
/// that themselves contain underscores.
fn env_provider() -> Env {
    Env::prefixed("GUARDIAN_").map(|key| map_env_key(&key.as_str().to_ascii_lowercase()).into())
}

fn map_env_key(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_split_on_section_only() {
        assert_eq!(
            map_env_key("auth_session_ttl_hours"),
            "auth.session_ttl_hours"
        );
        assert_eq!(
            map_env_key("storage_database_path"),
            "storage.database_path"
        );
        assert_eq!(map_env_key("server_port"), "server.port");
        assert_eq!(map_env_key("unknown_key"), "unknown_key");
    }

    #[test]
    fn local_file_is_merged_last() {
        let paths = search_paths();
        assert_eq!(paths.first().unwrap(), Path::new("/etc/guardian/guardian.toml"));
        assert_eq!(paths.last().unwrap(), Path::new("guardian.toml"));
    }
}
