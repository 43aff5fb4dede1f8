// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Derived views over one user's credentials.

use std::collections::HashMap;

use guardian_core::Credential;
use guardian_strength::is_strong;

/// Which subset of the vault to show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CredentialFilter {
    #[default]
    All,
    Strong,
    Weak,
    /// Rows whose secret value appears in more than one row.
    Duplicate,
    /// Rows whose category equals the given name exactly.
    Category(String),
}

impl CredentialFilter {
    /// Build a filter from the `filter` and `value` query parameters.
    ///
    /// Missing or unrecognized names fall back to [`CredentialFilter::All`],
    /// as does `category` without a value.
    pub fn from_query(filter: Option<&str>, value: Option<&str>) -> Self {
        match filter {
            Some("strong") => Self::Strong,
            Some("weak") => Self::Weak,
            Some("duplicate") => Self::Duplicate,
            Some("category") => match value {
                Some(v) if !v.is_empty() => Self::Category(v.to_string()),
                _ => Self::All,
            },
            _ => Self::All,
        }
    }

    /// Keep the rows matching this filter, preserving order.
    pub fn apply(&self, credentials: Vec<Credential>) -> Vec<Credential> {
        match self {
            Self::All => credentials,
            Self::Strong => credentials
                .into_iter()
                .filter(|c| is_strong(&c.password))
                .collect(),
            Self::Weak => credentials
                .into_iter()
                .filter(|c| !is_strong(&c.password))
                .collect(),
            Self::Duplicate => {
                let keep: Vec<bool> = {
                    let counts = secret_counts(&credentials);
                    credentials
                        .iter()
                        .map(|c| counts.get(c.password.as_str()).copied().unwrap_or(0) > 1)
                        .collect()
                };
                credentials
                    .into_iter()
                    .zip(keep)
                    .filter_map(|(c, keep)| keep.then_some(c))
                    .collect()
            }
            Self::Category(name) => credentials
                .into_iter()
                .filter(|c| &c.category == name)
                .collect(),
        }
    }

    /// Heading shown above the filtered list.
    pub fn title(&self) -> String {
        match self {
            Self::All => "All Passwords".to_string(),
            Self::Strong => "Strong Passwords".to_string(),
            Self::Weak => "Weak Passwords".to_string(),
            Self::Duplicate => "Duplicate Passwords".to_string(),
            Self::Category(name) => format!("{} Passwords", capitalize(name)),
        }
    }
}

/// Case-insensitive substring match on title, username, or category.
///
/// A blank term keeps everything.
pub fn search(credentials: Vec<Credential>, term: &str) -> Vec<Credential> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return credentials;
    }
    credentials
        .into_iter()
        .filter(|c| {
            c.title.to_lowercase().contains(&term)
                || c.username.to_lowercase().contains(&term)
                || c.category.to_lowercase().contains(&term)
        })
        .collect()
}

/// Occurrences of each secret value.
pub(crate) fn secret_counts(credentials: &[Credential]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for c in credentials {
        *counts.entry(c.password.as_str()).or_insert(0) += 1;
    }
    counts
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
