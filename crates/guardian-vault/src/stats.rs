// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dashboard counters.

use std::collections::BTreeMap;

use guardian_core::{Category, Credential};
use guardian_strength::is_strong;
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::filter::secret_counts;

/// Aggregate counts over one user's vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaultStats {
    pub total: usize,
    pub strong: usize,
    pub weak: usize,
    /// Rows beyond the first for each repeated secret value.
    pub duplicates: usize,
    /// Rows per category. The four well-known categories are always present.
    pub categories: BTreeMap<String, usize>,
}

impl VaultStats {
    pub fn from_credentials(credentials: &[Credential]) -> Self {
        let total = credentials.len();
        let strong = credentials.iter().filter(|c| is_strong(&c.password)).count();
        let duplicates = total - secret_counts(credentials).len();

        let mut categories: BTreeMap<String, usize> =
            Category::iter().map(|c| (c.to_string(), 0)).collect();
        for c in credentials {
            *categories.entry(c.category.clone()).or_insert(0) += 1;
        }

        Self {
            total,
            strong,
            weak: total - strong,
            duplicates,
            categories,
        }
    }
}
