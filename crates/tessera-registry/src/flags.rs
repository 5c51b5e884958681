// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-organization feature flags that gate provider visibility.

use std::collections::BTreeSet;

use tessera_config::TesseraConfig;
use tessera_core::{IntegrationProvider, OrganizationId};

/// Name of the flag that unlocks a provider with `requires_feature_flag`.
pub fn provider_flag(key: &str) -> String {
    format!("integrations-{key}")
}

/// Feature flags and provider overrides for one organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationFlags {
    organization_id: OrganizationId,
    flags: BTreeSet<String>,
    disabled_providers: BTreeSet<String>,
}

impl OrganizationFlags {
    /// An organization with no flags and no overrides.
    pub fn new(organization_id: OrganizationId) -> Self {
        Self {
            organization_id,
            flags: BTreeSet::new(),
            disabled_providers: BTreeSet::new(),
        }
    }

    /// Flags for `organization_id` from the `[[organizations]]` config section.
    ///
    /// Organizations without an entry get no flags.
    pub fn from_config(config: &TesseraConfig, organization_id: OrganizationId) -> Self {
        let mut flags = Self::new(organization_id);
        if let Some(entry) = config.organization(&flags.organization_id.0) {
            flags.flags = entry.flags.iter().cloned().collect();
            flags.disabled_providers = entry.disabled_providers.iter().cloned().collect();
        }
        flags
    }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.insert(flag.into());
        self
    }

    pub fn with_disabled_provider(mut self, key: impl Into<String>) -> Self {
        self.disabled_providers.insert(key.into());
        self
    }

    pub fn organization_id(&self) -> &OrganizationId {
        &self.organization_id
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Whether the organization may see and add installations of `provider`.
    pub fn allows(&self, provider: &dyn IntegrationProvider) -> bool {
        let key = provider.key().as_str();
        if self.disabled_providers.contains(key) || !provider.can_add() {
            return false;
        }
        !provider.requires_feature_flag() || self.has_flag(&provider_flag(key))
    }
}
