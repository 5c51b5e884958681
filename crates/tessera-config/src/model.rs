// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Tessera integration registry.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Tessera configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TesseraConfig {
    /// Provider registry settings.
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Analytics sink settings.
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Per-organization feature flags and provider overrides.
    #[serde(default)]
    pub organizations: Vec<OrganizationEntry>,
}

impl TesseraConfig {
    /// Look up the `[[organizations]]` entry for an organization id.
    pub fn organization(&self, id: &str) -> Option<&OrganizationEntry> {
        self.organizations.iter().find(|o| o.id == id)
    }
}

/// Provider registry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Provider keys that are compiled in but must not be registered.
    #[serde(default)]
    pub disabled_providers: Vec<String>,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            disabled_providers: Vec::new(),
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Where analytics events are sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsBackend {
    /// Structured `tracing` log lines.
    #[default]
    Tracing,
    /// `metrics` counters.
    Metrics,
    /// Both of the above.
    Both,
}

/// Analytics configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyticsConfig {
    /// Emit analytics events at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Sink the events are recorded into.
    #[serde(default)]
    pub backend: AnalyticsBackend,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: AnalyticsBackend::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Feature flags and overrides for a single organization.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OrganizationEntry {
    /// Organization identifier.
    pub id: String,

    /// Feature flags enabled for the organization (e.g. `integrations-acme`).
    #[serde(default)]
    pub flags: Vec<String>,

    /// Providers hidden from this organization.
    #[serde(default)]
    pub disabled_providers: Vec<String>,
}
