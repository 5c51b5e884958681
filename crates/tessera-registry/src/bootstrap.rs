// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Explicit startup routine that fills a registry from configuration.

use tracing::{debug, info};

use tessera_analytics::sink_from_config;
use tessera_config::TesseraConfig;
use tessera_core::{OrganizationId, ProviderKey, TesseraError};

use crate::flags::OrganizationFlags;
use crate::logging::init_tracing;
use crate::registry::{ProviderRef, ProviderRegistry};

/// What [`bootstrap_into`] did with each provider it was handed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub registered: Vec<ProviderKey>,
    pub skipped: Vec<ProviderKey>,
}

/// Build a fresh registry from `config` and `providers`.
///
/// The registry's analytics sink comes from the `[analytics]` section.
pub fn bootstrap(
    config: &TesseraConfig,
    providers: impl IntoIterator<Item = ProviderRef>,
) -> Result<ProviderRegistry, TesseraError> {
    let registry = ProviderRegistry::with_analytics(sink_from_config(&config.analytics));
    bootstrap_into(&registry, config, providers)?;
    Ok(registry)
}

/// Host entry point: install tracing at `registry.log_level`, then [`bootstrap`].
///
/// An already installed global subscriber is kept.
pub fn start(
    config: &TesseraConfig,
    providers: impl IntoIterator<Item = ProviderRef>,
) -> Result<ProviderRegistry, TesseraError> {
    if !init_tracing(&config.registry.log_level) {
        debug!("tracing subscriber already installed, keeping it");
    }
    bootstrap(config, providers)
}

/// Register `providers` into an existing registry, in order.
///
/// Providers listed in `registry.disabled_providers` are skipped. The first
/// registration error aborts the routine; providers registered before it stay
/// registered.
pub fn bootstrap_into(
    registry: &ProviderRegistry,
    config: &TesseraConfig,
    providers: impl IntoIterator<Item = ProviderRef>,
) -> Result<BootstrapReport, TesseraError> {
    let disabled = &config.registry.disabled_providers;
    let mut report = BootstrapReport::default();

    for provider in providers {
        let key = provider.key().clone();
        if disabled.iter().any(|d| d == key.as_str()) {
            info!(provider = %key, "provider disabled by configuration, skipping");
            report.skipped.push(key);
            continue;
        }
        registry.register(provider)?;
        report.registered.push(key);
    }

    info!(
        registered = report.registered.len(),
        skipped = report.skipped.len(),
        total = registry.len(),
        "integration providers bootstrapped"
    );
    Ok(report)
}

/// Feature flags for one organization, as configured.
pub fn organization_flags(config: &TesseraConfig, organization_id: OrganizationId) -> OrganizationFlags {
    OrganizationFlags::from_config(config, organization_id)
}
