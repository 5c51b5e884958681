// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for registry integration tests.
//!
//! `RegistryHarness` wires a fresh [`ProviderRegistry`] to a
//! [`RecordingSink`] and registers the mock `acme` provider, so tests can go
//! from registration to feature-gated installation calls in a few lines.

use std::sync::Arc;

use tessera_core::{
    AnalyticsSink, Feature, OrganizationConfig, OrganizationId, TesseraError,
};
use tessera_registry::ProviderRegistry;

use crate::acme::{AcmeInstallation, AcmeProvider, ValidationOutcome, ACME_KEY};
use crate::recording::RecordingSink;

/// Builder for [`RegistryHarness`].
pub struct RegistryHarnessBuilder {
    features: Vec<Feature>,
    validation: Vec<ValidationOutcome>,
}

impl RegistryHarnessBuilder {
    fn new() -> Self {
        Self {
            features: vec![Feature::IssueLinking],
            validation: Vec::new(),
        }
    }

    /// Features the `acme` provider declares. Defaults to issue linking only.
    pub fn with_features(mut self, features: impl IntoIterator<Item = Feature>) -> Self {
        self.features = features.into_iter().collect();
        self
    }

    /// Queue scripted outcomes for `validate()` calls.
    pub fn with_validation(mut self, outcomes: Vec<ValidationOutcome>) -> Self {
        self.validation = outcomes;
        self
    }

    pub fn build(self) -> Result<RegistryHarness, TesseraError> {
        let sink = Arc::new(RecordingSink::new());
        let registry = ProviderRegistry::with_analytics(Arc::clone(&sink) as Arc<dyn AnalyticsSink>);

        let acme = Arc::new(AcmeProvider::with_features(self.features));
        for outcome in self.validation {
            acme.script_validation(outcome);
        }
        registry.register(Arc::clone(&acme) as _)?;

        Ok(RegistryHarness {
            registry,
            sink,
            acme,
        })
    }
}

/// A registry with the `acme` provider registered and analytics captured.
pub struct RegistryHarness {
    pub registry: ProviderRegistry,
    pub sink: Arc<RecordingSink>,
    pub acme: Arc<AcmeProvider>,
}

impl RegistryHarness {
    pub fn builder() -> RegistryHarnessBuilder {
        RegistryHarnessBuilder::new()
    }

    /// Build a concrete `acme` installation for `organization` through the registry.
    pub fn install(
        &self,
        organization: &str,
        config: serde_json::Value,
    ) -> Result<AcmeInstallation, TesseraError> {
        let ctx = self.registry.context_for(
            ACME_KEY,
            OrganizationId(organization.to_string()),
            OrganizationConfig::new(config),
        )?;
        self.acme.install(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acme::valid_config;
    use tessera_core::{IntegrationEvent, IntegrationInstallation};

    #[tokio::test]
    async fn harness_installs_through_registry() {
        let harness = RegistryHarness::builder().build().unwrap();
        assert!(harness.registry.exists("acme"));

        let installation = harness.install("org-1", valid_config()).unwrap();
        assert_eq!(installation.organization_id().0, "org-1");
        installation.create_issue("boom", None).await.unwrap();

        assert_eq!(harness.sink.count(IntegrationEvent::ActionPerformed), 1);
    }

    #[test]
    fn registration_alone_records_nothing() {
        let harness = RegistryHarness::builder().build().unwrap();
        assert!(harness.sink.is_empty());
    }
}
