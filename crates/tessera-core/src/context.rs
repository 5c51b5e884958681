// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Organization-scoped configuration and the context an installation is built from.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::analytics::{AnalyticsEvent, AnalyticsSink, IntegrationEvent};
use crate::descriptor::ProviderDescriptor;
use crate::error::TesseraError;
use crate::types::{ActorId, Feature, FeatureSet, OrganizationId, ProviderKey};

/// Opaque per-(organization, provider) configuration record.
///
/// The record is owned by the persistence layer; cloning shares it rather than
/// copying the underlying JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct OrganizationConfig(Arc<serde_json::Value>);

impl OrganizationConfig {
    pub fn new(value: serde_json::Value) -> Self {
        Self(Arc::new(value))
    }

    pub fn value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Deserialize into a provider's typed configuration schema.
    ///
    /// Any structural mismatch (missing field, wrong type, unknown field when
    /// the schema uses `deny_unknown_fields`) becomes a
    /// [`TesseraError::Configuration`] naming the provider.
    pub fn parse<T: DeserializeOwned>(&self, provider: &ProviderKey) -> Result<T, TesseraError> {
        T::deserialize(self.0.as_ref()).map_err(|e| {
            TesseraError::configuration(
                provider.as_str(),
                format!("invalid organization configuration: {e}"),
            )
        })
    }
}

impl From<serde_json::Value> for OrganizationConfig {
    fn from(value: serde_json::Value) -> Self {
        Self::new(value)
    }
}

/// Binding of one provider to one organization.
///
/// The provider key and feature set are always copied from the provider's
/// descriptor, so the feature gate checks what the provider declared.
/// Handed to [`IntegrationProvider::build_installation`](crate::IntegrationProvider::build_installation)
/// and kept by the installation for its whole lifetime.
#[derive(Clone)]
pub struct InstallationContext {
    provider_key: ProviderKey,
    features: FeatureSet,
    organization_id: OrganizationId,
    config: OrganizationConfig,
    analytics: Arc<dyn AnalyticsSink>,
}

impl InstallationContext {
    pub fn for_provider(
        descriptor: &ProviderDescriptor,
        organization_id: OrganizationId,
        config: OrganizationConfig,
        analytics: Arc<dyn AnalyticsSink>,
    ) -> Self {
        Self {
            provider_key: descriptor.key().clone(),
            features: descriptor.features().clone(),
            organization_id,
            config,
            analytics,
        }
    }

    /// Fail with [`TesseraError::Configuration`] unless this context was
    /// built for `descriptor`.
    pub fn ensure_bound_to(&self, descriptor: &ProviderDescriptor) -> Result<(), TesseraError> {
        if self.provider_key != *descriptor.key() {
            return Err(TesseraError::configuration(
                descriptor.key().as_str(),
                format!("installation context is bound to provider `{}`", self.provider_key),
            ));
        }
        if self.features != *descriptor.features() {
            return Err(TesseraError::configuration(
                descriptor.key().as_str(),
                "installation context features differ from the declared features",
            ));
        }
        Ok(())
    }

    pub fn provider_key(&self) -> &ProviderKey {
        &self.provider_key
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn organization_id(&self) -> &OrganizationId {
        &self.organization_id
    }

    pub fn config(&self) -> &OrganizationConfig {
        &self.config
    }

    /// Parse the organization configuration into the provider's schema.
    pub fn parse_config<T: DeserializeOwned>(&self) -> Result<T, TesseraError> {
        self.config.parse(&self.provider_key)
    }

    /// Fail with [`TesseraError::UnsupportedFeature`] unless the provider declared `feature`.
    pub fn ensure_feature(&self, feature: Feature) -> Result<(), TesseraError> {
        if self.features.contains(feature) {
            Ok(())
        } else {
            Err(TesseraError::UnsupportedFeature {
                provider: self.provider_key.to_string(),
                feature,
            })
        }
    }

    /// Record that `action` completed.
    ///
    /// Installations call [`ensure_feature`](Self::ensure_feature) before doing
    /// any work and this once the operation succeeded, so failed attempts are
    /// never counted. An undeclared `feature` fails here too, without emitting.
    pub fn record_action(
        &self,
        feature: Feature,
        action: &str,
        actor: Option<&ActorId>,
    ) -> Result<(), TesseraError> {
        self.ensure_feature(feature)?;
        self.emit(
            AnalyticsEvent::new(
                IntegrationEvent::ActionPerformed,
                self.organization_id.clone(),
                self.provider_key.clone(),
                actor.cloned(),
            )
            .with_action(feature, action),
        );
        Ok(())
    }

    /// Emit a lifecycle event for this (organization, provider) pair.
    pub fn record_lifecycle(&self, event: IntegrationEvent, actor: Option<&ActorId>) {
        self.emit(AnalyticsEvent::new(
            event,
            self.organization_id.clone(),
            self.provider_key.clone(),
            actor.cloned(),
        ));
    }

    fn emit(&self, event: AnalyticsEvent) {
        tracing::trace!(
            event = %event.event_name,
            provider = %event.provider_key,
            organization = %event.organization_id,
            "analytics event"
        );
        self.analytics.record(event);
    }
}

impl fmt::Debug for InstallationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstallationContext")
            .field("provider_key", &self.provider_key)
            .field("features", &self.features)
            .field("organization_id", &self.organization_id)
            .finish_non_exhaustive()
    }
}
