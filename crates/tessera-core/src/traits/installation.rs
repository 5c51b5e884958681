// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Installation trait: a live, organization-scoped handle to one provider.

use async_trait::async_trait;

use crate::context::{InstallationContext, OrganizationConfig};
use crate::error::TesseraError;
use crate::types::{Feature, FeatureSet, OrganizationId, ProviderKey};

/// An installation of a provider for exactly one organization.
///
/// Installations are transient and their configuration is fixed at
/// construction. Capability-specific operations (creating issues, posting
/// messages, ...) live on the concrete type. They call
/// [`require_feature`](Self::require_feature) before doing any work and
/// [`InstallationContext::record_action`] once the work succeeded.
#[async_trait]
pub trait IntegrationInstallation: Send + Sync {
    /// The (organization, provider) binding this installation was built from.
    fn context(&self) -> &InstallationContext;

    /// Check credentials and connectivity against the third-party service.
    ///
    /// Fails only with [`TesseraError::Authentication`] or
    /// [`TesseraError::Connectivity`].
    async fn validate(&self) -> Result<(), TesseraError>;

    /// Release provider-side resources (revoke tokens, remove webhooks).
    async fn uninstall(&self) -> Result<(), TesseraError> {
        Ok(())
    }

    fn provider_key(&self) -> &ProviderKey {
        self.context().provider_key()
    }

    fn organization_id(&self) -> &OrganizationId {
        self.context().organization_id()
    }

    fn features(&self) -> &FeatureSet {
        self.context().features()
    }

    fn config(&self) -> &OrganizationConfig {
        self.context().config()
    }

    /// Fail with [`TesseraError::UnsupportedFeature`] unless the provider declared `feature`.
    fn require_feature(&self, feature: Feature) -> Result<(), TesseraError> {
        self.context().ensure_feature(feature)
    }
}
