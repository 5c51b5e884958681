// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider trait: the factory for organization-bound installations.

use crate::analytics::IntegrationEvent;
use crate::context::InstallationContext;
use crate::descriptor::{IntegrationMetadata, ProviderDescriptor};
use crate::error::TesseraError;
use crate::traits::installation::IntegrationInstallation;
use crate::types::{ActorId, FeatureSet, ProviderKey};

/// One integration kind (GitHub, Slack, Jira, ...).
///
/// Providers are registered once at startup and shared for the life of the
/// process. They do not cache installations; every call to
/// [`build_installation`](Self::build_installation) produces a fresh one.
pub trait IntegrationProvider: Send + Sync + 'static {
    /// The immutable descriptor this provider was constructed with.
    fn descriptor(&self) -> &ProviderDescriptor;

    /// Build an installation bound to the organization in `ctx`.
    ///
    /// Implementations must validate the organization configuration here
    /// (typically via [`InstallationContext::parse_config`]) and return
    /// [`TesseraError::Configuration`] instead of deferring the failure to
    /// the first operation.
    fn build_installation(
        &self,
        ctx: InstallationContext,
    ) -> Result<Box<dyn IntegrationInstallation>, TesseraError>;

    /// Check that `ctx` was built for this provider, then build the installation.
    ///
    /// Callers holding a provider should go through this rather than
    /// [`build_installation`](Self::build_installation) directly.
    fn installation(
        &self,
        ctx: InstallationContext,
    ) -> Result<Box<dyn IntegrationInstallation>, TesseraError> {
        ctx.ensure_bound_to(self.descriptor())?;
        self.build_installation(ctx)
    }

    fn key(&self) -> &ProviderKey {
        self.descriptor().key()
    }

    fn name(&self) -> &str {
        self.descriptor().name()
    }

    fn features(&self) -> &FeatureSet {
        self.descriptor().features()
    }

    fn metadata(&self) -> &IntegrationMetadata {
        self.descriptor().metadata()
    }

    fn requires_feature_flag(&self) -> bool {
        self.descriptor().requires_feature_flag()
    }

    fn can_add(&self) -> bool {
        self.descriptor().can_add()
    }

    fn can_disable(&self) -> bool {
        self.descriptor().can_disable()
    }

    /// Called after the first installation for an organization was persisted.
    fn post_install(&self, ctx: &InstallationContext, actor: Option<&ActorId>) {
        ctx.record_lifecycle(IntegrationEvent::Added, actor);
    }

    /// Called after an organization's installation was removed.
    fn post_uninstall(&self, ctx: &InstallationContext, actor: Option<&ActorId>) {
        ctx.record_lifecycle(IntegrationEvent::Uninstalled, actor);
    }
}
