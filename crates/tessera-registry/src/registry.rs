// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider registry for integration providers.
//!
//! The `ProviderRegistry` maps provider keys to providers in insertion order.
//! Readers load an immutable snapshot and never block; writers build a new
//! snapshot under a mutex and publish it atomically, so a lookup either sees a
//! provider fully registered or not at all.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use arc_swap::ArcSwap;
use tracing::debug;

use tessera_core::{
    AnalyticsSink, Feature, InstallationContext, IntegrationInstallation, IntegrationProvider,
    NoopSink, OrganizationConfig, OrganizationId, ProviderKey, TesseraError,
};

use crate::catalog;
use crate::flags::OrganizationFlags;

/// Shared handle to a registered provider.
pub type ProviderRef = Arc<dyn IntegrationProvider>;

#[derive(Clone, Default)]
struct Snapshot {
    order: Vec<ProviderRef>,
    index: HashMap<ProviderKey, usize>,
}

impl Snapshot {
    fn get(&self, key: &str) -> Option<&ProviderRef> {
        self.index.get(key).map(|&i| &self.order[i])
    }

    fn reindex(&mut self) {
        self.index = self
            .order
            .iter()
            .enumerate()
            .map(|(i, p)| (p.key().clone(), i))
            .collect();
    }
}

/// Point-in-time view of every registered provider, in registration order.
///
/// Iterating does not lock the registry and can be repeated any number of
/// times; later registrations are not visible through an existing snapshot.
#[derive(Clone)]
pub struct Providers {
    snapshot: Arc<Snapshot>,
}

impl Providers {
    pub fn iter(&self) -> impl Iterator<Item = &ProviderRef> + '_ {
        self.snapshot.order.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ProviderKey> + '_ {
        self.iter().map(|p| p.key())
    }

    pub fn len(&self) -> usize {
        self.snapshot.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.order.is_empty()
    }
}

impl<'a> IntoIterator for &'a Providers {
    type Item = &'a ProviderRef;
    type IntoIter = std::slice::Iter<'a, ProviderRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshot.order.iter()
    }
}

impl fmt::Debug for Providers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}

/// Process-wide directory of integration providers.
pub struct ProviderRegistry {
    snapshot: ArcSwap<Snapshot>,
    writer: Mutex<()>,
    analytics: ArcSwap<Arc<dyn AnalyticsSink>>,
}

impl ProviderRegistry {
    /// Create an empty registry that discards analytics events.
    pub fn new() -> Self {
        Self::with_analytics(Arc::new(NoopSink))
    }

    /// Create an empty registry whose installations report into `sink`.
    pub fn with_analytics(sink: Arc<dyn AnalyticsSink>) -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(Snapshot::default()),
            writer: Mutex::new(()),
            analytics: ArcSwap::from_pointee(sink),
        }
    }

    /// Replace the analytics sink used for installations built from now on.
    pub fn set_analytics(&self, sink: Arc<dyn AnalyticsSink>) {
        self.analytics.store(Arc::new(sink));
    }

    pub fn analytics(&self) -> Arc<dyn AnalyticsSink> {
        let sink = self.analytics.load();
        Arc::clone(&**sink)
    }

    /// Register a provider under its key.
    ///
    /// Registering the same provider object again is a no-op. Registering a
    /// different provider under a key that is already taken fails with
    /// [`TesseraError::DuplicateProvider`]. No analytics event is emitted.
    pub fn register(&self, provider: ProviderRef) -> Result<(), TesseraError> {
        let _writer = self.write_lock();
        let current = self.snapshot.load_full();

        if let Some(existing) = current.get(provider.key().as_str()) {
            if same_provider(existing, &provider) {
                debug!(provider = %provider.key(), "provider already registered");
                return Ok(());
            }
            return Err(TesseraError::DuplicateProvider {
                key: provider.key().to_string(),
            });
        }

        let mut next = Snapshot::clone(&current);
        next.index.insert(provider.key().clone(), next.order.len());
        debug!(
            provider = %provider.key(),
            features = %provider.features(),
            "provider registered"
        );
        next.order.push(provider);
        self.snapshot.store(Arc::new(next));
        Ok(())
    }

    /// Remove the provider registered under `key`. Absent keys are ignored.
    pub fn unregister(&self, key: &str) {
        let _writer = self.write_lock();
        let current = self.snapshot.load_full();
        if current.get(key).is_none() {
            return;
        }

        let mut next = Snapshot::clone(&current);
        next.order.retain(|p| p.key().as_str() != key);
        next.reindex();
        self.snapshot.store(Arc::new(next));
        debug!(provider = %key, "provider unregistered");
    }

    /// Remove `provider` if it is the object registered under its key.
    ///
    /// A different provider registered under the same key is left in place.
    pub fn unregister_provider(&self, provider: &ProviderRef) {
        let _writer = self.write_lock();
        let current = self.snapshot.load_full();
        let registered = current
            .get(provider.key().as_str())
            .is_some_and(|existing| same_provider(existing, provider));
        if !registered {
            return;
        }

        let mut next = Snapshot::clone(&current);
        next.order.retain(|p| !same_provider(p, provider));
        next.reindex();
        self.snapshot.store(Arc::new(next));
        debug!(provider = %provider.key(), "provider unregistered");
    }

    /// Look up a provider by key.
    pub fn get(&self, key: &str) -> Result<ProviderRef, TesseraError> {
        self.snapshot
            .load()
            .get(key)
            .cloned()
            .ok_or_else(|| TesseraError::ProviderNotFound {
                key: key.to_string(),
            })
    }

    pub fn exists(&self, key: &str) -> bool {
        self.snapshot.load().index.contains_key(key)
    }

    /// Snapshot of all providers in registration order.
    pub fn all(&self) -> Providers {
        Providers {
            snapshot: self.snapshot.load_full(),
        }
    }

    pub fn keys(&self) -> Vec<ProviderKey> {
        self.all().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.snapshot.load().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every provider. Intended for test isolation and teardown.
    pub fn clear(&self) {
        let _writer = self.write_lock();
        self.snapshot.store(Arc::new(Snapshot::default()));
        debug!("provider registry cleared");
    }

    /// Providers that declare `feature`, in registration order.
    pub fn with_feature(&self, feature: Feature) -> Vec<ProviderRef> {
        self.all()
            .iter()
            .filter(|p| p.features().contains(feature))
            .cloned()
            .collect()
    }

    /// Providers whose key, name, or description contains `query` (case-insensitive).
    pub fn search(&self, query: &str) -> Vec<ProviderRef> {
        catalog::search(&self.all(), query)
    }

    /// Providers an organization may see and add.
    pub fn available_for(&self, flags: &OrganizationFlags) -> Vec<ProviderRef> {
        self.all()
            .iter()
            .filter(|&p| flags.allows(&**p))
            .cloned()
            .collect()
    }

    /// Bind the provider registered under `key` to an organization.
    pub fn context_for(
        &self,
        key: &str,
        organization_id: OrganizationId,
        config: OrganizationConfig,
    ) -> Result<InstallationContext, TesseraError> {
        let provider = self.get(key)?;
        Ok(self.bind(&provider, organization_id, config))
    }

    /// Look up `key` and build an installation for an organization.
    pub fn build_installation(
        &self,
        key: &str,
        organization_id: OrganizationId,
        config: OrganizationConfig,
    ) -> Result<Box<dyn IntegrationInstallation>, TesseraError> {
        let provider = self.get(key)?;
        let installation = provider.installation(self.bind(&provider, organization_id, config))?;
        debug!(
            provider = %key,
            organization = %installation.organization_id(),
            "installation built"
        );
        Ok(installation)
    }

    fn bind(
        &self,
        provider: &ProviderRef,
        organization_id: OrganizationId,
        config: OrganizationConfig,
    ) -> InstallationContext {
        InstallationContext::for_provider(
            provider.descriptor(),
            organization_id,
            config,
            self.analytics(),
        )
    }

    fn write_lock(&self) -> MutexGuard<'_, ()> {
        // The guarded data is `()`, so a poisoned lock carries no broken state.
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.all())
            .finish_non_exhaustive()
    }
}

fn same_provider(a: &ProviderRef, b: &ProviderRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stub::Stub;

    /// Minimal provider used by the unit tests below.
    mod stub {
        use super::*;
        use tessera_core::ProviderDescriptor;

        pub struct Stub {
            descriptor: ProviderDescriptor,
        }

        impl Stub {
            pub fn new(key: &str, features: &[Feature]) -> Arc<Self> {
                Arc::new(Self {
                    descriptor: ProviderDescriptor::builder(key, key.to_uppercase())
                        .features(features.iter().copied())
                        .description(format!("{key} integration"))
                        .build()
                        .unwrap(),
                })
            }
        }

        impl IntegrationProvider for Stub {
            fn descriptor(&self) -> &ProviderDescriptor {
                &self.descriptor
            }

            fn build_installation(
                &self,
                ctx: InstallationContext,
            ) -> Result<Box<dyn IntegrationInstallation>, TesseraError> {
                Err(TesseraError::configuration(
                    ctx.provider_key().as_str(),
                    "stub providers cannot be installed",
                ))
            }
        }
    }

    #[test]
    fn register_then_get_returns_same_provider() {
        let registry = ProviderRegistry::new();
        let github: ProviderRef = Stub::new("github", &[Feature::CommitTracking]);
        registry.register(github.clone()).unwrap();

        let found = registry.get("github").unwrap();
        assert!(same_provider(&found, &github));
        assert!(registry.exists("github"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn get_unknown_key_is_not_found() {
        let registry = ProviderRegistry::new();
        let err = registry.get("nope").err().unwrap();
        assert!(matches!(err, TesseraError::ProviderNotFound { ref key } if key == "nope"));
        assert!(!registry.exists("nope"));
    }

    #[test]
    fn registering_same_object_twice_is_idempotent() {
        let registry = ProviderRegistry::new();
        let slack: ProviderRef = Stub::new("slack", &[]);
        registry.register(slack.clone()).unwrap();
        registry.register(slack.clone()).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registering_different_object_under_same_key_fails() {
        let registry = ProviderRegistry::new();
        registry.register(Stub::new("jira", &[])).unwrap();
        let err = registry.register(Stub::new("jira", &[])).unwrap_err();
        assert!(matches!(err, TesseraError::DuplicateProvider { ref key } if key == "jira"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unregister_absent_key_is_noop() {
        let registry = ProviderRegistry::new();
        registry.unregister("ghost");
        registry.register(Stub::new("a", &[])).unwrap();
        registry.unregister("ghost");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unregister_keeps_remaining_order() {
        let registry = ProviderRegistry::new();
        for key in ["c", "a", "b", "d"] {
            registry.register(Stub::new(key, &[])).unwrap();
        }
        registry.unregister("a");

        let keys: Vec<String> = registry.keys().iter().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["c", "b", "d"]);
        assert!(!registry.exists("a"));
        assert!(registry.get("d").is_ok());
    }

    #[test]
    fn unregister_provider_ignores_foreign_object() {
        let registry = ProviderRegistry::new();
        let registered: ProviderRef = Stub::new("gitlab", &[]);
        let impostor: ProviderRef = Stub::new("gitlab", &[]);
        registry.register(registered.clone()).unwrap();

        registry.unregister_provider(&impostor);
        assert!(registry.exists("gitlab"));

        registry.unregister_provider(&registered);
        assert!(!registry.exists("gitlab"));
    }

    #[test]
    fn all_preserves_insertion_order_and_is_restartable() {
        let registry = ProviderRegistry::new();
        for key in ["zebra", "alpha", "middle"] {
            registry.register(Stub::new(key, &[])).unwrap();
        }
        registry.get("alpha").unwrap();

        let all = registry.all();
        let first: Vec<&str> = all.iter().map(|p| p.key().as_str()).collect();
        let second: Vec<&str> = (&all).into_iter().map(|p| p.key().as_str()).collect();
        assert_eq!(first, vec!["zebra", "alpha", "middle"]);
        assert_eq!(first, second);
    }

    #[test]
    fn snapshot_is_unaffected_by_later_writes() {
        let registry = ProviderRegistry::new();
        registry.register(Stub::new("one", &[])).unwrap();
        let before = registry.all();

        registry.register(Stub::new("two", &[])).unwrap();
        registry.unregister("one");

        assert_eq!(before.len(), 1);
        assert_eq!(before.keys().next().unwrap().as_str(), "one");
        assert_eq!(registry.keys(), vec![ProviderKey::new("two").unwrap()]);
    }

    #[test]
    fn clear_empties_registry() {
        let registry = ProviderRegistry::new();
        registry.register(Stub::new("one", &[])).unwrap();
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.all().is_empty());
    }

    #[test]
    fn with_feature_filters_in_order() {
        let registry = ProviderRegistry::new();
        registry.register(Stub::new("github", &[Feature::CommitTracking, Feature::IssueLinking])).unwrap();
        registry.register(Stub::new("slack", &[Feature::ChatNotifications])).unwrap();
        registry.register(Stub::new("jira", &[Feature::IssueLinking])).unwrap();

        let linking: Vec<String> = registry
            .with_feature(Feature::IssueLinking)
            .iter()
            .map(|p| p.key().to_string())
            .collect();
        assert_eq!(linking, vec!["github", "jira"]);
        assert!(registry.with_feature(Feature::Mobile).is_empty());
    }

    #[test]
    fn build_installation_propagates_provider_error() {
        let registry = ProviderRegistry::new();
        registry.register(Stub::new("stub", &[])).unwrap();
        let err = registry
            .build_installation(
                "stub",
                OrganizationId("org".into()),
                OrganizationConfig::new(serde_json::json!({})),
            )
            .err()
            .unwrap();
        assert!(matches!(err, TesseraError::Configuration { .. }));
    }

    #[test]
    fn build_installation_for_unknown_key_is_not_found() {
        let registry = ProviderRegistry::new();
        let err = registry
            .build_installation(
                "missing",
                OrganizationId("org".into()),
                OrganizationConfig::new(serde_json::Value::Null),
            )
            .err()
            .unwrap();
        assert!(matches!(err, TesseraError::ProviderNotFound { .. }));
    }
}
