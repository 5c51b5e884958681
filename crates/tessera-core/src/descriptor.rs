// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Immutable provider descriptors and display metadata.
//!
//! A [`ProviderDescriptor`] can only be obtained through
//! [`ProviderDescriptorBuilder::build`], which validates the key, the display
//! name, and that every feature description refers to a declared feature.
//! Misconfigured providers therefore fail when they are constructed, not when
//! a UI later tries to render their help text.

use serde::Serialize;

use crate::error::TesseraError;
use crate::types::{Feature, FeatureSet, ProviderKey};

/// Help text for one capability of a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureDescription {
    pub feature: Feature,
    pub description: String,
}

impl FeatureDescription {
    pub fn new(feature: Feature, description: impl Into<String>) -> Self {
        Self {
            feature,
            description: description.into(),
        }
    }
}

/// Display and documentation data rendered in UI and API listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IntegrationMetadata {
    /// Markdown description of the integration.
    pub description: String,
    /// Capability-specific help text.
    pub feature_descriptions: Vec<FeatureDescription>,
    /// Who maintains the integration.
    pub author: Option<String>,
    /// Noun used for the "add" button (e.g. "Installation", "Account").
    pub noun: Option<String>,
    /// Where users report problems.
    pub issue_url: Option<String>,
    /// Where the integration's source lives.
    pub source_url: Option<String>,
    /// Free-form presentation hints (alerts, dialogs) passed through to the UI.
    pub aspects: serde_json::Value,
}

/// Immutable description of one integration kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderDescriptor {
    key: ProviderKey,
    name: String,
    features: FeatureSet,
    metadata: IntegrationMetadata,
    requires_feature_flag: bool,
    can_add: bool,
    can_disable: bool,
}

impl ProviderDescriptor {
    /// Start building a descriptor for the given key and display name.
    pub fn builder(key: impl Into<String>, name: impl Into<String>) -> ProviderDescriptorBuilder {
        ProviderDescriptorBuilder {
            key: key.into(),
            name: name.into(),
            features: FeatureSet::new(),
            metadata: IntegrationMetadata::default(),
            requires_feature_flag: false,
            can_add: true,
            can_disable: false,
        }
    }

    pub fn key(&self) -> &ProviderKey {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn metadata(&self) -> &IntegrationMetadata {
        &self.metadata
    }

    /// Whether organizations need the `integrations-<key>` flag to see this provider.
    pub fn requires_feature_flag(&self) -> bool {
        self.requires_feature_flag
    }

    /// Whether users can add new installations of this provider.
    pub fn can_add(&self) -> bool {
        self.can_add
    }

    /// Whether installations of this provider can be disabled without uninstalling.
    pub fn can_disable(&self) -> bool {
        self.can_disable
    }

    /// Help text entries, all of which refer to declared features.
    pub fn feature_descriptions(&self) -> &[FeatureDescription] {
        &self.metadata.feature_descriptions
    }

    /// Help text for a single declared feature, if any was provided.
    pub fn feature_description(&self, feature: Feature) -> Option<&str> {
        self.metadata
            .feature_descriptions
            .iter()
            .find(|d| d.feature == feature)
            .map(|d| d.description.as_str())
    }
}

/// Builder for [`ProviderDescriptor`]; validation happens in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct ProviderDescriptorBuilder {
    key: String,
    name: String,
    features: FeatureSet,
    metadata: IntegrationMetadata,
    requires_feature_flag: bool,
    can_add: bool,
    can_disable: bool,
}

impl ProviderDescriptorBuilder {
    pub fn feature(mut self, feature: Feature) -> Self {
        self.features.insert(feature);
        self
    }

    pub fn features(mut self, features: impl IntoIterator<Item = Feature>) -> Self {
        for feature in features {
            self.features.insert(feature);
        }
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.metadata.description = description.into();
        self
    }

    pub fn feature_description(mut self, feature: Feature, description: impl Into<String>) -> Self {
        self.metadata
            .feature_descriptions
            .push(FeatureDescription::new(feature, description));
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.metadata.author = Some(author.into());
        self
    }

    pub fn noun(mut self, noun: impl Into<String>) -> Self {
        self.metadata.noun = Some(noun.into());
        self
    }

    pub fn issue_url(mut self, url: impl Into<String>) -> Self {
        self.metadata.issue_url = Some(url.into());
        self
    }

    pub fn source_url(mut self, url: impl Into<String>) -> Self {
        self.metadata.source_url = Some(url.into());
        self
    }

    pub fn aspects(mut self, aspects: serde_json::Value) -> Self {
        self.metadata.aspects = aspects;
        self
    }

    pub fn requires_feature_flag(mut self, required: bool) -> Self {
        self.requires_feature_flag = required;
        self
    }

    pub fn can_add(mut self, can_add: bool) -> Self {
        self.can_add = can_add;
        self
    }

    pub fn can_disable(mut self, can_disable: bool) -> Self {
        self.can_disable = can_disable;
        self
    }

    /// Validate and freeze the descriptor.
    pub fn build(self) -> Result<ProviderDescriptor, TesseraError> {
        let key = ProviderKey::new(self.key)?;

        if self.name.trim().is_empty() {
            return Err(TesseraError::configuration(
                key.as_str(),
                "provider name must not be empty",
            ));
        }

        let undeclared: Vec<&str> = self
            .metadata
            .feature_descriptions
            .iter()
            .filter(|d| !self.features.contains(d.feature))
            .map(|d| d.feature.as_ref())
            .collect();
        if !undeclared.is_empty() {
            return Err(TesseraError::configuration(
                key.as_str(),
                format!(
                    "feature descriptions reference undeclared features: {}",
                    undeclared.join(", ")
                ),
            ));
        }

        Ok(ProviderDescriptor {
            key,
            name: self.name,
            features: self.features,
            metadata: self.metadata,
            requires_feature_flag: self.requires_feature_flag,
            can_add: self.can_add,
            can_disable: self.can_disable,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_descriptor_with_metadata() {
        let descriptor = ProviderDescriptor::builder("github", "GitHub")
            .features([Feature::CommitTracking, Feature::IssueLinking])
            .description("Connect your GitHub organization.")
            .feature_description(Feature::IssueLinking, "Create and link GitHub issues.")
            .author("Tessera Contributors")
            .noun("Installation")
            .source_url("https://example.invalid/github")
            .build()
            .unwrap();

        assert_eq!(descriptor.key().as_str(), "github");
        assert_eq!(descriptor.name(), "GitHub");
        assert!(descriptor.features().contains(Feature::CommitTracking));
        assert_eq!(
            descriptor.feature_description(Feature::IssueLinking),
            Some("Create and link GitHub issues.")
        );
        assert_eq!(descriptor.feature_description(Feature::CommitTracking), None);
        assert_eq!(descriptor.feature_descriptions().len(), 1);
        assert_eq!(descriptor.metadata().noun.as_deref(), Some("Installation"));
        assert!(descriptor.can_add());
        assert!(!descriptor.can_disable());
        assert!(!descriptor.requires_feature_flag());
    }

    #[test]
    fn undeclared_feature_description_is_rejected() {
        let err = ProviderDescriptor::builder("slack", "Slack")
            .feature(Feature::ChatNotifications)
            .feature_description(Feature::ChatUnfurl, "Unfurl links.")
            .build()
            .unwrap_err();

        match err {
            TesseraError::Configuration { provider, message } => {
                assert_eq!(provider, "slack");
                assert!(message.contains("chat_unfurl"), "{message}");
            }
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = ProviderDescriptor::builder("jira", "  ").build().unwrap_err();
        assert!(matches!(err, TesseraError::Configuration { .. }));
    }

    #[test]
    fn malformed_key_is_rejected() {
        let err = ProviderDescriptor::builder("Jira Server", "Jira").build().unwrap_err();
        assert!(matches!(err, TesseraError::Configuration { .. }));
    }
}
