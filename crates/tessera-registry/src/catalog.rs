// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serializable catalog listings of registered providers.
//!
//! This is how providers report themselves to UI and API surfaces: one
//! [`CatalogEntry`] per provider, in registration order.

use serde::Serialize;

use tessera_core::{Feature, IntegrationProvider};

use crate::registry::{ProviderRef, Providers};

/// One feature of a provider with its help text, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogFeature {
    pub feature: Feature,
    pub description: Option<String>,
}

/// API representation of a provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub key: String,
    pub name: String,
    pub description: String,
    pub features: Vec<CatalogFeature>,
    pub author: Option<String>,
    pub noun: Option<String>,
    pub issue_url: Option<String>,
    pub source_url: Option<String>,
    pub aspects: serde_json::Value,
    pub requires_feature_flag: bool,
    pub can_add: bool,
    pub can_disable: bool,
}

impl CatalogEntry {
    pub fn from_provider(provider: &dyn IntegrationProvider) -> Self {
        let descriptor = provider.descriptor();
        let metadata = descriptor.metadata();
        Self {
            key: descriptor.key().to_string(),
            name: descriptor.name().to_string(),
            description: metadata.description.clone(),
            features: descriptor
                .features()
                .iter()
                .map(|feature| CatalogFeature {
                    feature,
                    description: descriptor.feature_description(feature).map(str::to_string),
                })
                .collect(),
            author: metadata.author.clone(),
            noun: metadata.noun.clone(),
            issue_url: metadata.issue_url.clone(),
            source_url: metadata.source_url.clone(),
            aspects: metadata.aspects.clone(),
            requires_feature_flag: descriptor.requires_feature_flag(),
            can_add: descriptor.can_add(),
            can_disable: descriptor.can_disable(),
        }
    }
}

/// Catalog entries for every provider in `providers`.
pub fn entries(providers: &Providers) -> Vec<CatalogEntry> {
    providers
        .iter()
        .map(|p| CatalogEntry::from_provider(&**p))
        .collect()
}

/// Filter providers whose key, name, or description contains `query`.
///
/// Matching is case-insensitive. An empty query returns every provider.
pub fn search(providers: &Providers, query: &str) -> Vec<ProviderRef> {
    let query = query.to_lowercase();
    providers
        .iter()
        .filter(|p| {
            query.is_empty()
                || p.key().as_str().contains(&query)
                || p.name().to_lowercase().contains(&query)
                || p.metadata().description.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}
