// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration manifest parsing from `integration.toml` files.
//!
//! A manifest lets a provider keep its display metadata next to its code
//! instead of in a builder chain:
//!
//! ```toml
//! [integration]
//! key = "acme"
//! name = "Acme Tracker"
//! features = ["issue_linking"]
//!
//! [[integration.feature_descriptions]]
//! feature = "issue_linking"
//! description = "Create Acme tickets from errors."
//! ```

use std::str::FromStr;

use serde::Deserialize;

use tessera_core::descriptor::ProviderDescriptorBuilder;
use tessera_core::{Feature, ProviderDescriptor, TesseraError};

/// Intermediate TOML deserialization struct for `integration.toml`.
#[derive(Debug, Deserialize)]
struct ManifestFile {
    integration: IntegrationSection,
}

/// The `[integration]` section.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct IntegrationSection {
    key: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    features: Vec<String>,
    author: Option<String>,
    noun: Option<String>,
    issue_url: Option<String>,
    source_url: Option<String>,
    #[serde(default)]
    requires_feature_flag: bool,
    #[serde(default = "default_true")]
    can_add: bool,
    #[serde(default)]
    can_disable: bool,
    #[serde(default)]
    feature_descriptions: Vec<FeatureDescriptionEntry>,
    aspects: Option<toml::Table>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FeatureDescriptionEntry {
    feature: String,
    description: String,
}

fn default_true() -> bool {
    true
}

/// Parse an integration manifest into a validated [`ProviderDescriptor`].
///
/// Unknown feature names, malformed TOML, and descriptor validation failures
/// are all reported as [`TesseraError::Configuration`].
pub fn parse_integration_manifest(toml_content: &str) -> Result<ProviderDescriptor, TesseraError> {
    let file: ManifestFile = toml::from_str(toml_content).map_err(|e| {
        TesseraError::configuration("<manifest>", format!("invalid integration manifest: {e}"))
    })?;
    let section = file.integration;
    let key = section.key;

    let mut builder = ProviderDescriptor::builder(key.clone(), section.name)
        .description(section.description)
        .requires_feature_flag(section.requires_feature_flag)
        .can_add(section.can_add)
        .can_disable(section.can_disable);

    for name in &section.features {
        builder = builder.feature(parse_feature(&key, name)?);
    }
    for entry in section.feature_descriptions {
        let feature = parse_feature(&key, &entry.feature)?;
        builder = builder.feature_description(feature, entry.description);
    }
    builder = apply_optional(builder, section.author, ProviderDescriptorBuilder::author);
    builder = apply_optional(builder, section.noun, ProviderDescriptorBuilder::noun);
    builder = apply_optional(builder, section.issue_url, ProviderDescriptorBuilder::issue_url);
    builder = apply_optional(builder, section.source_url, ProviderDescriptorBuilder::source_url);

    if let Some(aspects) = section.aspects {
        let aspects = serde_json::to_value(aspects).map_err(|e| {
            TesseraError::configuration(key.as_str(), format!("invalid aspects table: {e}"))
        })?;
        builder = builder.aspects(aspects);
    }

    builder.build()
}

fn parse_feature(key: &str, name: &str) -> Result<Feature, TesseraError> {
    Feature::from_str(name).map_err(|_| {
        TesseraError::configuration(key, format!("integration manifest: unknown feature '{name}'"))
    })
}

fn apply_optional(
    builder: ProviderDescriptorBuilder,
    value: Option<String>,
    set: fn(ProviderDescriptorBuilder, String) -> ProviderDescriptorBuilder,
) -> ProviderDescriptorBuilder {
    match value {
        Some(value) => set(builder, value),
        None => builder,
    }
}
