// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Tessera integration registry.
//!
//! This crate provides the error taxonomy, value types, and the provider and
//! installation traits every integration implements. The registry itself
//! lives in `tessera-registry` and depends only on what is defined here.

pub mod analytics;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use analytics::{AnalyticsEvent, AnalyticsSink, IntegrationEvent, NoopSink};
pub use context::{InstallationContext, OrganizationConfig};
pub use descriptor::{FeatureDescription, IntegrationMetadata, ProviderDescriptor};
pub use error::TesseraError;
pub use traits::{IntegrationInstallation, IntegrationProvider};
pub use types::{ActorId, Feature, FeatureSet, OrganizationId, ProviderKey};
