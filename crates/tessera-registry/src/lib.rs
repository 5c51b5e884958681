// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider registry, manifest parser, and catalog for Tessera integrations.
//!
//! Providers are registered once at startup, usually through [`bootstrap`],
//! and looked up by key for the rest of the process lifetime. Lookups never
//! block registration and never observe a half-registered provider.

pub mod bootstrap;
pub mod catalog;
pub mod flags;
pub mod global;
pub mod logging;
pub mod manifest;
pub mod registry;

pub use bootstrap::{bootstrap, bootstrap_into, organization_flags, start, BootstrapReport};
pub use catalog::{search, CatalogEntry, CatalogFeature};
pub use flags::{provider_flag, OrganizationFlags};
pub use global::default_registry;
pub use logging::{filter_directives, init_tracing};
pub use manifest::parse_integration_manifest;
pub use registry::{ProviderRef, ProviderRegistry, Providers};
