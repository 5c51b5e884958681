// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide default registry.
//!
//! Hosts that pass a [`ProviderRegistry`] around explicitly do not need this
//! module. It exists for code that registers providers from many places at
//! startup and looks them up by key later.

use std::sync::LazyLock;

use tessera_core::TesseraError;

use crate::registry::{ProviderRef, ProviderRegistry, Providers};

static DEFAULT_REGISTRY: LazyLock<ProviderRegistry> = LazyLock::new(ProviderRegistry::new);

/// The shared registry used by the free functions in this module.
pub fn default_registry() -> &'static ProviderRegistry {
    &DEFAULT_REGISTRY
}

/// Register `provider` with the default registry.
pub fn register(provider: ProviderRef) -> Result<(), TesseraError> {
    default_registry().register(provider)
}

pub fn unregister(key: &str) {
    default_registry().unregister(key);
}

pub fn get(key: &str) -> Result<ProviderRef, TesseraError> {
    default_registry().get(key)
}

pub fn exists(key: &str) -> bool {
    default_registry().exists(key)
}

pub fn all() -> Providers {
    default_registry().all()
}
