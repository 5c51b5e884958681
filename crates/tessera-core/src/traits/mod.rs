// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider and installation trait definitions.
//!
//! The registry depends only on these traits; each third-party service
//! supplies one concrete provider and installation pair.

pub mod installation;
pub mod provider;

pub use installation::IntegrationInstallation;
pub use provider::IntegrationProvider;
