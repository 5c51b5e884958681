// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Tessera integration tests.
//!
//! Provides a mock provider and test harness infrastructure for fast,
//! deterministic tests without third-party services.
//!
//! # Components
//!
//! - [`AcmeProvider`] - Mock `acme` provider with a typed config schema and scripted validation
//! - [`RecordingSink`] - Analytics sink that captures events in memory
//! - [`RegistryHarness`] - Registry with `acme` registered and analytics recorded

pub mod acme;
pub mod harness;
pub mod recording;

pub use acme::{
    valid_config, AcmeConfig, AcmeInstallation, AcmeIssue, AcmeMessage, AcmeProvider,
    ValidationOutcome, ACME_KEY,
};
pub use harness::{RegistryHarness, RegistryHarnessBuilder};
pub use recording::RecordingSink;
