// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as well-formed provider keys and unique organization ids.

use std::collections::HashSet;

use tessera_core::ProviderKey;

use crate::diagnostic::ConfigError;
use crate::model::TesseraConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &TesseraConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.registry.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "registry.log_level `{}` is not one of: {}",
                config.registry.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    for key in &config.registry.disabled_providers {
        if ProviderKey::new(key.as_str()).is_err() {
            errors.push(ConfigError::Validation {
                message: format!("registry.disabled_providers contains malformed provider key `{key}`"),
            });
        }
    }

    let mut seen_ids = HashSet::new();
    for (i, org) in config.organizations.iter().enumerate() {
        if org.id.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("organizations[{i}].id must not be empty"),
            });
        } else if !seen_ids.insert(org.id.as_str()) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate organization id `{}` in [[organizations]] array", org.id),
            });
        }

        if org.flags.iter().any(|flag| flag.trim().is_empty()) {
            errors.push(ConfigError::Validation {
                message: format!("organizations[{i}].flags must not contain empty flag names"),
            });
        }

        for key in &org.disabled_providers {
            if ProviderKey::new(key.as_str()).is_err() {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "organizations[{i}].disabled_providers contains malformed provider key `{key}`"
                    ),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
