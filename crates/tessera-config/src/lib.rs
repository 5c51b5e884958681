// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Tessera integration registry.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! system, user, and working-directory file lookup, environment variable overrides, and miette
//! diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use tessera_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("disabled providers: {:?}", config.registry.disabled_providers);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, render_to_string, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{AnalyticsBackend, AnalyticsConfig, OrganizationEntry, RegistryConfig, TesseraConfig};

/// Load configuration from the standard file hierarchy and environment, then validate it.
///
/// Extraction errors become diagnostics with spans into whichever config
/// files exist on disk.
pub fn load_and_validate() -> Result<TesseraConfig, Vec<ConfigError>> {
    let config = finish(loader::load_config(), collect_toml_sources)?;
    tracing::debug!(
        organizations = config.organizations.len(),
        disabled = config.registry.disabled_providers.len(),
        "configuration loaded"
    );
    Ok(config)
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<TesseraConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

fn finish(
    extracted: Result<TesseraConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<TesseraConfig, Vec<ConfigError>> {
    let config =
        extracted.map_err(|err| diagnostic::figment_to_config_errors(err, &sources()))?;
    validation::validate_config(&config)?;
    Ok(config)
}

/// Read every config file that exists so diagnostics can point into it.
fn collect_toml_sources() -> Vec<(String, String)> {
    loader::config_files()
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            Some((path.display().to_string(), content))
        })
        .collect()
}
