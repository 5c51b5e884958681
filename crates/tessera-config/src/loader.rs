// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading.
//!
//! Layers, lowest precedence first: compiled defaults, the system file, the
//! user file, `tessera.toml` in the working directory, then `TESSERA_*`
//! environment variables. Missing files are skipped.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::TesseraConfig;

const FILE_NAME: &str = "tessera.toml";
const SYSTEM_DIR: &str = "/etc/tessera";

/// Sections whose scalar keys can be set from the environment.
const ENV_SECTIONS: [&str; 2] = ["registry", "analytics"];

/// Candidate config files, lowest precedence first.
pub(crate) fn config_files() -> Vec<PathBuf> {
    let system = Path::new(SYSTEM_DIR).join(FILE_NAME);
    let user = dirs::config_dir().map(|dir| dir.join("tessera").join(FILE_NAME));
    let local = std::env::current_dir()
        .map(|dir| dir.join(FILE_NAME))
        .unwrap_or_else(|_| PathBuf::from(FILE_NAME));

    std::iter::once(system).chain(user).chain([local]).collect()
}

fn defaults() -> Figment {
    Figment::from(Serialized::defaults(TesseraConfig::default()))
}

/// The full layered figment: defaults, every config file, then the environment.
pub fn build_figment() -> Figment {
    config_files()
        .into_iter()
        .fold(defaults(), |figment, path| figment.merge(Toml::file(path)))
        .merge(env_overrides())
}

/// Load from the standard files and the environment.
pub fn load_config() -> Result<TesseraConfig, figment::Error> {
    build_figment().extract()
}

/// Load from an inline TOML document, ignoring files and the environment.
pub fn load_config_from_str(toml_content: &str) -> Result<TesseraConfig, figment::Error> {
    defaults().merge(Toml::string(toml_content)).extract()
}

/// Load from one explicit file, still honoring `TESSERA_*` overrides.
pub fn load_config_from_path(path: &Path) -> Result<TesseraConfig, figment::Error> {
    defaults()
        .merge(Toml::file(path))
        .merge(env_overrides())
        .extract()
}

/// `TESSERA_REGISTRY_LOG_LEVEL` becomes `registry.log_level`.
///
/// Only the first underscore after a known section name is a separator, so
/// `TESSERA_REGISTRY_DISABLED_PROVIDERS` keeps `disabled_providers` intact.
fn env_overrides() -> Env {
    Env::prefixed("TESSERA_").map(|key| {
        match key.as_str().split_once('_') {
            Some((section, field)) if ENV_SECTIONS.contains(&section) => {
                format!("{section}.{field}").into()
            }
            _ => key.into(),
        }
    })
}
