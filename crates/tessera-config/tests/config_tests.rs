// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Tessera configuration system.

use tessera_config::model::{AnalyticsBackend, TesseraConfig};
use tessera_config::{load_and_validate_str, load_config_from_str, ConfigError};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_tessera_config() {
    let toml = r#"
[registry]
disabled_providers = ["legacy-jira"]
log_level = "debug"

[analytics]
enabled = true
backend = "both"

[[organizations]]
id = "org-1"
flags = ["integrations-acme"]
disabled_providers = ["slack"]

[[organizations]]
id = "org-2"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.registry.disabled_providers, vec!["legacy-jira"]);
    assert_eq!(config.registry.log_level, "debug");
    assert!(config.analytics.enabled);
    assert_eq!(config.analytics.backend, AnalyticsBackend::Both);
    assert_eq!(config.organizations.len(), 2);

    let org = config.organization("org-1").unwrap();
    assert_eq!(org.flags, vec!["integrations-acme"]);
    assert_eq!(org.disabled_providers, vec!["slack"]);
    assert!(config.organization("org-2").unwrap().flags.is_empty());
    assert!(config.organization("org-3").is_none());
}

/// Missing sections fall back to defaults.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").unwrap();
    assert!(config.registry.disabled_providers.is_empty());
    assert_eq!(config.registry.log_level, "info");
    assert!(config.analytics.enabled);
    assert_eq!(config.analytics.backend, AnalyticsBackend::Tracing);
    assert!(config.organizations.is_empty());
}

#[test]
fn default_struct_matches_empty_toml() {
    let from_toml = load_config_from_str("").unwrap();
    let default = TesseraConfig::default();
    assert_eq!(from_toml.registry.log_level, default.registry.log_level);
    assert_eq!(from_toml.analytics.enabled, default.analytics.enabled);
}

/// Unknown key in a section produces an UnknownKey diagnostic with a suggestion.
#[test]
fn unknown_key_produces_suggestion() {
    let toml = r#"
[registry]
disabled_provider = ["x"]
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "disabled_provider");
            assert_eq!(suggestion.as_deref(), Some("disabled_providers"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn unknown_top_level_section_is_rejected() {
    let errors = load_and_validate_str("[plugins]\nenabled = true\n").unwrap_err();
    assert!(matches!(errors[0], ConfigError::UnknownKey { .. }));
}

#[test]
fn unknown_analytics_backend_is_rejected() {
    let toml = r#"
[analytics]
backend = "kafka"
"#;
    assert!(load_and_validate_str(toml).is_err());
}

#[test]
fn wrong_type_produces_error() {
    let toml = r#"
[analytics]
enabled = "yes please"
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(!errors.is_empty());
}

#[test]
fn organization_without_id_is_missing_key() {
    let toml = r#"
[[organizations]]
flags = ["integrations-acme"]
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::MissingKey { key, .. } if key == "id")),
        "got {errors:?}"
    );
}

/// Semantic validation runs after successful deserialization.
#[test]
fn duplicate_organizations_fail_validation() {
    let toml = r#"
[[organizations]]
id = "org-1"

[[organizations]]
id = "org-1"
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(matches!(errors[0], ConfigError::Validation { .. }));
}

#[test]
fn diagnostics_render_without_panicking() {
    let errors = load_and_validate_str("[registry]\nlog_levl = \"info\"\n").unwrap_err();
    tessera_config::render_errors(&errors);
    let diagnostic: &dyn miette::Diagnostic = &errors[0];
    assert!(diagnostic.help().is_some());
}

/// A config file at an explicit path is loaded on top of the defaults.
#[test]
fn config_file_at_explicit_path_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tessera.toml");
    std::fs::write(
        &path,
        "[analytics]\nbackend = \"metrics\"\n\n[[organizations]]\nid = \"from-file\"\n",
    )
    .unwrap();

    let config = tessera_config::load_config_from_path(&path).unwrap();
    assert_eq!(config.analytics.backend, AnalyticsBackend::Metrics);
    assert!(config.analytics.enabled);
    assert!(config.organization("from-file").is_some());
    assert_eq!(config.registry.log_level, "info");
}
