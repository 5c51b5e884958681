// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Tessera integration registry.

use thiserror::Error;

use crate::types::Feature;

/// The primary error type used across the registry, providers, and installations.
///
/// Structural errors (`DuplicateProvider`, `ProviderNotFound`, `Configuration`)
/// are raised synchronously by the call that triggered them. Installation I/O
/// failures always arrive as `Authentication` or `Connectivity`.
#[derive(Debug, Error)]
pub enum TesseraError {
    /// A different provider is already registered under this key.
    #[error("duplicate provider: `{key}` is already registered by another provider")]
    DuplicateProvider { key: String },

    /// No provider is registered under this key.
    #[error("provider not found: `{key}`")]
    ProviderNotFound { key: String },

    /// Malformed provider descriptor or organization configuration.
    #[error("configuration error for `{provider}`: {message}")]
    Configuration { provider: String, message: String },

    /// The third-party service rejected the installation's credentials.
    #[error("authentication failed for `{provider}`: {message}")]
    Authentication { provider: String, message: String },

    /// The third-party service could not be reached.
    #[error("connectivity error for `{provider}`: {message}")]
    Connectivity {
        provider: String,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A capability was invoked on an installation whose provider never declared it.
    #[error("provider `{provider}` does not support feature `{feature}`")]
    UnsupportedFeature { provider: String, feature: Feature },
}

impl TesseraError {
    /// Shorthand for a [`TesseraError::Configuration`] error.
    pub fn configuration(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Whether a caller can reasonably recover (retry, prompt for
    /// reconfiguration, treat the integration as unavailable).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ProviderNotFound { .. } | Self::Authentication { .. } | Self::Connectivity { .. }
        )
    }

    /// The provider key this error refers to.
    pub fn provider_key(&self) -> &str {
        match self {
            Self::DuplicateProvider { key } | Self::ProviderNotFound { key } => key,
            Self::Configuration { provider, .. }
            | Self::Authentication { provider, .. }
            | Self::Connectivity { provider, .. }
            | Self::UnsupportedFeature { provider, .. } => provider,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_failures_are_recoverable() {
        let auth = TesseraError::Authentication {
            provider: "acme".into(),
            message: "bad token".into(),
        };
        let conn = TesseraError::Connectivity {
            provider: "acme".into(),
            message: "timed out".into(),
            source: Some(Box::new(std::io::Error::other("reset"))),
        };
        assert!(auth.is_recoverable());
        assert!(conn.is_recoverable());
    }

    #[test]
    fn structural_errors_are_not_recoverable() {
        let dup = TesseraError::DuplicateProvider { key: "acme".into() };
        let cfg = TesseraError::configuration("acme", "missing api_token");
        let unsupported = TesseraError::UnsupportedFeature {
            provider: "acme".into(),
            feature: Feature::CommitTracking,
        };
        assert!(!dup.is_recoverable());
        assert!(!cfg.is_recoverable());
        assert!(!unsupported.is_recoverable());
    }

    #[test]
    fn provider_key_is_reported_for_every_variant() {
        let missing = TesseraError::ProviderNotFound { key: "github".into() };
        assert_eq!(missing.provider_key(), "github");

        let cfg = TesseraError::configuration("slack", "oops");
        assert_eq!(cfg.provider_key(), "slack");
    }

    #[test]
    fn display_mentions_feature_name() {
        let err = TesseraError::UnsupportedFeature {
            provider: "acme".into(),
            feature: Feature::StacktraceLinking,
        };
        assert_eq!(
            err.to_string(),
            "provider `acme` does not support feature `stacktrace_linking`"
        );
    }
}
