// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock `acme` integration for deterministic testing.
//!
//! `AcmeProvider` implements [`IntegrationProvider`] with a typed
//! configuration schema and scripted validation outcomes, so registry and
//! installation behavior can be exercised without a real third-party service.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde::Deserialize;

use tessera_core::{
    ActorId, Feature, InstallationContext, IntegrationInstallation, IntegrationProvider,
    ProviderDescriptor, TesseraError,
};

/// Key the mock provider registers under.
pub const ACME_KEY: &str = "acme";

/// Organization configuration schema for the `acme` provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AcmeConfig {
    pub api_token: String,
    pub base_url: String,
    #[serde(default)]
    pub project: Option<String>,
}

/// A configuration record that passes `AcmeConfig` validation.
pub fn valid_config() -> serde_json::Value {
    serde_json::json!({
        "api_token": "acme-token-123",
        "base_url": "https://acme.example",
    })
}

/// Result `validate()` reports for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Ok,
    RejectCredentials(String),
    Unreachable(String),
}

type Script = Arc<Mutex<VecDeque<ValidationOutcome>>>;

/// Mock provider for the `acme` issue tracker and chat service.
///
/// Validation outcomes are popped from a FIFO queue shared with every
/// installation the provider builds. When the queue is empty, validation
/// succeeds.
pub struct AcmeProvider {
    descriptor: ProviderDescriptor,
    script: Script,
}

impl AcmeProvider {
    /// Create a provider declaring only [`Feature::IssueLinking`].
    pub fn new() -> Self {
        Self::with_features([Feature::IssueLinking])
    }

    /// Create a provider declaring exactly `features`.
    pub fn with_features(features: impl IntoIterator<Item = Feature>) -> Self {
        let features: Vec<Feature> = features.into_iter().collect();
        let mut builder = ProviderDescriptor::builder(ACME_KEY, "Acme")
            .features(features.iter().copied())
            .description("Link errors to Acme tickets and post alerts to Acme chat.")
            .author("Tessera Contributors")
            .noun("Installation");
        if features.contains(&Feature::IssueLinking) {
            builder = builder.feature_description(
                Feature::IssueLinking,
                "Create Acme tickets from errors.",
            );
        }
        if features.contains(&Feature::ChatNotifications) {
            builder = builder.feature_description(
                Feature::ChatNotifications,
                "Post alert notifications to Acme channels.",
            );
        }

        Self {
            // Fixed key and name; descriptions are only added for declared features.
            descriptor: builder.build().expect("acme descriptor is valid"),
            script: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Queue the outcome of a future `validate()` call.
    pub fn script_validation(&self, outcome: ValidationOutcome) {
        lock(&self.script).push_back(outcome);
    }

    /// Build a concrete installation so tests can call Acme-specific operations.
    pub fn install(&self, ctx: InstallationContext) -> Result<AcmeInstallation, TesseraError> {
        ctx.ensure_bound_to(&self.descriptor)?;
        let config: AcmeConfig = ctx.parse_config()?;
        if config.api_token.trim().is_empty() {
            return Err(TesseraError::configuration(ACME_KEY, "api_token must not be empty"));
        }
        if !config.base_url.starts_with("https://") && !config.base_url.starts_with("http://") {
            return Err(TesseraError::configuration(
                ACME_KEY,
                format!("base_url must be an http(s) URL, got '{}'", config.base_url),
            ));
        }

        tracing::debug!(organization = %ctx.organization_id(), "acme installation built");
        Ok(AcmeInstallation {
            ctx,
            config,
            script: Arc::clone(&self.script),
            issues: Mutex::new(Vec::new()),
            messages: Mutex::new(Vec::new()),
            uninstalled: AtomicBool::new(false),
        })
    }
}

impl Default for AcmeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl IntegrationProvider for AcmeProvider {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    fn build_installation(
        &self,
        ctx: InstallationContext,
    ) -> Result<Box<dyn IntegrationInstallation>, TesseraError> {
        Ok(Box::new(self.install(ctx)?))
    }
}

/// An issue created through [`AcmeInstallation::create_issue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcmeIssue {
    pub id: String,
    pub title: String,
    pub url: String,
}

/// A message posted through [`AcmeInstallation::post_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcmeMessage {
    pub channel: String,
    pub text: String,
}

/// Installation of the mock provider for one organization.
pub struct AcmeInstallation {
    ctx: InstallationContext,
    config: AcmeConfig,
    script: Script,
    issues: Mutex<Vec<AcmeIssue>>,
    messages: Mutex<Vec<AcmeMessage>>,
    uninstalled: AtomicBool,
}

impl AcmeInstallation {
    pub fn acme_config(&self) -> &AcmeConfig {
        &self.config
    }

    /// Create a ticket. Requires [`Feature::IssueLinking`].
    pub async fn create_issue(
        &self,
        title: &str,
        actor: Option<&ActorId>,
    ) -> Result<AcmeIssue, TesseraError> {
        self.ctx.ensure_feature(Feature::IssueLinking)?;

        let issue = {
            let mut issues = lock(&self.issues);
            let number = issues.len() + 1;
            let issue = AcmeIssue {
                id: format!("ACME-{number}"),
                title: title.to_string(),
                url: format!("{}/issues/{number}", self.config.base_url.trim_end_matches('/')),
            };
            issues.push(issue.clone());
            issue
        };

        self.ctx.record_action(Feature::IssueLinking, "create_issue", actor)?;
        Ok(issue)
    }

    /// Post a chat message. Requires [`Feature::ChatNotifications`].
    ///
    /// An empty channel name is rejected by the service.
    pub async fn post_message(
        &self,
        channel: &str,
        text: &str,
        actor: Option<&ActorId>,
    ) -> Result<(), TesseraError> {
        self.ctx.ensure_feature(Feature::ChatNotifications)?;
        if channel.trim().is_empty() {
            return Err(TesseraError::configuration(ACME_KEY, "channel must not be empty"));
        }
        lock(&self.messages).push(AcmeMessage {
            channel: channel.to_string(),
            text: text.to_string(),
        });
        self.ctx.record_action(Feature::ChatNotifications, "post_message", actor)
    }

    pub fn issues(&self) -> Vec<AcmeIssue> {
        lock(&self.issues).clone()
    }

    pub fn messages(&self) -> Vec<AcmeMessage> {
        lock(&self.messages).clone()
    }

    pub fn is_uninstalled(&self) -> bool {
        self.uninstalled.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IntegrationInstallation for AcmeInstallation {
    fn context(&self) -> &InstallationContext {
        &self.ctx
    }

    async fn validate(&self) -> Result<(), TesseraError> {
        let outcome = lock(&self.script).pop_front().unwrap_or(ValidationOutcome::Ok);
        match outcome {
            ValidationOutcome::Ok => Ok(()),
            ValidationOutcome::RejectCredentials(message) => Err(TesseraError::Authentication {
                provider: ACME_KEY.to_string(),
                message,
            }),
            ValidationOutcome::Unreachable(message) => Err(TesseraError::Connectivity {
                provider: ACME_KEY.to_string(),
                message,
                source: None,
            }),
        }
    }

    async fn uninstall(&self) -> Result<(), TesseraError> {
        self.uninstalled.store(true, Ordering::SeqCst);
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
