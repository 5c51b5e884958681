// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Analytics event model and the sink trait the registry emits into.
//!
//! Delivery and storage belong to whoever implements [`AnalyticsSink`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{AsRefStr, Display};

use crate::types::{ActorId, Feature, OrganizationId, ProviderKey};

/// Lifecycle events emitted by providers and installations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, Serialize)]
pub enum IntegrationEvent {
    /// First successful installation of a provider for an organization.
    #[strum(serialize = "integration.added")]
    #[serde(rename = "integration.added")]
    Added,
    /// An organization removed its installation.
    #[strum(serialize = "integration.uninstalled")]
    #[serde(rename = "integration.uninstalled")]
    Uninstalled,
    /// An installation performed a feature-gated action.
    #[strum(serialize = "integration.action")]
    #[serde(rename = "integration.action")]
    ActionPerformed,
}

/// A single lifecycle event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub event_name: IntegrationEvent,
    pub organization_id: OrganizationId,
    pub provider_key: ProviderKey,
    pub actor_id: Option<ActorId>,
    pub timestamp: DateTime<Utc>,
    /// Feature the action was attributed to (action events only).
    pub feature: Option<Feature>,
    /// Provider-specific action name, e.g. `"create_issue"` (action events only).
    pub action: Option<String>,
}

impl AnalyticsEvent {
    /// Create an event stamped with the current time.
    pub fn new(
        event_name: IntegrationEvent,
        organization_id: OrganizationId,
        provider_key: ProviderKey,
        actor_id: Option<ActorId>,
    ) -> Self {
        Self {
            event_name,
            organization_id,
            provider_key,
            actor_id,
            timestamp: Utc::now(),
            feature: None,
            action: None,
        }
    }

    /// Attribute the event to a feature-gated action.
    pub fn with_action(mut self, feature: Feature, action: impl Into<String>) -> Self {
        self.feature = Some(feature);
        self.action = Some(action.into());
        self
    }
}

/// Destination for analytics events.
///
/// Recording is fire-and-forget: sinks must not block for long and must not
/// fail the operation that produced the event.
pub trait AnalyticsSink: Send + Sync {
    fn record(&self, event: AnalyticsEvent);
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl AnalyticsSink for NoopSink {
    fn record(&self, _event: AnalyticsEvent) {}
}
