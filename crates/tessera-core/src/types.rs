// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common value types shared by providers, installations, and the registry.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::TesseraError;

/// Globally unique identifier of an integration provider (e.g. `"github"`).
///
/// Keys are non-empty and consist of lowercase ASCII letters, digits, `-` and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderKey(String);

impl ProviderKey {
    /// Parse and validate a provider key.
    pub fn new(key: impl Into<String>) -> Result<Self, TesseraError> {
        let key = key.into();
        if key.is_empty() {
            return Err(TesseraError::configuration(
                "<unnamed>",
                "provider key must not be empty",
            ));
        }
        if !key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            return Err(TesseraError::configuration(
                key.clone(),
                "provider key may only contain lowercase letters, digits, '-' and '_'",
            ));
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ProviderKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProviderKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProviderKey {
    type Error = TesseraError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProviderKey> for String {
    fn from(key: ProviderKey) -> Self {
        key.0
    }
}

/// Identifier of the organization an installation is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrganizationId(pub String);

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the user (or system actor) that triggered a lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub String);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Closed set of capability tags a provider may declare.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Link errors to issues in an external tracker.
    IssueLinking,
    /// Two-way sync of issue status, assignees, and comments.
    IssueSync,
    /// Track commits and releases from a source-control host.
    CommitTracking,
    /// Deliver notifications into a chat tool.
    ChatNotifications,
    /// Render rich previews of links posted in chat.
    ChatUnfurl,
    /// Link stack trace frames to source files.
    StacktraceLinking,
    /// Act as an alert rule action.
    AlertRule,
    /// Create tickets automatically from alert rules.
    TicketRules,
    /// Page on-call responders for incidents.
    IncidentManagement,
    /// Import code owners files.
    Codeowners,
    /// Map external users to organization members.
    UserMapping,
    /// Forward events to an external data sink.
    DataForwarding,
    /// Track deploys.
    Deployment,
    /// Instrument serverless functions.
    Serverless,
    /// Mobile app integration.
    Mobile,
}

/// Ordered set of [`Feature`]s declared by a provider.
///
/// Iteration order follows the enum declaration order, so listings are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSet(BTreeSet<Feature>);

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, feature: Feature) -> bool {
        self.0.contains(&feature)
    }

    pub fn insert(&mut self, feature: Feature) -> bool {
        self.0.insert(feature)
    }

    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Feature; N]> for FeatureSet {
    fn from(features: [Feature; N]) -> Self {
        features.into_iter().collect()
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|feature| feature.as_ref()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}
