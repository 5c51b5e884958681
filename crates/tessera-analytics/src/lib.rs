// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Analytics sinks for the Tessera integration registry.
//!
//! The registry and installations emit [`AnalyticsEvent`]s into an
//! [`AnalyticsSink`]; this crate provides the sinks a host can pick from
//! configuration. Transport to an analytics backend is left to whatever
//! consumes the logs or scrapes the metrics.

pub mod recording;

use std::sync::Arc;

use tessera_config::{AnalyticsBackend, AnalyticsConfig};
use tessera_core::{AnalyticsEvent, AnalyticsSink, NoopSink};

pub use recording::{describe_metrics, record_event};

/// Writes each event as a structured `info` log line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn record(&self, event: AnalyticsEvent) {
        let feature: Option<&'static str> = event.feature.map(Into::into);
        tracing::info!(
            event = %event.event_name,
            provider = %event.provider_key,
            organization = %event.organization_id,
            actor = event.actor_id.as_ref().map(|a| a.0.as_str()),
            feature,
            action = event.action.as_deref(),
            timestamp = %event.timestamp.to_rfc3339(),
            "integration analytics event"
        );
    }
}

/// Increments `metrics` counters for each event.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSink;

impl AnalyticsSink for MetricsSink {
    fn record(&self, event: AnalyticsEvent) {
        record_event(&event);
    }
}

/// Forwards every event to each inner sink in order.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn AnalyticsSink>>,
}

impl FanoutSink {
    pub fn new(sinks: Vec<Arc<dyn AnalyticsSink>>) -> Self {
        Self { sinks }
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl AnalyticsSink for FanoutSink {
    fn record(&self, event: AnalyticsEvent) {
        if let Some((last, rest)) = self.sinks.split_last() {
            for sink in rest {
                sink.record(event.clone());
            }
            last.record(event);
        }
    }
}

/// Build the sink selected by the `[analytics]` configuration section.
pub fn sink_from_config(config: &AnalyticsConfig) -> Arc<dyn AnalyticsSink> {
    if !config.enabled {
        tracing::debug!("analytics disabled by configuration");
        return Arc::new(NoopSink);
    }

    match config.backend {
        AnalyticsBackend::Tracing => Arc::new(TracingSink),
        AnalyticsBackend::Metrics => {
            describe_metrics();
            Arc::new(MetricsSink)
        }
        AnalyticsBackend::Both => {
            describe_metrics();
            let sinks: Vec<Arc<dyn AnalyticsSink>> = vec![Arc::new(TracingSink), Arc::new(MetricsSink)];
            Arc::new(FanoutSink::new(sinks))
        }
    }
}
