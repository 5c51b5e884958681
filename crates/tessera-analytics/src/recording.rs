// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric registration and recording helpers.
//!
//! Uses the metrics-rs facade so any recorder (Prometheus, statsd, etc.)
//! installed by the host can collect these metrics.

use metrics::describe_counter;

use tessera_core::AnalyticsEvent;

pub const EVENTS_TOTAL: &str = "tessera_integration_events_total";
pub const ACTIONS_TOTAL: &str = "tessera_integration_actions_total";

/// Register metric descriptions.
///
/// Call once at startup after the host installed its recorder.
pub fn describe_metrics() {
    describe_counter!(EVENTS_TOTAL, "Integration lifecycle events by event name and provider");
    describe_counter!(ACTIONS_TOTAL, "Feature-gated installation actions by provider and feature");
}

/// Record one analytics event as counter increments.
pub fn record_event(event: &AnalyticsEvent) {
    metrics::counter!(
        EVENTS_TOTAL,
        "event" => event.event_name.as_ref().to_string(),
        "provider" => event.provider_key.to_string()
    )
    .increment(1);

    if let Some(feature) = event.feature {
        metrics::counter!(
            ACTIONS_TOTAL,
            "provider" => event.provider_key.to_string(),
            "feature" => feature.as_ref().to_string()
        )
        .increment(1);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};

    use metrics::{
        Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit,
    };
    use tessera_core::{Feature, IntegrationEvent, OrganizationId, ProviderKey};

    type Labels = Vec<(String, String)>;

    /// Recorder that keeps every counter it hands out.
    #[derive(Default)]
    pub(crate) struct Capture {
        counters: Mutex<Vec<(String, Labels, Arc<AtomicU64>)>>,
        described: Mutex<Vec<String>>,
    }

    impl Capture {
        pub(crate) fn value(&self, name: &str, labels: &[(&str, &str)]) -> u64 {
            self.counters
                .lock()
                .unwrap()
                .iter()
                .filter(|(n, l, _)| {
                    n == name
                        && l.len() == labels.len()
                        && l.iter().zip(labels).all(|((k, v), (ek, ev))| k == ek && v == ev)
                })
                .map(|(_, _, cell)| cell.load(Ordering::SeqCst))
                .sum()
        }

        pub(crate) fn total(&self, name: &str) -> u64 {
            self.counters
                .lock()
                .unwrap()
                .iter()
                .filter(|(n, _, _)| n == name)
                .map(|(_, _, cell)| cell.load(Ordering::SeqCst))
                .sum()
        }
    }

    impl Recorder for Capture {
        fn describe_counter(&self, key: KeyName, _unit: Option<Unit>, _description: SharedString) {
            self.described.lock().unwrap().push(key.as_str().to_string());
        }

        fn describe_gauge(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

        fn describe_histogram(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

        fn register_counter(&self, key: &Key, _metadata: &Metadata<'_>) -> Counter {
            let cell = Arc::new(AtomicU64::new(0));
            let labels = key
                .labels()
                .map(|l| (l.key().to_string(), l.value().to_string()))
                .collect();
            self.counters
                .lock()
                .unwrap()
                .push((key.name().to_string(), labels, cell.clone()));
            Counter::from_arc(cell)
        }

        fn register_gauge(&self, _key: &Key, _metadata: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, _key: &Key, _metadata: &Metadata<'_>) -> Histogram {
            Histogram::noop()
        }
    }

    fn event(name: IntegrationEvent) -> AnalyticsEvent {
        AnalyticsEvent::new(
            name,
            OrganizationId("org-1".into()),
            ProviderKey::new("acme").unwrap(),
            None,
        )
    }

    #[test]
    fn lifecycle_event_counts_only_events_total() {
        let capture = Capture::default();
        metrics::with_local_recorder(&capture, || {
            record_event(&event(IntegrationEvent::Added));
            record_event(&event(IntegrationEvent::Uninstalled));
        });

        assert_eq!(
            capture.value(EVENTS_TOTAL, &[("event", "integration.added"), ("provider", "acme")]),
            1
        );
        assert_eq!(
            capture.value(
                EVENTS_TOTAL,
                &[("event", "integration.uninstalled"), ("provider", "acme")]
            ),
            1
        );
        assert_eq!(capture.total(ACTIONS_TOTAL), 0);
    }

    #[test]
    fn action_event_counts_provider_and_feature() {
        let capture = Capture::default();
        metrics::with_local_recorder(&capture, || {
            let action = event(IntegrationEvent::ActionPerformed)
                .with_action(Feature::IssueLinking, "create_issue");
            record_event(&action);
            record_event(&action);
        });

        assert_eq!(
            capture.value(EVENTS_TOTAL, &[("event", "integration.action"), ("provider", "acme")]),
            2
        );
        assert_eq!(
            capture.value(ACTIONS_TOTAL, &[("provider", "acme"), ("feature", "issue_linking")]),
            2
        );
    }

    #[test]
    fn describe_registers_both_counters() {
        let capture = Capture::default();
        metrics::with_local_recorder(&capture, describe_metrics);

        let described = capture.described.lock().unwrap();
        assert_eq!(described.as_slice(), [EVENTS_TOTAL, ACTIONS_TOTAL]);
    }
}
