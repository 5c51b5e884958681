// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Analytics sink that keeps every event in memory.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tessera_core::{AnalyticsEvent, AnalyticsSink, IntegrationEvent};

/// Captures events for later assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events recorded so far, oldest first.
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.lock().clone()
    }

    pub fn event_names(&self) -> Vec<IntegrationEvent> {
        self.lock().iter().map(|e| e.event_name).collect()
    }

    pub fn count(&self, event: IntegrationEvent) -> usize {
        self.lock().iter().filter(|e| e.event_name == event).count()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<AnalyticsEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AnalyticsSink for RecordingSink {
    fn record(&self, event: AnalyticsEvent) {
        self.lock().push(event);
    }
}
