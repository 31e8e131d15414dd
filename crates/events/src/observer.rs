//! Observer hook: where domain code reports its events.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

use crate::event::Event;

/// Receives events as they happen.
///
/// Observers must not influence the flow that notifies them: `notify` has no
/// return value and implementations should not panic.
pub trait Observer<E: Event> {
    fn notify(&self, event: &E);
}

impl<E: Event, O: Observer<E> + ?Sized> Observer<E> for &O {
    fn notify(&self, event: &E) {
        (**self).notify(event)
    }
}

impl<E: Event, O: Observer<E> + ?Sized> Observer<E> for Box<O> {
    fn notify(&self, event: &E) {
        (**self).notify(event)
    }
}

impl<E: Event, O: Observer<E> + ?Sized> Observer<E> for Arc<O> {
    fn notify(&self, event: &E) {
        (**self).notify(event)
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl<E: Event> Observer<E> for NoopObserver {
    fn notify(&self, _event: &E) {}
}

/// Forwards events to `tracing`.
///
/// Adverse events are logged at `warn`, everything else at `info`. The event
/// body is attached as a JSON `payload` field.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl<E: Event + Serialize> Observer<E> for TracingObserver {
    fn notify(&self, event: &E) {
        let payload = serde_json::to_string(event)
            .unwrap_or_else(|e| format!("<unserializable event: {e}>"));

        if event.is_adverse() {
            tracing::warn!(
                event_type = event.event_type(),
                version = event.version(),
                occurred_at = %event.occurred_at(),
                payload = %payload,
                "domain event"
            );
        } else {
            tracing::info!(
                event_type = event.event_type(),
                version = event.version(),
                occurred_at = %event.occurred_at(),
                payload = %payload,
                "domain event"
            );
        }
    }
}

/// Keeps every event in memory, in notification order. Meant for tests and
/// for callers that want to inspect a run afterwards.
#[derive(Debug)]
pub struct RecordingObserver<E> {
    events: Mutex<Vec<E>>,
}

impl<E> RecordingObserver<E> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E> Default for RecordingObserver<E> {
    fn default() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }
}

impl<E: Event> RecordingObserver<E> {
    /// Snapshot of the recorded events.
    pub fn events(&self) -> Vec<E> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Recorded event types, in order.
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(Event::event_type)
            .collect()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl<E: Event> Observer<E> for RecordingObserver<E> {
    fn notify(&self, event: &E) {
        // A poisoned lock only means another notifier panicked mid-push;
        // the vector itself is still usable.
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Ping {
        n: u32,
        at: DateTime<Utc>,
    }

    impl Event for Ping {
        fn event_type(&self) -> &'static str {
            "test.ping"
        }

        fn version(&self) -> u32 {
            1
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            self.at
        }
    }

    fn ping(n: u32) -> Ping {
        Ping { n, at: Utc::now() }
    }

    #[test]
    fn recording_observer_keeps_notification_order() {
        let recorder = RecordingObserver::new();
        recorder.notify(&ping(1));
        recorder.notify(&ping(2));

        let seen: Vec<u32> = recorder.events().iter().map(|p| p.n).collect();
        assert_eq!(seen, vec![1, 2]);
        assert_eq!(recorder.event_types(), vec!["test.ping", "test.ping"]);

        recorder.clear();
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn tracing_observer_does_not_require_a_subscriber() {
        TracingObserver.notify(&ping(3));
    }
}
