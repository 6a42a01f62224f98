//! Destinations for captured events.
//!
//! Sinks are fire-and-forget: `capture` cannot fail, and a sink that is
//! unavailable must drop the event rather than hold up the request.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::event::CapturedEvent;

pub trait ErrorSink: Send + Sync {
    fn capture(&self, event: CapturedEvent);
}

impl<S> ErrorSink for Arc<S>
where
    S: ErrorSink + ?Sized,
{
    fn capture(&self, event: CapturedEvent) {
        (**self).capture(event)
    }
}

/// Writes every event as one structured `error`-level log record.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn capture(&self, event: CapturedEvent) {
        let tags = serde_json::to_string(&event.tags).unwrap_or_default();
        let extra = serde_json::to_string(&event.extra).unwrap_or_default();
        let user = event
            .user
            .as_ref()
            .and_then(|u| u.email.as_deref())
            .unwrap_or("");

        tracing::error!(
            event_id = %event.event_id,
            level = ?event.level,
            mechanism = ?event.mechanism,
            kind = %event.exception.kind,
            chain = ?event.exception.chain,
            release = %event.release,
            environment = %event.environment,
            user,
            tags = %tags,
            extra = %extra,
            "captured exception: {}",
            event.exception.message
        );
    }
}

/// Keeps captured events in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    inner: Mutex<Vec<CapturedEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CapturedEvent>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ErrorSink for RecordingSink {
    fn capture(&self, event: CapturedEvent) {
        self.lock().push(event);
    }
}

/// Discards everything (reporting disabled).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl ErrorSink for NoopSink {
    fn capture(&self, _event: CapturedEvent) {}
}
