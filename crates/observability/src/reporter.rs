//! Turns errors and panics into [`CapturedEvent`]s.

use std::any::Any;
use std::error::Error;
use std::sync::Arc;

use chrono::Utc;

use crate::event::{CapturedEvent, EventId, ExceptionInfo, Level, Mechanism};
use crate::scope::Scope;
use crate::sink::ErrorSink;

/// Static labels stamped on every event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReporterOptions {
    pub release: String,
    pub environment: String,
    /// When false, user identity is dropped from events before they reach
    /// the sink.
    pub send_default_pii: bool,
}

impl Default for ReporterOptions {
    fn default() -> Self {
        Self {
            release: "development".to_string(),
            environment: "local".to_string(),
            send_default_pii: true,
        }
    }
}

/// Cheap-to-clone handle used by request handlers to report failures.
#[derive(Clone)]
pub struct Reporter {
    options: Arc<ReporterOptions>,
    sink: Arc<dyn ErrorSink>,
}

impl core::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Reporter")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Reporter {
    pub fn new(options: ReporterOptions, sink: Arc<dyn ErrorSink>) -> Self {
        Self {
            options: Arc::new(options),
            sink,
        }
    }

    /// Report an error that application code caught.
    pub fn capture_error<E: Error>(&self, err: &E, scope: &Scope) -> EventId {
        let mut chain = Vec::new();
        let mut source = err.source();
        while let Some(s) = source {
            chain.push(s.to_string());
            source = s.source();
        }

        let exception = ExceptionInfo {
            kind: short_type_name::<E>().to_string(),
            message: err.to_string(),
            chain,
        };
        self.emit(Level::Error, Mechanism::Handled, exception, scope)
    }

    /// Report a panic payload caught while unwinding out of a handler.
    pub fn capture_panic(&self, payload: &(dyn Any + Send), scope: &Scope) -> EventId {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Box<dyn Any>".to_string()
        };

        let exception = ExceptionInfo {
            kind: "panic".to_string(),
            message,
            chain: Vec::new(),
        };
        self.emit(Level::Fatal, Mechanism::Panic, exception, scope)
    }

    fn emit(
        &self,
        level: Level,
        mechanism: Mechanism,
        exception: ExceptionInfo,
        scope: &Scope,
    ) -> EventId {
        let event_id = EventId::new();
        let user = if self.options.send_default_pii {
            scope.user().cloned()
        } else {
            None
        };

        self.sink.capture(CapturedEvent {
            event_id,
            timestamp: Utc::now(),
            level,
            mechanism,
            exception,
            release: self.options.release.clone(),
            environment: self.options.environment.clone(),
            user,
            tags: scope.tags().clone(),
            extra: scope.extra().clone(),
        });

        event_id
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
