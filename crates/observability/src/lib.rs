//! Tracing, logging and error reporting (shared setup).
//!
//! Error reporting follows a scope/event model: request-level context is
//! collected on a [`Scope`], and a [`Reporter`] turns an error (or a panic)
//! plus that scope into a [`CapturedEvent`] for an [`ErrorSink`].

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;

pub mod event;
pub mod reporter;
pub mod scope;
pub mod sink;

pub use event::{CapturedEvent, EventId, ExceptionInfo, Level, Mechanism};
pub use reporter::{Reporter, ReporterOptions};
pub use scope::{Scope, User};
pub use sink::{ErrorSink, NoopSink, RecordingSink, TracingSink};
