//! Error events as handed to a sink.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::scope::User;

/// Identifier of a captured event.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Uses UUIDv7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for EventId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0.simple(), f)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Fatal,
}

/// How the error reached the reporter.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mechanism {
    /// Application code caught the error and reported it explicitly.
    Handled,
    /// A request handler panicked and the panic was captured on its way out.
    Panic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExceptionInfo {
    /// Short type name of the error (`"panic"` for panics).
    pub kind: String,
    pub message: String,
    /// Messages of the `source()` chain, outermost first, excluding `message`.
    pub chain: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapturedEvent {
    pub event_id: EventId,
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub mechanism: Mechanism,
    pub exception: ExceptionInfo,
    pub release: String,
    pub environment: String,
    pub user: Option<User>,
    pub tags: BTreeMap<String, String>,
    pub extra: BTreeMap<String, Value>,
}
