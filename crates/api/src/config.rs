//! Process configuration, read from environment variables.

use std::net::SocketAddr;
use std::str::FromStr;

use storefront_observability::ReporterOptions;

const DEFAULT_RELEASE: &str = "development";
const DEFAULT_ENVIRONMENT: &str = "local";

/// Where captured errors go.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SinkKind {
    /// Structured `error` log records.
    Tracing,
    /// Reporting disabled.
    None,
}

impl FromStr for SinkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tracing" | "log" => Ok(SinkKind::Tracing),
            "none" | "off" => Ok(SinkKind::None),
            other => Err(format!("unknown error sink: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `VERSION`
    pub release: String,
    /// `ENVIRONMENT`
    pub environment: String,
    /// `BIND_ADDR`
    pub bind_addr: SocketAddr,
    /// `ERROR_SINK`
    pub error_sink: SinkKind,
    /// `SEND_DEFAULT_PII`
    pub send_default_pii: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Values that fail to parse
    /// fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let release = lookup("VERSION").unwrap_or_else(|| DEFAULT_RELEASE.to_string());
        let environment =
            lookup("ENVIRONMENT").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        Self {
            release,
            environment,
            bind_addr: parse_or(&lookup, "BIND_ADDR", default_bind_addr()),
            error_sink: parse_or(&lookup, "ERROR_SINK", SinkKind::Tracing),
            send_default_pii: parse_or(&lookup, "SEND_DEFAULT_PII", true),
        }
    }

    pub fn reporter_options(&self) -> ReporterOptions {
        ReporterOptions {
            release: self.release.clone(),
            environment: self.environment.clone(),
            send_default_pii: self.send_default_pii,
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5000))
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => {
            tracing::warn!(key, value = %raw, "invalid config value; using default");
            default
        }
    }
}
