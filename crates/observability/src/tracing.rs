//! Process-wide log output for the storefront binaries.
//!
//! One JSON object per line on stdout, fields flattened to the top level so
//! the records written by [`TracingSink`](crate::TracingSink) (event id,
//! tags, release) are directly queryable. Filtering comes from `RUST_LOG`;
//! without it, application logs at `info` plus `tower_http` request traces.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,tower_http=debug";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .json()
        .flatten_event(true)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init();
        init();
        ::tracing::info!("still logging after repeated init");
    }

    #[test]
    fn default_filter_parses() {
        let parsed = EnvFilter::try_new(DEFAULT_FILTER);
        assert!(parsed.is_ok());
    }
}
