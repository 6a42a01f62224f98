//! Shared state handed to every handler.

use std::sync::Arc;

use storefront_inventory::InventoryStore;
use storefront_observability::{ErrorSink, NoopSink, Reporter, TracingSink};

use crate::config::{AppConfig, SinkKind};

#[derive(Debug, Clone)]
pub struct AppServices {
    pub inventory: Arc<InventoryStore>,
    pub reporter: Reporter,
}

impl AppServices {
    pub fn new(inventory: Arc<InventoryStore>, reporter: Reporter) -> Self {
        Self {
            inventory,
            reporter,
        }
    }
}

/// Production wiring: seeded in-memory stock table and the configured sink.
pub fn build_services(config: &AppConfig) -> AppServices {
    let sink: Arc<dyn ErrorSink> = match config.error_sink {
        SinkKind::Tracing => Arc::new(TracingSink),
        SinkKind::None => {
            tracing::warn!("error reporting disabled (ERROR_SINK=none)");
            Arc::new(NoopSink)
        }
    };

    AppServices::new(
        Arc::new(InventoryStore::with_default_seed()),
        Reporter::new(config.reporter_options(), sink),
    )
}
