use std::sync::Arc;

use coursecal_core::FeedConfig;

/// Shared application state: the immutable feed configuration.
///
/// Export files are read fresh on every request to pick up whatever the
/// exporter wrote last, so there is nothing to cache or invalidate here.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<FeedConfig>,
}

impl AppState {
    pub fn new(config: FeedConfig) -> Self {
        AppState {
            config: Arc::new(config),
        }
    }
}
