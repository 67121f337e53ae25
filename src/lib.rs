pub mod abstractive;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod extractive;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod rouge;
pub mod text;
pub mod validation;

use std::sync::Arc;
use config::Config;
use pipeline::Summarizer;

pub use logging::setup_logging;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub summarizer: Arc<Summarizer>,
}

impl AppState {
    pub fn new(summarizer: Summarizer) -> Self {
        let config = Arc::new(summarizer.config().clone());
        Self {
            config,
            summarizer: Arc::new(summarizer),
        }
    }
}
