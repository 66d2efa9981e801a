// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::relay::{CompletionClient, OpenAiClient};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub completion: Arc<dyn CompletionClient>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let completion = Arc::new(OpenAiClient::new(&config));
        Self { config, completion }
    }

    pub fn with_client(config: Config, completion: Arc<dyn CompletionClient>) -> Self {
        Self { config, completion }
    }
}
