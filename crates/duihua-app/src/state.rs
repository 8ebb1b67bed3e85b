use std::sync::Arc;

use duihua_config::Config;

/// Shared by every task; settings are fixed once the app starts
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
