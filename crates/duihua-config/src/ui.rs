use duihua_types::LevelFilter;
use serde::{Deserialize, Serialize};

fn default_max_new_words() -> usize {
    20
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Menu filter on startup
    #[serde(default)]
    pub initial_filter: LevelFilter,
    /// How many newly seen words the completion screen lists
    #[serde(default = "default_max_new_words")]
    pub max_new_words: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            initial_filter: LevelFilter::All,
            max_new_words: default_max_new_words(),
        }
    }
}
