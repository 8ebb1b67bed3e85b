use std::env;

use serde::{Deserialize, Serialize};

use self::content::ContentConfig;
use self::storage::StorageConfig;
use self::ui::UiConfig;
use self::vocabulary::VocabularyConfig;

pub mod content;
pub mod storage;
pub mod ui;
pub mod vocabulary;

fn default_home() -> String {
    ".duihua".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_channel_capacity() -> usize {
    64
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub content: ContentConfig,
    pub vocabulary: VocabularyConfig,
    pub storage: StorageConfig,
    pub ui: UiConfig,

    /// Directory for profiles and the progress file
    #[serde(default = "default_home")]
    pub home: String,
    /// Fallback tracing filter when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Capacity of each app <-> UI channel
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    pub fn apply_env(&mut self) {
        if let Ok(packs) = env::var("DUIHUA_PACKS") {
            self.content.source = packs;
        }

        if let Ok(vocab) = env::var("DUIHUA_VOCAB") {
            self.vocabulary.source = vocab;
        }

        if let Ok(file) = env::var("DUIHUA_PROGRESS_FILE") {
            self.storage.progress_file = file;
        }

        if let Some(level) = env::var("DUIHUA_LEVEL").ok().and_then(|v| v.parse().ok()) {
            self.ui.initial_filter = level;
            self.vocabulary.initial_level = level;
        }

        if let Ok(home) = env::var("DUIHUA_HOME") {
            self.home = home;
        }

        if let Ok(filter) = env::var("DUIHUA_LOG") {
            self.log_filter = filter;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            content: ContentConfig::default(),
            vocabulary: VocabularyConfig::default(),
            storage: StorageConfig::default(),
            ui: UiConfig::default(),

            home: default_home(),
            log_filter: default_log_filter(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use duihua_types::LevelFilter;

    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "content": { "source": "/srv/packs" }, "ui": { "initial_filter": "2" } }"#)
                .unwrap();

        assert_eq!(config.content.source, "/srv/packs");
        assert_eq!(config.content.manifest, "packs.json");
        assert_eq!(config.ui.initial_filter, LevelFilter::Level(2));
        assert_eq!(config.vocabulary.all_levels, vec![1, 2]);
        assert_eq!(config.storage.progress_key, "hsk_progress");
    }

    #[test]
    fn vocabulary_files_follow_pattern() {
        let vocab = VocabularyConfig::default();
        assert_eq!(vocab.file_for_level(3), "hsk3.json");
        assert_eq!(vocab.levels_for(LevelFilter::All), vec![1, 2]);
        assert_eq!(vocab.levels_for(LevelFilter::Level(4)), vec![4]);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.vocabulary.initial_level, LevelFilter::Level(1));
        assert_eq!(back.ui.initial_filter, LevelFilter::All);
    }
}
