use duihua_types::LevelFilter;
use serde::{Deserialize, Serialize};

fn default_source() -> String {
    "./vocab".to_string()
}

fn default_file_pattern() -> String {
    "hsk{level}.json".to_string()
}

fn default_all_levels() -> Vec<u8> {
    vec![1, 2]
}

fn default_initial_level() -> LevelFilter {
    LevelFilter::Level(1)
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct VocabularyConfig {
    /// Directory or base URL holding the per-level word lists
    #[serde(default = "default_source")]
    pub source: String,
    /// File name for one level; `{level}` is replaced by the level number
    #[serde(default = "default_file_pattern")]
    pub file_pattern: String,
    /// Levels merged when "all" is selected
    #[serde(default = "default_all_levels")]
    pub all_levels: Vec<u8>,
    #[serde(default = "default_initial_level")]
    pub initial_level: LevelFilter,
}

impl VocabularyConfig {
    pub fn file_for_level(&self, level: u8) -> String {
        self.file_pattern.replace("{level}", &level.to_string())
    }

    /// Levels to fetch for a selection
    pub fn levels_for(&self, selection: LevelFilter) -> Vec<u8> {
        match selection {
            LevelFilter::All => self.all_levels.clone(),
            LevelFilter::Level(level) => vec![level],
        }
    }
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            file_pattern: default_file_pattern(),
            all_levels: default_all_levels(),
            initial_level: default_initial_level(),
        }
    }
}
