use serde::{Deserialize, Serialize};

fn default_progress_file() -> String {
    "progress.json".to_string()
}

fn default_progress_key() -> String {
    "hsk_progress".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Key-value file; relative paths resolve against the app home directory
    #[serde(default = "default_progress_file")]
    pub progress_file: String,
    /// Key the seen-word record is stored under
    #[serde(default = "default_progress_key")]
    pub progress_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            progress_file: default_progress_file(),
            progress_key: default_progress_key(),
        }
    }
}
