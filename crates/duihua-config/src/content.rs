use serde::{Deserialize, Serialize};

fn default_source() -> String {
    "./packs".to_string()
}

fn default_manifest() -> String {
    "packs.json".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory or base URL holding the manifest and pack files
    #[serde(default = "default_source")]
    pub source: String,
    /// Manifest file name, relative to `source`
    #[serde(default = "default_manifest")]
    pub manifest: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            manifest: default_manifest(),
        }
    }
}
