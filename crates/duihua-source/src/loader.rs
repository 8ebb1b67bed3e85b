use duihua_config::vocabulary::VocabularyConfig;
use duihua_core::model::{Manifest, Pack};
use duihua_core::vocabulary::{VocabEntry, VocabSet};
use duihua_types::LevelFilter;
use serde_json::Error as JsonError;

use crate::{ContentSource, SourceError};

fn parse_error(file: &str) -> impl FnOnce(JsonError) -> SourceError + '_ {
    move |source| SourceError::ParseError {
        file: file.to_string(),
        source,
    }
}

/// Read the manifest, then every pack it lists. A broken pack is skipped;
/// a broken manifest fails the whole load.
pub async fn load_packs(
    source: &dyn ContentSource,
    manifest_file: &str,
) -> Result<Vec<Pack>, SourceError> {
    tracing::info!("Loading manifest {manifest_file} from {}", source.describe());
    let raw = source.fetch(manifest_file).await?;
    let manifest: Manifest = serde_json::from_str(&raw).map_err(parse_error(manifest_file))?;

    let mut packs = Vec::with_capacity(manifest.packs.len());
    for file in &manifest.packs {
        let pack = match source.fetch(file).await {
            Ok(raw) => serde_json::from_str::<Pack>(&raw).map_err(parse_error(file)),
            Err(e) => Err(e),
        };

        match pack {
            Ok(pack) => {
                tracing::info!("Loaded pack {file}: {} scenarios", pack.scenarios.len());
                packs.push(pack);
            }
            Err(e) => tracing::warn!("Skipping pack {file}: {e}"),
        }
    }

    Ok(packs)
}

/// Fetch the word lists for a selection; "all" merges the configured levels
pub async fn load_vocabulary(
    source: &dyn ContentSource,
    config: &VocabularyConfig,
    selection: LevelFilter,
) -> Result<VocabSet, SourceError> {
    let mut sets = Vec::new();

    for level in config.levels_for(selection) {
        let file = config.file_for_level(level);
        tracing::info!("Loading HSK {level} vocabulary from {file}");

        let raw = source.fetch(&file).await?;
        let mut entries: Vec<VocabEntry> = serde_json::from_str(&raw).map_err(parse_error(&file))?;
        for entry in entries.iter_mut().filter(|e| e.level == 0) {
            entry.level = level;
        }

        sets.push(VocabSet::from_entries(entries));
    }

    Ok(VocabSet::merge(sets))
}
