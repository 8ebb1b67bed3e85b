use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::StorageError;
use crate::storage::KeyValueStore;
use crate::vocabulary::VocabEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeenEntry {
    pub level: u8,
    pub seen: bool,
}

/// simplified word -> first-seen record
pub type ProgressRecord = BTreeMap<String, SeenEntry>;

/// Seen-word tracking persisted under a single key
pub struct ProgressStore {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl ProgressStore {
    pub fn new(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Stored entries as raw JSON. Missing data or a non-object reads as empty.
    fn raw_entries(&self) -> Map<String, Value> {
        match self.store.get(&self.key) {
            Ok(Some(Value::Object(entries))) => entries,
            Ok(Some(_)) => {
                tracing::warn!("Progress record is not an object, treating as empty");
                Map::new()
            }
            Ok(None) => Map::new(),
            Err(e) => {
                tracing::warn!("Progress unreadable, treating as empty: {e}");
                Map::new()
            }
        }
    }

    /// Current record; a bad entry is skipped and the rest are kept
    pub fn load(&self) -> ProgressRecord {
        parse_entries(&self.raw_entries())
    }

    /// Record words not seen before; existing entries are never touched.
    /// Entries that do not parse stay in the store as they are, unless the
    /// same word is marked again. Returns the newly seen words in input order.
    pub fn mark_seen<'a>(
        &mut self,
        words: impl IntoIterator<Item = &'a VocabEntry>,
    ) -> Result<Vec<String>, StorageError> {
        let mut raw = self.raw_entries();
        let mut record = parse_entries(&raw);
        let mut added = Vec::new();

        for word in words {
            if record.contains_key(&word.simplified) {
                continue;
            }
            let entry = SeenEntry {
                level: word.level,
                seen: true,
            };
            raw.insert(word.simplified.clone(), serde_json::to_value(entry)?);
            record.insert(word.simplified.clone(), entry);
            added.push(word.simplified.clone());
        }

        if !added.is_empty() {
            self.store.set(&self.key, Value::Object(raw))?;
            tracing::info!("Marked {} new words as seen", added.len());
        }

        Ok(added)
    }

    /// Distinct seen words per level
    pub fn summary(&self) -> BTreeMap<u8, usize> {
        self.load()
            .values()
            .fold(BTreeMap::new(), |mut counts, entry| {
                *counts.entry(entry.level).or_insert(0) += 1;
                counts
            })
    }

    pub fn is_seen(&self, word: &str) -> bool {
        self.load().contains_key(word)
    }
}

fn parse_entries(raw: &Map<String, Value>) -> ProgressRecord {
    raw.iter()
        .filter_map(|(word, entry)| match SeenEntry::deserialize(entry) {
            Ok(entry) => Some((word.clone(), entry)),
            Err(e) => {
                tracing::warn!("Skipping malformed progress entry '{word}': {e}");
                None
            }
        })
        .collect()
}
