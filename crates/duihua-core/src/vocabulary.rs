use std::collections::HashSet;

use duihua_types::LevelFilter;
use serde::{Deserialize, Serialize};

/// `meanings` is either one string or a list in the source files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Meanings {
    One(String),
    Many(Vec<String>),
}

impl Meanings {
    pub fn joined(&self, separator: &str) -> String {
        match self {
            Meanings::One(meaning) => meaning.clone(),
            Meanings::Many(meanings) => meanings.join(separator),
        }
    }
}

impl Default for Meanings {
    fn default() -> Self {
        Meanings::Many(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    pub simplified: String,
    #[serde(default)]
    pub pinyin: String,
    #[serde(default)]
    pub meanings: Meanings,
    /// 0 when the file leaves it out; loaders fill in the file's level
    #[serde(default)]
    pub level: u8,
}

/// Word list keyed by simplified form; the first entry for a form wins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabSet {
    entries: Vec<VocabEntry>,
}

impl VocabSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = VocabEntry>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|entry| seen.insert(entry.simplified.clone()))
            .collect();
        Self { entries }
    }

    /// Concatenate sets in order, dropping later duplicates
    pub fn merge(sets: impl IntoIterator<Item = VocabSet>) -> Self {
        Self::from_entries(sets.into_iter().flat_map(|set| set.entries))
    }

    pub fn entries(&self) -> &[VocabEntry] {
        &self.entries
    }

    pub fn get(&self, simplified: &str) -> Option<&VocabEntry> {
        self.entries.iter().find(|entry| entry.simplified == simplified)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The one vocabulary set currently selected
#[derive(Debug, Default)]
pub struct VocabStore {
    selection: Option<LevelFilter>,
    set: VocabSet,
}

impl VocabStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a freshly loaded set. Last write wins, whatever was requested
    /// before it.
    pub fn replace(&mut self, selection: LevelFilter, set: VocabSet) {
        tracing::info!("Vocabulary '{selection}' loaded: {} words", set.len());
        self.selection = Some(selection);
        self.set = set;
    }

    pub fn selection(&self) -> Option<LevelFilter> {
        self.selection
    }

    pub fn set(&self) -> &VocabSet {
        &self.set
    }

    pub fn is_loaded(&self) -> bool {
        self.selection.is_some()
    }
}
