use std::collections::HashMap;
use std::sync::Arc;

use duihua_types::LevelFilter;

use crate::model::{Pack, Scenario};

/// All loaded scenarios keyed by scenario key, in first-insertion order
#[derive(Debug, Default)]
pub struct ContentStore {
    scenarios: HashMap<String, Arc<Scenario>>,
    order: Vec<String>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a scenario. An overwritten key keeps its menu
    /// position. Returns the replaced scenario, if any.
    pub fn insert(&mut self, key: String, scenario: Scenario) -> Option<Arc<Scenario>> {
        let previous = self.scenarios.insert(key.clone(), Arc::new(scenario));
        if previous.is_none() {
            self.order.push(key);
        }
        previous
    }

    /// Merge every scenario of a pack; returns how many were added or replaced
    pub fn merge_pack(&mut self, pack: Pack) -> usize {
        let count = pack.scenarios.len();

        for (key, mut scenario) in pack.scenarios {
            if scenario.pack.is_none() && !pack.title.is_empty() {
                scenario.pack = Some(pack.title.clone());
            }

            for (scene, choice, target) in scenario.dangling_targets() {
                tracing::warn!(
                    "Scenario '{key}': scene {scene} choice {choice} points at missing scene {target}"
                );
            }

            if self.insert(key.clone(), scenario).is_some() {
                tracing::debug!("Scenario '{key}' overwritten by pack '{}'", pack.title);
            }
        }

        count
    }

    pub fn get(&self, key: &str) -> Option<Arc<Scenario>> {
        self.scenarios.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.scenarios.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Scenarios in menu order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scenario)> {
        self.order
            .iter()
            .filter_map(|key| self.scenarios.get(key).map(|s| (key.as_str(), s.as_ref())))
    }

    /// Scenarios whose HSK tags match the menu filter
    pub fn filtered(&self, filter: LevelFilter) -> impl Iterator<Item = (&str, &Scenario)> {
        self.iter()
            .filter(move |(_, scenario)| filter.matches_any(&scenario.hsk))
    }
}
