use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

fn default_hsk() -> u8 {
    1
}

/// One spoken line: NPC prompt, learner choice, sheet row or flashcard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub zh: String,
    #[serde(default)]
    pub pinyin: String,
    #[serde(default)]
    pub en: String,
    #[serde(default = "default_hsk")]
    pub hsk: u8,
}

/// Where a choice leads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum NextScene {
    Scene(usize),
    End,
    Menu,
    /// Anything that is neither a scene index nor a known marker
    Invalid(Value),
}

impl NextScene {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, NextScene::Scene(_))
    }
}

impl Default for NextScene {
    fn default() -> Self {
        NextScene::Invalid(Value::Null)
    }
}

impl From<Value> for NextScene {
    fn from(value: Value) -> Self {
        match &value {
            Value::Number(n) => match n.as_u64().and_then(|n| usize::try_from(n).ok()) {
                Some(index) => NextScene::Scene(index),
                None => NextScene::Invalid(value),
            },
            Value::String(s) if s == "end" => NextScene::End,
            Value::String(s) if s == "menu" => NextScene::Menu,
            _ => NextScene::Invalid(value),
        }
    }
}

impl From<NextScene> for Value {
    fn from(next: NextScene) -> Self {
        match next {
            NextScene::Scene(index) => Value::from(index),
            NextScene::End => Value::from("end"),
            NextScene::Menu => Value::from("menu"),
            NextScene::Invalid(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(flatten)]
    pub line: Line,
    #[serde(default)]
    pub next: NextScene,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub npc: Line,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub title: String,
    /// HSK levels the scenario is tagged with, used by the menu filter
    #[serde(default)]
    pub hsk: Vec<u8>,
    #[serde(default)]
    pub scenes: Vec<Scene>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack: Option<String>,
}

impl Scenario {
    pub fn scene(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// `(scene, choice, target)` for every choice pointing past the last scene
    pub fn dangling_targets(&self) -> Vec<(usize, usize, usize)> {
        let count = self.scenes.len();
        self.scenes
            .iter()
            .enumerate()
            .flat_map(|(scene_idx, scene)| {
                scene
                    .choices
                    .iter()
                    .enumerate()
                    .filter_map(move |(choice_idx, choice)| match choice.next {
                        NextScene::Scene(target) if target >= count => {
                            Some((scene_idx, choice_idx, target))
                        }
                        _ => None,
                    })
            })
            .collect()
    }
}

/// Pack file: `{ title, scenarios: { key: Scenario } }`
#[derive(Debug, Clone, Deserialize)]
pub struct Pack {
    #[serde(default)]
    pub title: String,
    /// Kept in file order so the menu lists scenarios as authored
    #[serde(deserialize_with = "ordered_scenarios")]
    pub scenarios: Vec<(String, Scenario)>,
}

/// Manifest file: `{ packs: [file names] }`
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub packs: Vec<String>,
}

fn ordered_scenarios<'de, D>(deserializer: D) -> Result<Vec<(String, Scenario)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedVisitor;

    impl<'de> Visitor<'de> for OrderedVisitor {
        type Value = Vec<(String, Scenario)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of scenario keys to scenarios")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut scenarios = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, scenario)) = map.next_entry::<String, Scenario>()? {
                scenarios.push((key, scenario));
            }
            Ok(scenarios)
        }
    }

    deserializer.deserialize_map(OrderedVisitor)
}
