use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Learner input, UI -> app
    Action(Action),
    /// Next screen to show, app -> UI
    Render(View),
    StatusUpdate {
        status: String,
        loading: bool,
    },
    BackendReady,
}

/// Everything the presentation layer can ask the session to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ReturnToMenu,
    SetFilter(LevelFilter),
    StartScenario(String),
    Choose(usize),
    Replay,
    ReviewFlashcards,
    RevealCard,
    NextCard,
    SelectVocabLevel(LevelFilter),
    ShowVocabulary,
    Quit,
}

/// HSK level selector used by the menu filter, the cheat sheet and the
/// vocabulary level picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LevelFilter {
    #[default]
    All,
    Level(u8),
}

impl LevelFilter {
    /// Whether a scenario tagged with `levels` belongs in the menu
    pub fn matches_any(&self, levels: &[u8]) -> bool {
        match self {
            LevelFilter::All => true,
            LevelFilter::Level(level) => levels.contains(level),
        }
    }

    /// Whether a line is harder than the learner's level; "all" never flags
    pub fn is_above(&self, hsk: u8) -> bool {
        match self {
            LevelFilter::All => false,
            LevelFilter::Level(level) => hsk > *level,
        }
    }
}

impl fmt::Display for LevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelFilter::All => write!(f, "all"),
            LevelFilter::Level(level) => write!(f, "{level}"),
        }
    }
}

impl FromStr for LevelFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(LevelFilter::All);
        }
        let digits = s
            .strip_prefix("hsk")
            .or_else(|| s.strip_prefix("HSK"))
            .unwrap_or(s)
            .trim();
        digits
            .parse::<u8>()
            .map(LevelFilter::Level)
            .map_err(|_| format!("invalid level filter: {s}"))
    }
}

impl TryFrom<String> for LevelFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LevelFilter> for String {
    fn from(value: LevelFilter) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    pub zh: String,
    pub pinyin: String,
    pub en: String,
    pub hsk: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub key: String,
    pub title: String,
    pub pack: Option<String>,
    pub levels: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelProgress {
    pub level: u8,
    pub label: String,
    pub seen: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub line: DisplayLine,
    pub above_level: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabRow {
    pub simplified: String,
    pub pinyin: String,
    pub meanings: String,
    pub level: u8,
    pub level_label: String,
    pub seen: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Loading {
        message: String,
    },
    LoadFailed {
        message: String,
    },
    Menu {
        filter: LevelFilter,
        items: Vec<MenuItem>,
        progress: Vec<LevelProgress>,
    },
    Scene {
        header: String,
        npc: DisplayLine,
        choices: Vec<DisplayLine>,
    },
    Completed {
        title: String,
        sheet: Vec<SheetRow>,
        new_words: Vec<String>,
    },
    Flashcard {
        position: usize,
        total: usize,
        front: String,
        /// Filled once the card is revealed
        back: Option<DisplayLine>,
    },
    FlashcardsDone,
    Vocabulary {
        selection: Option<LevelFilter>,
        rows: Vec<VocabRow>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_level_filters() {
        assert_eq!("all".parse::<LevelFilter>(), Ok(LevelFilter::All));
        assert_eq!("ALL".parse::<LevelFilter>(), Ok(LevelFilter::All));
        assert_eq!("2".parse::<LevelFilter>(), Ok(LevelFilter::Level(2)));
        assert_eq!("HSK 3".parse::<LevelFilter>(), Ok(LevelFilter::Level(3)));
        assert!("two".parse::<LevelFilter>().is_err());
    }

    #[test]
    fn all_filter_never_flags_lines() {
        assert!(!LevelFilter::All.is_above(6));
        assert!(!LevelFilter::All.is_above(100));
        assert!(!LevelFilter::All.is_above(u8::MAX));
        assert!(LevelFilter::Level(1).is_above(2));
        assert!(!LevelFilter::Level(2).is_above(2));
    }

    #[test]
    fn menu_filter_matches_scenario_levels() {
        assert!(LevelFilter::All.matches_any(&[]));
        assert!(LevelFilter::Level(2).matches_any(&[1, 2]));
        assert!(!LevelFilter::Level(3).matches_any(&[1, 2]));
    }
}
