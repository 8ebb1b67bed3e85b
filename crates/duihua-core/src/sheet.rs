use duihua_types::LevelFilter;

use crate::model::{Line, Scenario};

/// Every line of a scenario: each scene's NPC line followed by its choices
pub fn build_sheet(scenario: &Scenario) -> Vec<Line> {
    scenario
        .scenes
        .iter()
        .flat_map(|scene| {
            std::iter::once(scene.npc.clone())
                .chain(scene.choices.iter().map(|choice| choice.line.clone()))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheatSheetRow<'a> {
    pub line: &'a Line,
    /// Line is harder than the learner's selected level
    pub above_level: bool,
}

pub fn cheat_sheet(sheet: &[Line], filter: LevelFilter) -> Vec<CheatSheetRow<'_>> {
    sheet
        .iter()
        .map(|line| CheatSheetRow {
            line,
            above_level: filter.is_above(line.hsk),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flashcard<'a> {
    pub line: &'a Line,
    pub position: usize,
    pub total: usize,
    pub revealed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashcardStep {
    Card(usize),
    Finished,
}

/// Sequential review over a scenario's sheet
#[derive(Debug, Clone)]
pub struct FlashcardDeck {
    cards: Vec<Line>,
    cursor: usize,
    revealed: bool,
}

impl FlashcardDeck {
    pub fn from_scenario(scenario: &Scenario) -> Self {
        Self {
            cards: build_sheet(scenario),
            cursor: 0,
            revealed: false,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.cards.len()
    }

    pub fn current(&self) -> Option<Flashcard<'_>> {
        self.cards.get(self.cursor).map(|line| Flashcard {
            line,
            position: self.cursor,
            total: self.cards.len(),
            revealed: self.revealed,
        })
    }

    /// Show pinyin, English and level for the current card
    pub fn reveal(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.revealed = true;
        true
    }

    pub fn advance(&mut self) -> FlashcardStep {
        if !self.is_finished() {
            self.cursor += 1;
        }
        self.revealed = false;

        if self.is_finished() {
            FlashcardStep::Finished
        } else {
            FlashcardStep::Card(self.cursor)
        }
    }
}
