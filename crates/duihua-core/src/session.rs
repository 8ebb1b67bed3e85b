//! Single owner of every store plus the dialogue engine.
//!
//! The presentation layer sends [`Action`]s in through
//! [`Session::handle_action`] and gets back what to show next. Loads happen
//! outside; their results come back through [`Session::apply_packs`] and
//! [`Session::apply_vocabulary`].

use std::sync::Arc;

use duihua_config::Config;
use duihua_types::{
    Action, DisplayLine, LevelFilter, LevelProgress, MenuItem, SheetRow, View, VocabRow,
};

use crate::content::ContentStore;
use crate::engine::{CurrentScene, DialogueEngine, Phase, Transition};
use crate::error::SessionError;
use crate::language::LanguageProcessor;
use crate::model::{Line, Pack, Scenario};
use crate::progress::ProgressStore;
use crate::sheet::{FlashcardDeck, build_sheet, cheat_sheet};
use crate::vocabulary::{VocabSet, VocabStore};

/// What the caller should do after an action
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Render(View),
    /// Fetch this vocabulary selection and hand it to `apply_vocabulary`
    LoadVocabulary(LevelFilter),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Screen {
    Loading,
    LoadFailed(String),
    Menu,
    Playing,
    Flashcards,
    Vocabulary,
}

pub struct Session {
    processor: Arc<dyn LanguageProcessor>,
    content: ContentStore,
    vocab: VocabStore,
    progress: ProgressStore,
    engine: DialogueEngine,
    filter: LevelFilter,
    flashcards: Option<FlashcardDeck>,
    /// Words first seen in the last completed run, shown on the completion screen
    new_words: Vec<String>,
    max_new_words: usize,
    screen: Screen,
}

impl Session {
    pub fn new(
        config: &Config,
        processor: Arc<dyn LanguageProcessor>,
        progress: ProgressStore,
    ) -> Self {
        Self {
            processor,
            content: ContentStore::new(),
            vocab: VocabStore::new(),
            progress,
            engine: DialogueEngine::new(),
            filter: config.ui.initial_filter,
            flashcards: None,
            new_words: Vec::new(),
            max_new_words: config.ui.max_new_words,
            screen: Screen::Loading,
        }
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    pub fn vocabulary(&self) -> &VocabStore {
        &self.vocab
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn engine(&self) -> &DialogueEngine {
        &self.engine
    }

    pub fn filter(&self) -> LevelFilter {
        self.filter
    }

    /// Merge loaded packs and show the menu
    pub fn apply_packs(&mut self, packs: Vec<Pack>) -> View {
        for pack in packs {
            let title = pack.title.clone();
            let count = self.content.merge_pack(pack);
            tracing::info!("Pack '{title}' merged: {count} scenarios");
        }
        self.show_menu()
    }

    pub fn load_failed(&mut self, message: impl Into<String>) -> View {
        self.screen = Screen::LoadFailed(message.into());
        self.view()
    }

    /// Install a finished vocabulary load. Applied in arrival order.
    pub fn apply_vocabulary(&mut self, selection: LevelFilter, set: VocabSet) -> View {
        self.vocab.replace(selection, set);
        self.view()
    }

    pub fn handle_action(&mut self, action: Action) -> Result<Outcome, SessionError> {
        tracing::debug!("Action: {action:?}");

        match action {
            Action::Quit => return Ok(Outcome::Quit),
            _ if self.screen == Screen::Loading => return Err(SessionError::NotReady),
            _ if matches!(self.screen, Screen::LoadFailed(_)) => {
                return Err(SessionError::LoadFailed);
            }
            Action::ReturnToMenu => {
                self.engine.return_to_menu();
                self.flashcards = None;
            }
            Action::SetFilter(filter) => {
                self.filter = filter;
                self.engine.return_to_menu();
                self.flashcards = None;
            }
            Action::StartScenario(key) => {
                if self.engine.start(&self.content, &key) == Phase::Idle {
                    return Ok(Outcome::Render(self.show_menu()));
                }
                self.screen = Screen::Playing;
                if self.engine.phase() == Phase::Completed {
                    self.complete();
                }
                return Ok(Outcome::Render(self.view()));
            }
            Action::Choose(choice) => {
                if self.screen != Screen::Playing {
                    return Err(SessionError::NotAvailable("no scene is showing"));
                }
                if let Transition::Completed(_) = self.engine.choose(choice)? {
                    self.complete();
                }
                return Ok(Outcome::Render(self.view()));
            }
            Action::Replay => {
                self.engine.reset()?;
                self.flashcards = None;
                self.screen = Screen::Playing;
                if self.engine.phase() == Phase::Completed {
                    self.complete();
                }
                return Ok(Outcome::Render(self.view()));
            }
            Action::ReviewFlashcards => {
                let scenario = self
                    .engine
                    .scenario()
                    .ok_or(SessionError::NotAvailable("no scenario to review"))?;
                self.flashcards = Some(FlashcardDeck::from_scenario(scenario));
                self.screen = Screen::Flashcards;
                return Ok(Outcome::Render(self.view()));
            }
            Action::RevealCard => {
                let deck = self.deck_mut()?;
                deck.reveal();
                return Ok(Outcome::Render(self.view()));
            }
            Action::NextCard => {
                let deck = self.deck_mut()?;
                deck.advance();
                return Ok(Outcome::Render(self.view()));
            }
            Action::SelectVocabLevel(selection) => {
                self.screen = Screen::Vocabulary;
                return Ok(Outcome::LoadVocabulary(selection));
            }
            Action::ShowVocabulary => {
                self.screen = Screen::Vocabulary;
                return Ok(Outcome::Render(self.view()));
            }
        }

        Ok(Outcome::Render(self.show_menu()))
    }

    /// Re-render whatever is on screen
    pub fn view(&self) -> View {
        match &self.screen {
            Screen::Loading => View::Loading {
                message: "Loading scenario packs...".to_string(),
            },
            Screen::LoadFailed(message) => View::LoadFailed {
                message: message.clone(),
            },
            Screen::Menu => self.menu_view(),
            Screen::Playing => self.playing_view(),
            Screen::Flashcards => self.flashcard_view(),
            Screen::Vocabulary => self.vocabulary_view(),
        }
    }

    fn show_menu(&mut self) -> View {
        self.screen = Screen::Menu;
        self.menu_view()
    }

    fn deck_mut(&mut self) -> Result<&mut FlashcardDeck, SessionError> {
        if self.screen != Screen::Flashcards {
            return Err(SessionError::NotAvailable("flashcards are not open"));
        }
        self.flashcards
            .as_mut()
            .ok_or(SessionError::NotAvailable("flashcards are not open"))
    }

    /// Run extraction over the finished scenario and record what was seen
    fn complete(&mut self) {
        let Some(scenario) = self.engine.scenario().cloned() else {
            return;
        };

        let sheet = build_sheet(&scenario);
        let words = self.processor.extract_from_lines(&sheet, self.vocab.set());
        tracing::debug!("'{}' used {} known words", scenario.title, words.len());

        self.new_words = match self.progress.mark_seen(words) {
            Ok(added) => added,
            Err(e) => {
                tracing::warn!("Could not save progress: {e}");
                Vec::new()
            }
        };
    }

    fn menu_view(&self) -> View {
        let items = self
            .content
            .filtered(self.filter)
            .map(|(key, scenario)| MenuItem {
                key: key.to_string(),
                title: scenario.title.clone(),
                pack: scenario.pack.clone(),
                levels: scenario.hsk.clone(),
            })
            .collect();

        let progress = self
            .progress
            .summary()
            .into_iter()
            .map(|(level, seen)| LevelProgress {
                level,
                label: self.processor.level_label(level),
                seen,
            })
            .collect();

        View::Menu {
            filter: self.filter,
            items,
            progress,
        }
    }

    fn playing_view(&self) -> View {
        match self.engine.current_scene() {
            CurrentScene::Scene {
                scenario,
                index,
                scene,
                ..
            } => View::Scene {
                header: scene_header(scenario, index),
                npc: display_line(&scene.npc),
                choices: scene
                    .choices
                    .iter()
                    .map(|choice| display_line(&choice.line))
                    .collect(),
            },
            CurrentScene::Completed { scenario, .. } => self.completed_view(scenario),
            CurrentScene::Idle => self.menu_view(),
        }
    }

    fn completed_view(&self, scenario: &Scenario) -> View {
        let sheet = build_sheet(scenario);
        let rows = cheat_sheet(&sheet, self.filter)
            .into_iter()
            .map(|row| SheetRow {
                line: display_line(row.line),
                above_level: row.above_level,
            })
            .collect();

        View::Completed {
            title: scenario.title.clone(),
            sheet: rows,
            new_words: self.new_words.iter().take(self.max_new_words).cloned().collect(),
        }
    }

    fn flashcard_view(&self) -> View {
        let Some(deck) = self.flashcards.as_ref() else {
            return self.menu_view();
        };

        match deck.current() {
            Some(card) => View::Flashcard {
                position: card.position,
                total: card.total,
                front: card.line.zh.clone(),
                back: card.revealed.then(|| display_line(card.line)),
            },
            None => View::FlashcardsDone,
        }
    }

    fn vocabulary_view(&self) -> View {
        let record = self.progress.load();
        let rows = self
            .vocab
            .set()
            .entries()
            .iter()
            .map(|entry| VocabRow {
                simplified: entry.simplified.clone(),
                pinyin: entry.pinyin.clone(),
                meanings: entry.meanings.joined("; "),
                level: entry.level,
                level_label: self.processor.level_label(entry.level),
                seen: record.contains_key(&entry.simplified),
            })
            .collect();

        View::Vocabulary {
            selection: self.vocab.selection(),
            rows,
        }
    }
}

fn scene_header(scenario: &Scenario, index: usize) -> String {
    format!(
        "{} — 场景 {} / {}",
        scenario.title,
        index + 1,
        scenario.scene_count()
    )
}

fn display_line(line: &Line) -> DisplayLine {
    DisplayLine {
        zh: line.zh.clone(),
        pinyin: line.pinyin.clone(),
        en: line.en.clone(),
        hsk: line.hsk,
    }
}
