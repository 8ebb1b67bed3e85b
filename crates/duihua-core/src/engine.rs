use std::sync::Arc;

use crate::content::ContentStore;
use crate::error::EngineError;
use crate::model::{NextScene, Scenario, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    InScene,
    Completed,
}

/// Why a scenario finished
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    End,
    Menu,
    InvalidTarget(NextScene),
    /// Index ran past the last scene
    Overrun(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Continue(usize),
    Completed(Completion),
}

/// What the engine currently points at
#[derive(Debug)]
pub enum CurrentScene<'a> {
    Idle,
    Scene {
        key: &'a str,
        scenario: &'a Scenario,
        index: usize,
        scene: &'a Scene,
    },
    Completed {
        key: &'a str,
        scenario: &'a Scenario,
    },
}

/// Branching dialogue traversal over one scenario at a time
#[derive(Debug, Default)]
pub struct DialogueEngine {
    current: Option<(String, Arc<Scenario>)>,
    index: usize,
    phase: Phase,
}

impl DialogueEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_key(&self) -> Option<&str> {
        self.current.as_ref().map(|(key, _)| key.as_str())
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn scenario(&self) -> Option<&Arc<Scenario>> {
        self.current.as_ref().map(|(_, scenario)| scenario)
    }

    /// Begin a scenario at scene 0. Unknown keys leave the engine idle.
    pub fn start(&mut self, content: &ContentStore, key: &str) -> Phase {
        let Some(scenario) = content.get(key) else {
            tracing::debug!("Unknown scenario '{key}', back to menu");
            self.return_to_menu();
            return self.phase;
        };

        self.phase = if scenario.scenes.is_empty() {
            Phase::Completed
        } else {
            Phase::InScene
        };
        self.current = Some((key.to_string(), scenario));
        self.index = 0;

        tracing::debug!("Started scenario '{key}' ({:?})", self.phase);
        self.phase
    }

    /// Follow `choices[choice].next` of the current scene
    pub fn choose(&mut self, choice: usize) -> Result<Transition, EngineError> {
        if self.phase != Phase::InScene {
            return Err(EngineError::NotInScene);
        }
        let (_, scenario) = self.current.as_ref().ok_or(EngineError::NotInScene)?;

        let Some(scene) = scenario.scene(self.index) else {
            self.phase = Phase::Completed;
            return Ok(Transition::Completed(Completion::Overrun(self.index)));
        };

        let next = scene
            .choices
            .get(choice)
            .map(|c| c.next.clone())
            .ok_or(EngineError::NoSuchChoice {
                scene: self.index,
                choice,
            })?;

        let transition = match next {
            NextScene::Scene(target) if target < scenario.scene_count() => {
                Transition::Continue(target)
            }
            NextScene::Scene(target) => Transition::Completed(Completion::Overrun(target)),
            NextScene::End => Transition::Completed(Completion::End),
            NextScene::Menu => Transition::Completed(Completion::Menu),
            other => Transition::Completed(Completion::InvalidTarget(other)),
        };

        match &transition {
            Transition::Continue(target) => self.index = *target,
            Transition::Completed(reason) => {
                tracing::debug!("Scenario completed: {reason:?}");
                self.phase = Phase::Completed;
            }
        }

        Ok(transition)
    }

    pub fn current_scene(&self) -> CurrentScene<'_> {
        let Some((key, scenario)) = self.current.as_ref() else {
            return CurrentScene::Idle;
        };

        match (self.phase, scenario.scene(self.index)) {
            (Phase::InScene, Some(scene)) => CurrentScene::Scene {
                key,
                scenario,
                index: self.index,
                scene,
            },
            _ => CurrentScene::Completed { key, scenario },
        }
    }

    /// Replay the current scenario from scene 0
    pub fn reset(&mut self) -> Result<Phase, EngineError> {
        let (_, scenario) = self.current.as_ref().ok_or(EngineError::NothingToReplay)?;

        self.index = 0;
        self.phase = if scenario.scenes.is_empty() {
            Phase::Completed
        } else {
            Phase::InScene
        };
        Ok(self.phase)
    }

    pub fn return_to_menu(&mut self) {
        self.current = None;
        self.index = 0;
        self.phase = Phase::Idle;
    }
}
