use std::collections::BTreeSet;

use duihua_types::View;

/// UI-only state; the session never sees it
#[derive(Debug, Default)]
pub struct UiState {
    pub view: Option<View>,
    /// Scene lines with their translation shown: 0 is the NPC, choices from 1
    pub revealed: BTreeSet<usize>,
    pub status: Option<String>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current view; translation toggles never carry over
    pub fn show(&mut self, view: View) {
        self.revealed.clear();
        self.view = Some(view);
    }

    /// Flip one line's translation. Only meaningful on a scene.
    pub fn toggle(&mut self, line: usize) -> bool {
        let Some(View::Scene { choices, .. }) = &self.view else {
            return false;
        };
        if line > choices.len() {
            return false;
        }

        if !self.revealed.remove(&line) {
            self.revealed.insert(line);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use duihua_types::DisplayLine;

    use super::*;

    fn line(zh: &str) -> DisplayLine {
        DisplayLine {
            zh: zh.into(),
            pinyin: String::new(),
            en: String::new(),
            hsk: 1,
        }
    }

    #[test]
    fn toggles_reset_on_new_view() {
        let mut state = UiState::new();
        let scene = View::Scene {
            header: "h".into(),
            npc: line("npc"),
            choices: vec![line("a")],
        };

        state.show(scene.clone());
        assert!(state.toggle(0));
        assert!(state.toggle(1));
        assert!(!state.toggle(2));
        assert!(state.toggle(1));
        assert_eq!(state.revealed.iter().copied().collect::<Vec<_>>(), [0]);

        state.show(scene);
        assert!(state.revealed.is_empty());
    }

    #[test]
    fn toggle_needs_a_scene() {
        let mut state = UiState::new();
        assert!(!state.toggle(0));
        state.show(View::FlashcardsDone);
        assert!(!state.toggle(0));
    }
}
