use duihua_types::AppEvent;

use crate::render::render;
use crate::state::UiState;

/// Apply one app event to the UI state, returning text to print if any
pub fn handle_events(event: AppEvent, state: &mut UiState) -> Option<String> {
    match event {
        AppEvent::Render(view) => {
            tracing::debug!("[UI] Rendering {}", view_name(&view));
            state.show(view);
            redraw(state)
        }
        AppEvent::StatusUpdate { status, loading } => {
            let line = if loading {
                format!("… {status}\n")
            } else {
                format!("{status}\n")
            };
            state.status = Some(status);
            Some(line)
        }
        AppEvent::BackendReady => {
            tracing::debug!("[UI] Backend ready");
            None
        }
        AppEvent::Action(action) => {
            tracing::warn!("[UI] Ignoring action sent to the UI: {:?}", action);
            None
        }
    }
}

pub fn redraw(state: &UiState) -> Option<String> {
    state
        .view
        .as_ref()
        .map(|view| render(view, &state.revealed))
}

fn view_name(view: &duihua_types::View) -> &'static str {
    use duihua_types::View;
    match view {
        View::Loading { .. } => "loading",
        View::LoadFailed { .. } => "load failure",
        View::Menu { .. } => "menu",
        View::Scene { .. } => "scene",
        View::Completed { .. } => "completion",
        View::Flashcard { .. } => "flashcard",
        View::FlashcardsDone => "flashcards done",
        View::Vocabulary { .. } => "vocabulary",
    }
}
