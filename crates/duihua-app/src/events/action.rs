use duihua_core::session::{Outcome, Session};
use duihua_types::{Action, AppEvent};

use super::LoopContext;
use super::load::spawn_vocabulary_load;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub async fn handle_action(
    session: &mut Session,
    ctx: &LoopContext,
    action: Action,
) -> anyhow::Result<Flow> {
    let outcome = match session.handle_action(action) {
        Ok(outcome) => outcome,
        Err(e) => {
            // Rejected actions leave the session untouched
            tracing::warn!("Action rejected: {e}");
            ctx.app_to_ui_tx
                .send(AppEvent::StatusUpdate {
                    status: e.to_string(),
                    loading: false,
                })
                .await?;
            return Ok(Flow::Continue);
        }
    };

    match outcome {
        Outcome::Render(view) => {
            ctx.app_to_ui_tx.send(AppEvent::Render(view)).await?;
        }
        Outcome::LoadVocabulary(selection) => {
            ctx.app_to_ui_tx
                .send(AppEvent::StatusUpdate {
                    status: format!("Loading vocabulary ({selection})"),
                    loading: true,
                })
                .await?;
            spawn_vocabulary_load(ctx, selection);
        }
        Outcome::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}
