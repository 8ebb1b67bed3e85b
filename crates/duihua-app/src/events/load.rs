use std::sync::Arc;

use duihua_core::model::Pack;
use duihua_core::session::Session;
use duihua_core::vocabulary::VocabSet;
use duihua_source::{ContentSource, SourceError, load_packs, load_vocabulary};
use duihua_types::{AppEvent, LevelFilter, View};
use kanal::AsyncSender;

use super::LoopContext;

/// Results of background loads, fed back into the event loop
#[derive(Debug)]
pub enum LoadEvent {
    Packs(Result<Vec<Pack>, SourceError>),
    Vocabulary {
        selection: LevelFilter,
        result: Result<VocabSet, SourceError>,
    },
}

pub fn spawn_pack_load(
    source: Arc<dyn ContentSource>,
    manifest: String,
    load_tx: AsyncSender<LoadEvent>,
) {
    tokio::spawn(async move {
        let result = load_packs(source.as_ref(), &manifest).await;
        if load_tx.send(LoadEvent::Packs(result)).await.is_err() {
            tracing::debug!("Event loop gone before packs finished loading");
        }
    });
}

/// Start loading a vocabulary selection. Loads are not cancelled; the last
/// one to finish wins.
pub fn spawn_vocabulary_load(ctx: &LoopContext, selection: LevelFilter) {
    let source = ctx.vocabulary_source.clone();
    let config = ctx.vocabulary_config.clone();
    let load_tx = ctx.load_tx.clone();

    tokio::spawn(async move {
        let result = load_vocabulary(source.as_ref(), &config, selection).await;
        if load_tx
            .send(LoadEvent::Vocabulary { selection, result })
            .await
            .is_err()
        {
            tracing::debug!("Event loop gone before vocabulary finished loading");
        }
    });
}

pub async fn handle_load_event(
    session: &mut Session,
    ctx: &LoopContext,
    event: LoadEvent,
) -> anyhow::Result<()> {
    match event {
        LoadEvent::Packs(Ok(packs)) => {
            let view = session.apply_packs(packs);
            tracing::info!("Content ready: {} scenarios", session.content().len());
            ctx.app_to_ui_tx.send(AppEvent::Render(view)).await?;
            ctx.app_to_ui_tx.send(AppEvent::BackendReady).await?;
        }
        LoadEvent::Packs(Err(e)) => {
            tracing::error!("Failed to load scenario packs: {e}");
            let view = session.load_failed(e.to_string());
            ctx.app_to_ui_tx.send(AppEvent::Render(view)).await?;
        }
        LoadEvent::Vocabulary {
            selection,
            result: Ok(set),
        } => {
            let count = set.len();
            tracing::info!("Vocabulary ({selection}) loaded: {count} words");

            let view = session.apply_vocabulary(selection, set);
            ctx.app_to_ui_tx
                .send(AppEvent::StatusUpdate {
                    status: format!("Loaded {count} words ({selection})"),
                    loading: false,
                })
                .await?;
            // Only the vocabulary table changes with the loaded set
            if matches!(view, View::Vocabulary { .. }) {
                ctx.app_to_ui_tx.send(AppEvent::Render(view)).await?;
            }
        }
        LoadEvent::Vocabulary {
            selection,
            result: Err(e),
        } => {
            tracing::warn!("Failed to load vocabulary ({selection}): {e}");
            ctx.app_to_ui_tx
                .send(AppEvent::StatusUpdate {
                    status: format!("Could not load vocabulary ({selection}): {e}"),
                    loading: false,
                })
                .await?;
        }
    }

    Ok(())
}
