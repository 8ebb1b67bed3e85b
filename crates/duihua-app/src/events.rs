use std::sync::Arc;

use duihua_config::vocabulary::VocabularyConfig;
use duihua_core::progress::ProgressStore;
use duihua_core::session::Session;
use duihua_source::ContentSource;
use duihua_types::AppEvent;
use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;

use crate::controller::Backends;
use crate::state::AppState;

pub mod action;
pub mod load;

use action::{Flow, handle_action};
use load::{LoadEvent, handle_load_event, spawn_pack_load, spawn_vocabulary_load};

/// Handles the event loop needs to start background loads and talk to the UI
pub struct LoopContext {
    pub app_to_ui_tx: AsyncSender<AppEvent>,
    pub load_tx: AsyncSender<LoadEvent>,
    pub vocabulary_source: Arc<dyn ContentSource>,
    pub vocabulary_config: VocabularyConfig,
}

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    backends: Backends,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let config = state.config.as_ref();

    let progress = ProgressStore::new(backends.progress, config.storage.progress_key.clone());
    let mut session = Session::new(config, backends.processor, progress);

    let (load_tx, load_rx) = kanal::unbounded_async::<LoadEvent>();
    let ctx = LoopContext {
        app_to_ui_tx,
        load_tx,
        vocabulary_source: backends.vocabulary,
        vocabulary_config: config.vocabulary.clone(),
    };

    let view = session.view();
    ctx.app_to_ui_tx.send(AppEvent::Render(view)).await?;

    spawn_pack_load(
        backends.packs,
        config.content.manifest.clone(),
        ctx.load_tx.clone(),
    );
    spawn_vocabulary_load(&ctx, config.vocabulary.initial_level);

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                return Ok(());
            }
            event = ui_to_app_rx.recv() => {
                let event = event?;
                if handle_events(&mut session, &ctx, event).await? == Flow::Quit {
                    tracing::info!("[EVENT_LOOP] Quit requested");
                    return Ok(());
                }
            }
            load = load_rx.recv() => {
                handle_load_event(&mut session, &ctx, load?).await?;
            }
        }
    }
}

async fn handle_events(
    session: &mut Session,
    ctx: &LoopContext,
    event: AppEvent,
) -> anyhow::Result<Flow> {
    match event {
        AppEvent::Action(action) => handle_action(session, ctx, action).await,
        AppEvent::Render(_) | AppEvent::StatusUpdate { .. } | AppEvent::BackendReady => {
            // UI-only events, ignore in backend
            Ok(Flow::Continue)
        }
    }
}
