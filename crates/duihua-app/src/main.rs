use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use duihua_config::Config;
use duihua_core::storage::JsonFileStore;
use duihua_lang_chinese::ChineseProcessor;
use duihua_types::LevelFilter;
use tokio::signal;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, reload};

use self::controller::{AppController, Backends};
use self::state::AppState;

pub mod controller;
pub mod events;
pub mod profile;
pub mod state;

#[cfg(test)]
mod tests;

#[derive(Parser, Debug)]
#[command(name = "duihua")]
#[command(about = "Practice Chinese through branching dialogues")]
struct Cli {
    /// Profile to load from <home>/profiles
    #[arg(long, default_value = "main")]
    profile: String,

    /// Directory or URL holding the scenario packs
    #[arg(long)]
    packs: Option<String>,

    /// Directory or URL holding the HSK word lists
    #[arg(long)]
    vocab: Option<String>,

    /// Progress file, relative to the home directory
    #[arg(long)]
    progress: Option<String>,

    /// Starting HSK level filter ("all" or 1-6)
    #[arg(long)]
    level: Option<LevelFilter>,

    /// Log as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Profile loading logs too, so the subscriber goes up before it
    let startup = Config::new();
    let log_filter = init_logging(&startup.log_filter, cli.log_json);

    let config = load_config(&cli, PathBuf::from(startup.home))?;
    let env_filter_set = std::env::var_os(EnvFilter::DEFAULT_ENV).is_some();
    let switch_to = profile_log_filter(&startup.log_filter, &config.log_filter, env_filter_set);
    if let Some(filter) = switch_to {
        log_filter
            .reload(EnvFilter::new(filter))
            .context("applying the profile log filter")?;
    }

    let runtime = tokio::runtime::Runtime::new().context("starting the tokio runtime")?;
    let result = runtime.block_on(run(config));
    // The stdin reader thread may still be parked on a read
    runtime.shutdown_timeout(Duration::from_millis(200));
    result
}

/// Profile first, then environment, then command line
fn load_config(cli: &Cli, home: PathBuf) -> anyhow::Result<Config> {
    profile::init_user_config(&home)?;

    let mut config = profile::load_user_profile(&home, &cli.profile)?;
    config.apply_env();
    config.home = home.to_string_lossy().into_owned();

    if let Some(packs) = &cli.packs {
        config.content.source = packs.clone();
    }
    if let Some(vocab) = &cli.vocab {
        config.vocabulary.source = vocab.clone();
    }
    if let Some(progress) = &cli.progress {
        config.storage.progress_file = progress.clone();
    }
    if let Some(level) = cli.level {
        config.ui.initial_filter = level;
        config.vocabulary.initial_level = level;
    }

    Ok(config)
}

fn init_logging(default_filter: &str, json: bool) -> reload::Handle<EnvFilter, Registry> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let (filter, handle) = reload::Layer::new(filter);

    // stdout belongs to the UI
    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr));
    let fmt = if json {
        fmt.json().boxed()
    } else {
        fmt.with_target(false).boxed()
    };

    tracing_subscriber::registry().with(filter).with(fmt).init();
    handle
}

/// Filter to switch to once the profile is loaded. RUST_LOG always wins.
fn profile_log_filter<'a>(
    startup: &str,
    profile: &'a str,
    env_filter_set: bool,
) -> Option<&'a str> {
    (!env_filter_set && profile != startup).then_some(profile)
}

async fn run(config: Config) -> anyhow::Result<()> {
    let progress_path = Path::new(&config.home).join(&config.storage.progress_file);
    tracing::info!(
        "Packs from {}, vocabulary from {}, progress in {}",
        config.content.source,
        config.vocabulary.source,
        progress_path.display()
    );

    let backends = Backends {
        processor: Arc::new(ChineseProcessor::new()),
        packs: duihua_source::source_for(&config.content.source),
        vocabulary: duihua_source::source_for(&config.vocabulary.source),
        progress: Box::new(JsonFileStore::new(progress_path)),
    };

    let capacity = config.channel_capacity;
    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state, capacity);
    let mut tasks = controller.spawn_tasks(backends);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Task finished, shutting down"),
                Ok(Err(e)) => tracing::error!("Task failed: {e}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        if let Ok(Err(e)) = result {
            tracing::debug!("Task ended with error during shutdown: {e}");
        }
    }

    Ok(())
}
