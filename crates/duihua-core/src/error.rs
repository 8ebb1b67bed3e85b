#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("No scenario is being played")]
    NotInScene,

    #[error("Scene {scene} has no choice {choice}")]
    NoSuchChoice { scene: usize, choice: usize },

    #[error("No scenario to replay")]
    NothingToReplay,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid store format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Content is still loading")]
    NotReady,

    #[error("Content failed to load; only quitting is possible")]
    LoadFailed,

    #[error("Action not available here: {0}")]
    NotAvailable(&'static str),
}
