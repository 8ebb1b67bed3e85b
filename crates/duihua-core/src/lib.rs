pub mod content;
pub mod engine;
pub mod error;
pub mod language;
pub mod model;
pub mod progress;
pub mod session;
pub mod sheet;
pub mod storage;
pub mod vocabulary;
