pub mod hsk;
pub mod processor;

pub use hsk::HskLevel;
pub use processor::ChineseProcessor;
