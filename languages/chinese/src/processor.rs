use duihua_core::language::LanguageProcessor;
use unicode_normalization::UnicodeNormalization;

use crate::hsk::HskLevel;

/// Chinese text processor
#[derive(Debug, Default, Clone)]
pub struct ChineseProcessor;

impl ChineseProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageProcessor for ChineseProcessor {
    fn language_code(&self) -> &str {
        "zh"
    }

    /// NFKC, no whitespace, lowercase
    fn normalize(&self, text: &str) -> String {
        text.nfkc()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect()
    }

    fn level_label(&self, level: u8) -> String {
        match HskLevel::from_number(level) {
            Some(hsk) => hsk.description().to_string(),
            None => {
                tracing::debug!("Level {level} is outside HSK 1-6");
                format!("Level {level}")
            }
        }
    }
}
