use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;

use crate::model::Line;
use crate::vocabulary::{VocabEntry, VocabSet};

/// Text processing and vocabulary matching for a target language
pub trait LanguageProcessor: Send + Sync {
    /// Language identifier (ISO 639-1 code: "zh", "ja", ...)
    fn language_code(&self) -> &str;

    /// Normalize text before matching
    fn normalize(&self, text: &str) -> String {
        text.nfkc().filter(|c| !c.is_whitespace()).collect()
    }

    /// Human label for a proficiency level
    fn level_label(&self, level: u8) -> String {
        format!("Level {level}")
    }

    /// Entries of `vocab` occurring anywhere inside `text`
    fn extract_words<'v>(&self, text: &str, vocab: &'v VocabSet) -> Vec<&'v VocabEntry> {
        let text = self.normalize(text);
        vocab
            .entries()
            .iter()
            .filter(|entry| {
                let word = self.normalize(&entry.simplified);
                !word.is_empty() && text.contains(&word)
            })
            .collect()
    }

    /// Words spoken across a whole sheet, deduplicated by simplified form in
    /// first-occurrence order
    fn extract_from_lines<'v>(&self, lines: &[Line], vocab: &'v VocabSet) -> Vec<&'v VocabEntry> {
        let mut seen = HashSet::new();
        lines
            .iter()
            .flat_map(|line| self.extract_words(&line.zh, vocab))
            .filter(|entry| seen.insert(entry.simplified.clone()))
            .collect()
    }
}

/// Plain substring match with no normalization
pub fn extract_words<'v>(text: &str, vocab: &'v VocabSet) -> Vec<&'v VocabEntry> {
    vocab
        .entries()
        .iter()
        .filter(|entry| !entry.simplified.is_empty() && text.contains(entry.simplified.as_str()))
        .collect()
}

pub struct DefaultProcessor;

impl LanguageProcessor for DefaultProcessor {
    fn language_code(&self) -> &str {
        "und"
    }
}
