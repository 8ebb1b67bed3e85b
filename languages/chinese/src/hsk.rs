/// HSK 2.0 proficiency levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HskLevel {
    Hsk1, // ~150 words
    Hsk2, // ~300 words
    Hsk3, // ~600 words
    Hsk4, // ~1200 words
    Hsk5, // ~2500 words
    Hsk6, // ~5000 words
}

impl HskLevel {
    pub fn from_number(level: u8) -> Option<Self> {
        match level {
            1 => Some(HskLevel::Hsk1),
            2 => Some(HskLevel::Hsk2),
            3 => Some(HskLevel::Hsk3),
            4 => Some(HskLevel::Hsk4),
            5 => Some(HskLevel::Hsk5),
            6 => Some(HskLevel::Hsk6),
            _ => None,
        }
    }

    /// Get level description
    pub fn description(&self) -> &'static str {
        match self {
            HskLevel::Hsk1 => "HSK 1 (Beginner)",
            HskLevel::Hsk2 => "HSK 2 (Elementary)",
            HskLevel::Hsk3 => "HSK 3 (Intermediate)",
            HskLevel::Hsk4 => "HSK 4 (Upper Intermediate)",
            HskLevel::Hsk5 => "HSK 5 (Advanced)",
            HskLevel::Hsk6 => "HSK 6 (Mastery)",
        }
    }
}
