/// Locally persisted preferences: the best score so far and the theme flag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Preferences {
    pub high_score: f64,
    pub dark_mode: bool,
}

impl Preferences {
    #[must_use]
    pub fn new(high_score: f64, dark_mode: bool) -> Self {
        Self {
            high_score,
            dark_mode,
        }
    }
}

/// Names of the two persisted preference entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    HighScore,
    Theme,
}

impl PreferenceKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PreferenceKey::HighScore => "highScore",
            PreferenceKey::Theme => "theme",
        }
    }
}
