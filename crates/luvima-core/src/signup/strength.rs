//! Password strength scoring.

use serde::{Deserialize, Serialize};

/// Length at which a password earns the length point.
pub const STRONG_LENGTH: usize = 8;

/// Highest possible score.
pub const MAX_SCORE: u8 = 5;

/// Length of `password` in UTF-16 code units, as a browser text field
/// counts it.
pub fn password_length(password: &str) -> usize {
    password.encode_utf16().count()
}

/// Score a password from 0 to 5.
///
/// One point each for: at least 8 characters, an ASCII lowercase letter,
/// an ASCII uppercase letter, an ASCII digit, and any other character.
pub fn password_strength(password: &str) -> u8 {
    let mut score = 0;

    if password_length(password) >= STRONG_LENGTH {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_lowercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 1;
    }

    score
}

/// Strength bucket shown next to the password field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLevel {
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=2 => StrengthLevel::Weak,
            3 => StrengthLevel::Fair,
            4 => StrengthLevel::Good,
            _ => StrengthLevel::Strong,
        }
    }

    /// Level for `password`, or `None` when it is empty and no indicator
    /// should show.
    pub fn of(password: &str) -> Option<Self> {
        if password.is_empty() {
            None
        } else {
            Some(Self::from_score(password_strength(password)))
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StrengthLevel::Weak => "Weak password",
            StrengthLevel::Fair => "Fair password",
            StrengthLevel::Good => "Good password",
            StrengthLevel::Strong => "Strong password",
        }
    }
}
