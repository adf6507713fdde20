//! Core domain types for mentalmind
//!
//! These types model the journal entries served by the journal store and the
//! fixed mood vocabulary used to score and color them.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Mood** | One of the seven known emotional labels |
//! | **Mood label** | The verbatim mood string of an entry, known or not |
//! | **Mood score** | Lossy 1-5 ordinal projection of a mood, used only for averaging |
//! | **Window** | The trailing N-day period a daily series covers |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display color for moods we do not recognize (neutral gray).
pub const NEUTRAL_COLOR: &str = "#6B7280";

// ============================================
// Mood
// ============================================

/// The closed set of moods the journal store can assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Excited,
    Calm,
    Neutral,
    Sad,
    Anxious,
    Angry,
}

impl Mood {
    /// Every known mood, most positive first.
    pub const ALL: [Mood; 7] = [
        Mood::Happy,
        Mood::Excited,
        Mood::Calm,
        Mood::Neutral,
        Mood::Sad,
        Mood::Anxious,
        Mood::Angry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Excited => "excited",
            Mood::Calm => "calm",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
            Mood::Anxious => "anxious",
            Mood::Angry => "angry",
        }
    }

    /// Positivity score on a 1-5 scale.
    ///
    /// Several moods share a score, so this cannot be inverted.
    pub fn score(&self) -> u8 {
        match self {
            Mood::Happy => 5,
            Mood::Excited | Mood::Calm => 4,
            Mood::Neutral => 3,
            Mood::Sad => 2,
            Mood::Anxious | Mood::Angry => 1,
        }
    }

    /// Chart color (hex).
    pub fn color(&self) -> &'static str {
        match self {
            Mood::Happy => "#10B981",
            Mood::Excited => "#F59E0B",
            Mood::Calm => "#06B6D4",
            Mood::Neutral => NEUTRAL_COLOR,
            Mood::Sad => "#3B82F6",
            Mood::Anxious => "#8B5CF6",
            Mood::Angry => "#EF4444",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Excited => "🤩",
            Mood::Calm => "😌",
            Mood::Neutral => "😐",
            Mood::Sad => "😢",
            Mood::Anxious => "😰",
            Mood::Angry => "😠",
        }
    }
}

impl std::str::FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "happy" => Ok(Mood::Happy),
            "excited" => Ok(Mood::Excited),
            "calm" => Ok(Mood::Calm),
            "neutral" => Ok(Mood::Neutral),
            "sad" => Ok(Mood::Sad),
            "anxious" => Ok(Mood::Anxious),
            "angry" => Ok(Mood::Angry),
            _ => Err(format!("unknown mood: {}", s)),
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The mood string attached to an entry, kept verbatim.
///
/// Unrecognized labels are scored and colored as neutral but still counted
/// and displayed under their original text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MoodLabel {
    Known(Mood),
    Unrecognized(String),
}

impl MoodLabel {
    pub fn as_str(&self) -> &str {
        match self {
            MoodLabel::Known(mood) => mood.as_str(),
            MoodLabel::Unrecognized(raw) => raw,
        }
    }

    pub fn known(&self) -> Option<Mood> {
        match self {
            MoodLabel::Known(mood) => Some(*mood),
            MoodLabel::Unrecognized(_) => None,
        }
    }

    pub fn score(&self) -> u8 {
        self.known().unwrap_or(Mood::Neutral).score()
    }

    pub fn color(&self) -> &'static str {
        match self {
            MoodLabel::Known(mood) => mood.color(),
            MoodLabel::Unrecognized(_) => NEUTRAL_COLOR,
        }
    }

    pub fn emoji(&self) -> &'static str {
        self.known().unwrap_or(Mood::Neutral).emoji()
    }
}

impl From<Mood> for MoodLabel {
    fn from(mood: Mood) -> Self {
        MoodLabel::Known(mood)
    }
}

impl From<&str> for MoodLabel {
    fn from(raw: &str) -> Self {
        match raw.parse::<Mood>() {
            Ok(mood) => MoodLabel::Known(mood),
            Err(_) => MoodLabel::Unrecognized(raw.to_string()),
        }
    }
}

impl From<String> for MoodLabel {
    fn from(raw: String) -> Self {
        match raw.parse::<Mood>() {
            Ok(mood) => MoodLabel::Known(mood),
            Err(_) => MoodLabel::Unrecognized(raw),
        }
    }
}

impl From<MoodLabel> for String {
    fn from(label: MoodLabel) -> Self {
        match label {
            MoodLabel::Known(mood) => mood.as_str().to_string(),
            MoodLabel::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// ============================================
// Journal entries
// ============================================

/// A journal entry exactly as `GET /logs` returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawJournalEntry {
    pub text: String,
    pub mood: String,
    /// ISO-8601, with or without an offset
    pub timestamp: String,
}

/// A journal entry with its timestamp resolved to an absolute instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalEntry {
    pub text: String,
    pub mood: MoodLabel,
    pub timestamp: DateTime<Utc>,
}

impl JournalEntry {
    pub fn new(text: impl Into<String>, mood: impl Into<MoodLabel>, timestamp: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            mood: mood.into(),
            timestamp,
        }
    }
}

// ============================================
// Windows
// ============================================

/// Lookback windows offered by the analytics view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum WindowPreset {
    /// Last 7 days
    Week,
    /// Last 30 days
    #[default]
    Month,
    /// Last 90 days
    Quarter,
}

impl WindowPreset {
    pub fn days(&self) -> usize {
        match self {
            WindowPreset::Week => 7,
            WindowPreset::Month => 30,
            WindowPreset::Quarter => 90,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WindowPreset::Week => "7d",
            WindowPreset::Month => "30d",
            WindowPreset::Quarter => "90d",
        }
    }
}

impl std::str::FromStr for WindowPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7d" => Ok(WindowPreset::Week),
            "30d" => Ok(WindowPreset::Month),
            "90d" => Ok(WindowPreset::Quarter),
            _ => Err(format!("unknown period: {} (expected 7d, 30d or 90d)", s)),
        }
    }
}

impl TryFrom<String> for WindowPreset {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_scores() {
        assert_eq!(Mood::Happy.score(), 5);
        assert_eq!(Mood::Excited.score(), 4);
        assert_eq!(Mood::Calm.score(), 4);
        assert_eq!(Mood::Neutral.score(), 3);
        assert_eq!(Mood::Sad.score(), 2);
        assert_eq!(Mood::Anxious.score(), 1);
        assert_eq!(Mood::Angry.score(), 1);
    }

    #[test]
    fn test_mood_parse_is_exact() {
        for mood in Mood::ALL {
            assert_eq!(mood.as_str().parse::<Mood>(), Ok(mood));
        }
        assert!("Happy".parse::<Mood>().is_err());
        assert!("".parse::<Mood>().is_err());
    }

    #[test]
    fn test_unrecognized_label_defaults() {
        let label = MoodLabel::from("melancholy");
        assert_eq!(label, MoodLabel::Unrecognized("melancholy".to_string()));
        assert_eq!(label.as_str(), "melancholy");
        assert_eq!(label.score(), 3);
        assert_eq!(label.color(), NEUTRAL_COLOR);
        assert_eq!(label.emoji(), Mood::Neutral.emoji());
    }

    #[test]
    fn test_mood_label_serde_is_verbatim() {
        let known: MoodLabel = serde_json::from_str("\"calm\"").unwrap();
        assert_eq!(known, MoodLabel::Known(Mood::Calm));

        let odd: MoodLabel = serde_json::from_str("\"Ecstatic\"").unwrap();
        assert_eq!(serde_json::to_string(&odd).unwrap(), "\"Ecstatic\"");
    }

    #[test]
    fn test_raw_entry_deserializes_from_logs_payload() {
        let json = r#"[{"text":"walked the dog","mood":"happy","timestamp":"2025-03-01T08:15:00"}]"#;
        let entries: Vec<RawJournalEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].mood, "happy");
    }

    #[test]
    fn test_window_presets() {
        assert_eq!("7d".parse::<WindowPreset>(), Ok(WindowPreset::Week));
        assert_eq!(WindowPreset::Quarter.days(), 90);
        assert_eq!(WindowPreset::default(), WindowPreset::Month);
        assert!("14d".parse::<WindowPreset>().is_err());
    }
}
