//! All-time mood distribution.

use serde::Serialize;

use super::tally;
use crate::types::{JournalEntry, MoodLabel};

/// One slice of the mood pie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionBucket {
    /// Mood label exactly as it appears on the entries
    pub mood: MoodLabel,
    pub count: usize,
    /// `count / total * 100`, rounded on its own
    pub percentage: u32,
    /// Hex color; neutral gray for unrecognized moods
    pub color: &'static str,
}

/// Count entries per mood over the whole (unwindowed) entry list.
///
/// Sorted by count, highest first; ties keep the order in which the moods
/// first appear in `entries`. Percentages are rounded independently and may
/// not add up to exactly 100. No entries, no buckets.
pub fn build_distribution(entries: &[JournalEntry]) -> Vec<DistributionBucket> {
    if entries.is_empty() {
        return Vec::new();
    }

    let total = entries.len() as f64;
    let mut buckets: Vec<DistributionBucket> = tally(entries.iter().map(|e| &e.mood))
        .into_iter()
        .map(|(mood, count)| DistributionBucket {
            mood: mood.clone(),
            count,
            percentage: (count as f64 / total * 100.0).round() as u32,
            color: mood.color(),
        })
        .collect();

    // sort_by is stable, so first-seen order survives on equal counts
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Mood, NEUTRAL_COLOR};
    use chrono::{DateTime, Utc};

    fn entries(moods: &[&str]) -> Vec<JournalEntry> {
        let ts: DateTime<Utc> = "2025-03-10T15:00:00Z".parse().unwrap();
        moods
            .iter()
            .map(|mood| JournalEntry::new("entry", *mood, ts))
            .collect()
    }

    #[test]
    fn test_empty_distribution() {
        assert!(build_distribution(&[]).is_empty());
    }

    #[test]
    fn test_single_mood_is_one_hundred_percent() {
        let dist = build_distribution(&entries(&["calm"; 12]));

        assert_eq!(dist.len(), 1);
        assert_eq!(dist[0].mood, MoodLabel::Known(Mood::Calm));
        assert_eq!(dist[0].count, 12);
        assert_eq!(dist[0].percentage, 100);
        assert_eq!(dist[0].color, "#06B6D4");
    }

    #[test]
    fn test_sorted_by_count_with_first_seen_ties() {
        let dist = build_distribution(&entries(&[
            "sad", "happy", "angry", "happy", "angry", "happy",
        ]));

        let order: Vec<&str> = dist.iter().map(|b| b.mood.as_str()).collect();
        assert_eq!(order, vec!["happy", "angry", "sad"]);
        assert_eq!(dist[0].count, 3);
        assert_eq!(dist[0].percentage, 50);
        assert_eq!(dist[1].percentage, 33);
        assert_eq!(dist[2].percentage, 17);

        let tied = build_distribution(&entries(&["excited", "anxious", "neutral"]));
        let order: Vec<&str> = tied.iter().map(|b| b.mood.as_str()).collect();
        assert_eq!(order, vec!["excited", "anxious", "neutral"]);
    }

    #[test]
    fn test_percentages_round_independently() {
        let dist = build_distribution(&entries(&["happy", "sad", "calm"]));
        // 33 + 33 + 33
        let sum: u32 = dist.iter().map(|b| b.percentage).sum();
        assert_eq!(sum, 99);
        assert!(dist.iter().all(|b| b.percentage <= 100));
    }

    #[test]
    fn test_unrecognized_mood_counted_verbatim() {
        let dist = build_distribution(&entries(&["Happy", "happy", "Happy"]));

        assert_eq!(dist.len(), 2);
        assert_eq!(dist[0].mood, MoodLabel::Unrecognized("Happy".to_string()));
        assert_eq!(dist[0].count, 2);
        assert_eq!(dist[0].color, NEUTRAL_COLOR);
        assert_eq!(dist[1].mood, MoodLabel::Known(Mood::Happy));
        assert_eq!(dist[1].color, "#10B981");
    }
}
