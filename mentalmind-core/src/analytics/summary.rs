//! Summary statistics for the dashboard cards.
//!
//! Provides the average mood, entry totals, trend classification and activity
//! streaks derived from a daily series.

use serde::Serialize;
use std::fmt;

use super::DailyBucket;

/// Direction the mood is heading in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Declining => "declining",
            Trend::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Knobs for trend classification.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPolicy {
    /// Trailing buckets that count as "recent"; the rest are "earlier"
    pub recent_days: usize,
    /// Minimum difference in mean score before a direction is reported
    pub threshold: f64,
    /// Active buckets each side needs before any direction is reported
    pub min_active_days: usize,
}

impl Default for TrendPolicy {
    fn default() -> Self {
        Self {
            recent_days: 7,
            threshold: 0.3,
            min_active_days: 2,
        }
    }
}

/// Scalar statistics over a daily series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodSummary {
    /// Mean `average_score` over days with entries; 0 when there are none
    pub average_mood: f64,
    pub total_entries: usize,
    pub trend: Trend,
    /// Number of days in the window with at least one entry (not necessarily consecutive)
    pub active_day_streak: usize,
    /// Consecutive active days ending on the last day of the series
    pub current_streak: usize,
    /// Longest run of consecutive active days in the series
    pub longest_streak: usize,
}

/// Derive [`MoodSummary`] from a daily series.
pub fn summarize(series: &[DailyBucket], policy: &TrendPolicy) -> MoodSummary {
    let (current_streak, longest_streak) = calculate_streaks(series);

    MoodSummary {
        average_mood: mean_active_score(series).unwrap_or(0.0),
        total_entries: series.iter().map(|b| b.entry_count).sum(),
        trend: classify_trend(series, policy),
        active_day_streak: series.iter().filter(|b| b.has_entries()).count(),
        current_streak,
        longest_streak,
    }
}

/// Mean score over buckets that have entries.
fn mean_active_score(buckets: &[DailyBucket]) -> Option<f64> {
    let (sum, count) = buckets
        .iter()
        .filter(|b| b.has_entries())
        .fold((0.0, 0usize), |(sum, count), b| (sum + b.average_score, count + 1));
    (count > 0).then(|| sum / count as f64)
}

fn classify_trend(series: &[DailyBucket], policy: &TrendPolicy) -> Trend {
    let split = series.len().saturating_sub(policy.recent_days);
    let (earlier, recent) = series.split_at(split);

    let active = |buckets: &[DailyBucket]| buckets.iter().filter(|b| b.has_entries()).count();
    let required = policy.min_active_days.max(1);
    if active(recent) < required || active(earlier) < required {
        return Trend::Stable;
    }

    let (Some(recent_avg), Some(earlier_avg)) =
        (mean_active_score(recent), mean_active_score(earlier))
    else {
        return Trend::Stable;
    };

    if recent_avg > earlier_avg + policy.threshold {
        Trend::Improving
    } else if recent_avg < earlier_avg - policy.threshold {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

/// Calculate streaks from the series.
/// Returns (current_streak, longest_streak).
pub fn calculate_streaks(series: &[DailyBucket]) -> (usize, usize) {
    let mut longest_streak = 0;
    let mut streak = 0;

    // Oldest to newest
    for bucket in series {
        if bucket.has_entries() {
            streak += 1;
            longest_streak = longest_streak.max(streak);
        } else {
            streak = 0;
        }
    }

    // The current streak must include the last day, so count back from it
    let current_streak = series.iter().rev().take_while(|b| b.has_entries()).count();

    (current_streak, longest_streak)
}
