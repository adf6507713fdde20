//! Analytics module for mentalmind
//!
//! Turns a flat list of journal entries into the shapes the analytics view
//! draws:
//! - A dense per-day series over a trailing window ([`series`])
//! - The all-time mood distribution ([`distribution`])
//! - Summary statistics for the dashboard cards ([`summary`])
//!
//! Everything here is a pure function of its inputs. "Today" is always passed
//! in as a reference instant, and the calendar day of every entry is taken in
//! that instant's time zone, so the same inputs always give the same output.

pub mod distribution;
pub mod report;
pub mod series;
pub mod summary;

pub use distribution::{build_distribution, DistributionBucket};
pub use report::{generate_report, AnalyticsReport};
pub use series::{build_daily_series, DailyBucket, MAX_WINDOW_DAYS, NO_DATA_SCORE};
pub use summary::{calculate_streaks, summarize, MoodSummary, Trend, TrendPolicy};

use crate::types::MoodLabel;
use std::collections::HashMap;

/// Count mood labels in first-seen order.
///
/// The returned order is the order in which each label first appears, which
/// is what both the dominant-mood pick and the distribution sort fall back on
/// when counts tie.
pub(crate) fn tally<'a, I>(labels: I) -> Vec<(&'a MoodLabel, usize)>
where
    I: IntoIterator<Item = &'a MoodLabel>,
{
    let mut counts: Vec<(&MoodLabel, usize)> = Vec::new();
    let mut position: HashMap<&MoodLabel, usize> = HashMap::new();
    for label in labels {
        match position.get(label) {
            Some(&i) => counts[i].1 += 1,
            None => {
                position.insert(label, counts.len());
                counts.push((label, 1));
            }
        }
    }
    counts
}
