//! One-call analytics for a window: series, distribution and summary.

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::Serialize;

use super::{build_daily_series, build_distribution, summarize};
use super::{DailyBucket, DistributionBucket, MoodSummary, TrendPolicy};
use crate::types::JournalEntry;

/// Everything the analytics view renders for one window selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    /// Last day of the window ("today")
    pub reference_date: NaiveDate,
    /// Days actually covered, after capping at `MAX_WINDOW_DAYS`
    pub window_days: usize,
    /// Oldest first, exactly `window_days` long
    pub series: Vec<DailyBucket>,
    /// All-time, not limited to the window
    pub distribution: Vec<DistributionBucket>,
    pub summary: MoodSummary,
}

impl AnalyticsReport {
    /// True when the window holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.summary.total_entries == 0
    }

    /// Days in the window that have entries, oldest first.
    pub fn active_days(&self) -> impl Iterator<Item = &DailyBucket> {
        self.series.iter().filter(|b| b.has_entries())
    }
}

/// Generate the full report for `window_days` ending at `reference_now`.
pub fn generate_report<Tz: TimeZone>(
    entries: &[JournalEntry],
    window_days: usize,
    reference_now: &DateTime<Tz>,
    policy: &TrendPolicy,
) -> AnalyticsReport {
    let series = build_daily_series(entries, window_days, reference_now);
    let distribution = build_distribution(entries);
    let summary = summarize(&series, policy);

    tracing::debug!(
        window_days,
        total_entries = summary.total_entries,
        trend = %summary.trend,
        moods = distribution.len(),
        "Generated analytics report"
    );

    AnalyticsReport {
        reference_date: reference_now.date_naive(),
        window_days: series.len(),
        series,
        distribution,
        summary,
    }
}
