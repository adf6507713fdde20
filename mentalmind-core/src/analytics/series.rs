//! Daily mood series over a trailing window.

use chrono::{DateTime, Days, NaiveDate, TimeZone};
use serde::Serialize;
use std::collections::HashMap;

use super::tally;
use crate::types::{JournalEntry, Mood, MoodLabel};

/// Average score reported for a day without entries.
///
/// A sentinel, not a computed mean: check [`DailyBucket::has_entries`] to tell
/// "no data" apart from a genuinely neutral day.
pub const NO_DATA_SCORE: f64 = 3.0;

/// Longest window [`build_daily_series`] will produce (ten years).
pub const MAX_WINDOW_DAYS: usize = 3650;

/// One calendar day of the series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyBucket {
    /// Calendar day in the reference time zone
    pub date: NaiveDate,
    /// Most frequent mood that day; first one seen wins a tie
    pub dominant_mood: MoodLabel,
    /// Mean mood score, rounded to one decimal
    pub average_score: f64,
    /// Entries written that day
    pub entry_count: usize,
}

impl DailyBucket {
    /// The no-data bucket for `date`.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            dominant_mood: MoodLabel::Known(Mood::Neutral),
            average_score: NO_DATA_SCORE,
            entry_count: 0,
        }
    }

    pub fn has_entries(&self) -> bool {
        self.entry_count > 0
    }

    /// Chart axis label (e.g. "Mar 07").
    pub fn label(&self) -> String {
        self.date.format("%b %d").to_string()
    }

    fn from_entries(date: NaiveDate, entries: &[&JournalEntry]) -> Self {
        if entries.is_empty() {
            return Self::empty(date);
        }

        let total: u32 = entries.iter().map(|e| u32::from(e.mood.score())).sum();
        let average = f64::from(total) / entries.len() as f64;

        let mut dominant: Option<(&MoodLabel, usize)> = None;
        for (label, count) in tally(entries.iter().map(|e| &e.mood)) {
            // strict comparison keeps the earliest label on a tie
            if dominant.map_or(true, |(_, best)| count > best) {
                dominant = Some((label, count));
            }
        }

        Self {
            date,
            dominant_mood: dominant
                .map(|(label, _)| label.clone())
                .unwrap_or(MoodLabel::Known(Mood::Neutral)),
            average_score: round_to_tenth(average),
            entry_count: entries.len(),
        }
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Build `window_days` contiguous daily buckets ending on `reference_now`'s
/// calendar day, oldest first.
///
/// Entries are placed on their calendar day in `reference_now`'s time zone;
/// entries outside the window are ignored. Within a day, entries are
/// considered in input order. A zero-day window yields an empty series.
///
/// The window is capped at [`MAX_WINDOW_DAYS`], and never reaches back past
/// the earliest representable date, so the series can be shorter than
/// `window_days`. The last bucket is always `reference_now`'s day.
pub fn build_daily_series<Tz: TimeZone>(
    entries: &[JournalEntry],
    window_days: usize,
    reference_now: &DateTime<Tz>,
) -> Vec<DailyBucket> {
    if window_days == 0 {
        return Vec::new();
    }

    let window_days = window_days.min(MAX_WINDOW_DAYS);
    let tz = reference_now.timezone();
    let today = reference_now.date_naive();
    let first_day = today
        .checked_sub_days(Days::new((window_days - 1) as u64))
        .unwrap_or(NaiveDate::MIN);

    // Single pass: index in-window entries by calendar day
    let mut by_day: HashMap<NaiveDate, Vec<&JournalEntry>> = HashMap::new();
    for entry in entries {
        let day = entry.timestamp.with_timezone(&tz).date_naive();
        if day >= first_day && day <= today {
            by_day.entry(day).or_default().push(entry);
        }
    }

    let series: Vec<DailyBucket> = first_day
        .iter_days()
        .take_while(|date| *date <= today)
        .take(window_days)
        .map(|date| match by_day.get(&date) {
            Some(day_entries) => DailyBucket::from_entries(date, day_entries),
            None => DailyBucket::empty(date),
        })
        .collect();

    tracing::debug!(
        entries = entries.len(),
        window_days,
        active_days = by_day.len(),
        "Built daily mood series"
    );

    series
}
