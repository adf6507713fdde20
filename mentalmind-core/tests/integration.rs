//! Integration tests for the ingest + analytics pipeline
//!
//! These tests load `tests/fixtures/journal.json` (a saved `GET /logs`
//! response) and check the reports computed from it end to end.

use chrono::{DateTime, NaiveDate, Utc};
use mentalmind_core::analytics::{generate_report, Trend, TrendPolicy};
use mentalmind_core::ingest::{
    parse_entries, FileJournalSource, InvalidTimestampPolicy, JournalSource, ParsedEntries,
};
use mentalmind_core::{Error, Mood, MoodLabel, WindowPreset};
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn reference_now() -> DateTime<Utc> {
    "2025-03-10T20:00:00Z".parse().unwrap()
}

fn load_fixture() -> ParsedEntries {
    mentalmind_core::logging::init_test();
    let raw = FileJournalSource::new(fixture_path("journal.json"))
        .fetch_entries()
        .expect("fixture should load");
    parse_entries(raw, &Utc, InvalidTimestampPolicy::Skip).expect("skip policy never fails")
}

fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

// ============================================
// Ingest
// ============================================

#[test]
fn test_fixture_skips_unparseable_timestamp() {
    let parsed = load_fixture();

    assert_eq!(parsed.entries.len(), 9);
    assert_eq!(parsed.skipped.len(), 1);
    assert_eq!(parsed.skipped[0].index, 4);
    assert_eq!(parsed.skipped[0].timestamp, "sometime last week");
}

#[test]
fn test_fixture_abort_policy() {
    let raw = FileJournalSource::new(fixture_path("journal.json"))
        .fetch_entries()
        .unwrap();
    let result = parse_entries(raw, &Utc, InvalidTimestampPolicy::Abort);
    assert!(matches!(result, Err(Error::Timestamp { .. })));
}

// ============================================
// Reports
// ============================================

#[test]
fn test_month_report() {
    let parsed = load_fixture();
    let report = generate_report(
        &parsed.entries,
        WindowPreset::Month.days(),
        &reference_now(),
        &TrendPolicy::default(),
    );

    assert_eq!(report.series.len(), 30);
    assert_eq!(report.series[0].date, day("2025-02-09"));
    assert_eq!(report.series[29].date, day("2025-03-10"));

    let active: Vec<_> = report.active_days().collect();
    assert_eq!(active.len(), 6);

    // anxious and calm tie on Feb 21; anxious was written first
    let feb21 = active.iter().find(|b| b.date == day("2025-02-21")).unwrap();
    assert_eq!(feb21.dominant_mood, MoodLabel::Known(Mood::Anxious));
    assert_eq!(feb21.average_score, 2.5);
    assert_eq!(feb21.entry_count, 2);

    // the unrecognized mood scores as neutral
    let today = report.series.last().unwrap();
    assert_eq!(today.dominant_mood, MoodLabel::Known(Mood::Happy));
    assert_eq!(today.average_score, 4.0);

    let summary = &report.summary;
    assert_eq!(summary.total_entries, 8);
    assert!((summary.average_mood - 21.5 / 6.0).abs() < 1e-9);
    assert_eq!(summary.trend, Trend::Improving);
    assert_eq!(summary.active_day_streak, 6);
    assert_eq!(summary.current_streak, 3);
    assert_eq!(summary.longest_streak, 3);
}

#[test]
fn test_week_report_has_no_trend_baseline() {
    let parsed = load_fixture();
    let report = generate_report(
        &parsed.entries,
        WindowPreset::Week.days(),
        &reference_now(),
        &TrendPolicy::default(),
    );

    assert_eq!(report.series.len(), 7);
    assert_eq!(report.summary.total_entries, 4);
    assert_eq!(report.summary.trend, Trend::Stable);
}

#[test]
fn test_quarter_report_excludes_older_entries() {
    let parsed = load_fixture();
    let report = generate_report(
        &parsed.entries,
        WindowPreset::Quarter.days(),
        &reference_now(),
        &TrendPolicy::default(),
    );

    assert_eq!(report.series.len(), 90);
    assert_eq!(report.series[0].date, day("2024-12-11"));
    assert_eq!(report.summary.total_entries, 8);
}

#[test]
fn test_distribution_is_unwindowed() {
    let parsed = load_fixture();
    let report = generate_report(&parsed.entries, 7, &reference_now(), &TrendPolicy::default());

    let dist = &report.distribution;
    let order: Vec<&str> = dist.iter().map(|b| b.mood.as_str()).collect();
    assert_eq!(
        order,
        vec!["happy", "anxious", "calm", "angry", "excited", "grateful", "sad"]
    );
    assert_eq!(dist[0].count, 3);
    assert_eq!(dist[0].percentage, 33);
    assert_eq!(dist[1].percentage, 11);
    assert_eq!(dist[5].color, "#6B7280");
    assert_eq!(dist.iter().map(|b| b.count).sum::<usize>(), 9);
}

#[test]
fn test_reports_are_reproducible() {
    let first = generate_report(&load_fixture().entries, 30, &reference_now(), &TrendPolicy::default());
    let second = generate_report(&load_fixture().entries, 30, &reference_now(), &TrendPolicy::default());
    assert_eq!(first, second);
}
