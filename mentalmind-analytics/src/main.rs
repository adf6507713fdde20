//! mentalmind-analytics - Mood analytics CLI
//!
//! Pulls journal entries from the MentalMind journal store (or a JSON export)
//! and prints mood trends and distribution for the last 7, 30 or 90 days.
//!
//! Uses XDG Base Directory specification for file locations:
//! - Config: $XDG_CONFIG_HOME/mentalmind/config.toml (~/.config/mentalmind/config.toml)
//! - Logs: $XDG_STATE_HOME/mentalmind/ (~/.local/state/mentalmind/)

use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone, Utc};
use clap::Parser;
use mentalmind_core::analytics::{generate_report, AnalyticsReport, MAX_WINDOW_DAYS};
use mentalmind_core::format::{format_percentage_bar, format_score, pluralize_days};
use mentalmind_core::ingest::{parse_entries, FileJournalSource, JournalSource};
use mentalmind_core::{Config, RawJournalEntry, SyncJournalClient, WindowPreset};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mentalmind-analytics")]
#[command(about = "Mood trends and distribution from your MentalMind journal")]
#[command(version)]
struct Args {
    /// Lookback window: 7d, 30d or 90d (default: from config, 30d)
    #[arg(long)]
    period: Option<WindowPreset>,

    /// Custom lookback window in days (overrides --period)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=MAX_WINDOW_DAYS as u64))]
    days: Option<u64>,

    /// Read entries from a JSON file instead of the journal service
    #[arg(long)]
    file: Option<PathBuf>,

    /// Journal service base URL (overrides config and MENTALMIND_API_URL)
    #[arg(long)]
    url: Option<String>,

    /// Reference instant for "today" (RFC 3339, default: now)
    #[arg(long)]
    now: Option<String>,

    /// Export format (md = markdown, json = JSON)
    #[arg(long)]
    export: Option<String>,

    /// Write a log file to the XDG state directory
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;

    let _log_guard = if args.verbose {
        let guard = mentalmind_core::logging::init(&config.logging)
            .context("failed to initialize logging")?;
        Some(guard)
    } else {
        None
    };

    let window_days = match (args.days, args.period) {
        (Some(days), _) => days as usize,
        (None, Some(period)) => period.days(),
        (None, None) => config.analytics.default_period.days(),
    };

    let raw = load_raw_entries(&args, &config)?;

    match config
        .analytics
        .fixed_offset()
        .context("invalid analytics.utc_offset")?
    {
        Some(offset) => run(offset, raw, window_days, &args, &config),
        None => run(Local, raw, window_days, &args, &config),
    }
}

fn load_raw_entries(args: &Args, config: &Config) -> Result<Vec<RawJournalEntry>> {
    let source: Box<dyn JournalSource> = match &args.file {
        Some(path) => Box::new(FileJournalSource::new(path)),
        None => {
            let mut api = config.api.clone().with_env_override();
            if let Some(url) = &args.url {
                api.base_url = url.clone();
            }
            Box::new(SyncJournalClient::new(api).context("invalid journal service settings")?)
        }
    };

    source.fetch_entries().map_err(|e| {
        tracing::error!("Failed to load journal entries: {}", e);
        match &args.file {
            Some(path) => anyhow::anyhow!("failed to read {}: {}", path.display(), e),
            None => anyhow::anyhow!(e.user_message()),
        }
    })
}

fn run<Tz: TimeZone>(
    tz: Tz,
    raw: Vec<RawJournalEntry>,
    window_days: usize,
    args: &Args,
    config: &Config,
) -> Result<()> {
    let now = match &args.now {
        Some(value) => DateTime::parse_from_rfc3339(value)
            .with_context(|| format!("invalid --now value {:?} (expected RFC 3339)", value))?
            .with_timezone(&tz),
        None => Utc::now().with_timezone(&tz),
    };

    let parsed = parse_entries(raw, &tz, config.analytics.invalid_timestamps)
        .context("journal contains an unreadable timestamp")?;

    let report = generate_report(
        &parsed.entries,
        window_days,
        &now,
        &config.analytics.trend_policy(),
    );
    let skipped = parsed.skipped.len();

    match args.export.as_deref() {
        Some("json") => print_json(&report, skipped)?,
        Some("md") => print_markdown(&report, skipped),
        Some(other) => anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other),
        None => print_terminal(&report, skipped),
    }

    Ok(())
}

fn print_terminal(report: &AnalyticsReport, skipped: usize) {
    let title = format!("MOOD ANALYTICS: LAST {}", pluralize_days(report.window_days).to_uppercase());

    println!();
    println!("╭{}╮", "─".repeat(60));
    println!("│{:^60}│", title);
    println!("╰{}╯", "─".repeat(60));
    println!();

    if skipped > 0 {
        println!(
            "  Note: skipped {} entr{} with an unreadable timestamp.",
            skipped,
            if skipped == 1 { "y" } else { "ies" }
        );
        println!();
    }

    if report.is_empty() {
        println!("  No journal entries in this period.");
        println!();
    } else {
        let summary = &report.summary;
        println!("SUMMARY");
        println!(
            "   Average mood: {:<12} Total entries: {}",
            format_score(summary.average_mood),
            summary.total_entries
        );
        println!(
            "   Trend:        {:<12} Active days:   {} of {}",
            summary.trend, summary.active_day_streak, report.window_days
        );
        println!(
            "   Streak:       {} current, {} longest",
            pluralize_days(summary.current_streak),
            pluralize_days(summary.longest_streak)
        );
        println!();

        println!("MOOD OVER TIME");
        for bucket in report.active_days() {
            println!(
                "   {}  {} {:<10} {:>4}  ({} entr{})",
                bucket.label(),
                bucket.dominant_mood.emoji(),
                bucket.dominant_mood.as_str(),
                format!("{:.1}", bucket.average_score),
                bucket.entry_count,
                if bucket.entry_count == 1 { "y" } else { "ies" }
            );
        }
        let quiet = report.window_days - report.summary.active_day_streak;
        if quiet > 0 {
            println!("   ({} without entries)", pluralize_days(quiet));
        }
        println!();
    }

    if !report.distribution.is_empty() {
        println!("MOOD DISTRIBUTION (all time)");
        for bucket in &report.distribution {
            println!(
                "   {} {:<10} {} {:>3}%  {}",
                bucket.mood.emoji(),
                bucket.mood.as_str(),
                format_percentage_bar(bucket.percentage, 20),
                bucket.percentage,
                bucket.count
            );
        }
        println!();
    }
}

fn print_markdown(report: &AnalyticsReport, skipped: usize) {
    println!("# Mood Analytics: Last {}", pluralize_days(report.window_days));
    println!();

    if skipped > 0 {
        println!(
            "*Skipped {} entr{} with an unreadable timestamp.*",
            skipped,
            if skipped == 1 { "y" } else { "ies" }
        );
        println!();
    }

    if report.is_empty() {
        println!("*No journal entries in this period.*");
        println!();
    } else {
        let summary = &report.summary;
        println!("## Summary");
        println!();
        println!("| Metric | Value |");
        println!("|--------|-------|");
        println!("| Average Mood | {} |", format_score(summary.average_mood));
        println!("| Total Entries | {} |", summary.total_entries);
        println!("| Trend | {} |", summary.trend);
        println!(
            "| Active Days | {} of {} |",
            summary.active_day_streak, report.window_days
        );
        println!("| Current Streak | {} |", pluralize_days(summary.current_streak));
        println!("| Longest Streak | {} |", pluralize_days(summary.longest_streak));
        println!();

        println!("## Mood Over Time");
        println!();
        println!("| Date | Mood | Score | Entries |");
        println!("|------|------|-------|---------|");
        for bucket in report.active_days() {
            println!(
                "| {} | {} {} | {:.1} | {} |",
                bucket.date,
                bucket.dominant_mood.emoji(),
                bucket.dominant_mood,
                bucket.average_score,
                bucket.entry_count
            );
        }
        println!();
    }

    if !report.distribution.is_empty() {
        println!("## Mood Distribution");
        println!();
        println!("| Mood | Count | Share |");
        println!("|------|-------|-------|");
        for bucket in &report.distribution {
            println!(
                "| {} {} | {} | {}% |",
                bucket.mood.emoji(),
                bucket.mood,
                bucket.count,
                bucket.percentage
            );
        }
        println!();
    }
}

fn print_json(report: &AnalyticsReport, skipped: usize) -> Result<()> {
    let mut json = serde_json::to_value(report).context("failed to serialize report")?;
    json["skipped_entries"] = serde_json::json!(skipped);
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
