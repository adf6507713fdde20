//! Turning journal store payloads into [`JournalEntry`] values.
//!
//! The journal store hands back timestamps as ISO-8601 strings, usually
//! without an offset (the backend writes its local wall-clock time). Those
//! naive timestamps are resolved in the consumer's time zone, the same zone
//! later used to pick each entry's calendar day.

use crate::error::{Error, Result};
use crate::types::{JournalEntry, RawJournalEntry};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Naive date-time layouts accepted after RFC 3339 fails.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// What to do with an entry whose timestamp cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidTimestampPolicy {
    /// Drop the entry, record it, keep going
    #[default]
    Skip,
    /// Fail the whole load on the first bad entry
    Abort,
}

/// An entry dropped during parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    /// Position in the input sequence
    pub index: usize,
    /// The offending timestamp, verbatim
    pub timestamp: String,
    pub reason: String,
}

/// Result of [`parse_entries`].
#[derive(Debug, Clone, Default)]
pub struct ParsedEntries {
    /// Successfully parsed entries, in input order
    pub entries: Vec<JournalEntry>,
    pub skipped: Vec<SkippedEntry>,
}

/// Parse a journal store timestamp into an absolute instant.
///
/// Offsets are honored when present; otherwise the wall-clock value is read
/// in `tz`. A bare date means local midnight.
pub fn parse_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Result<DateTime<Utc>> {
    let value = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| Error::Timestamp {
            value: raw.to_string(),
            message: "not an ISO-8601 date or date-time".to_string(),
        })?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| Error::Timestamp {
            value: raw.to_string(),
            message: "local time does not exist in this time zone".to_string(),
        })
}

/// Convert wire entries into [`JournalEntry`] values, preserving order.
pub fn parse_entries<Tz: TimeZone>(
    raw: Vec<RawJournalEntry>,
    tz: &Tz,
    policy: InvalidTimestampPolicy,
) -> Result<ParsedEntries> {
    let mut parsed = ParsedEntries {
        entries: Vec::with_capacity(raw.len()),
        skipped: Vec::new(),
    };

    for (index, entry) in raw.into_iter().enumerate() {
        match parse_timestamp(&entry.timestamp, tz) {
            Ok(timestamp) => parsed.entries.push(JournalEntry {
                text: entry.text,
                mood: entry.mood.into(),
                timestamp,
            }),
            Err(e) => match policy {
                InvalidTimestampPolicy::Abort => return Err(e),
                InvalidTimestampPolicy::Skip => {
                    tracing::debug!(index, timestamp = %entry.timestamp, "Skipping entry: {}", e);
                    parsed.skipped.push(SkippedEntry {
                        index,
                        timestamp: entry.timestamp,
                        reason: e.to_string(),
                    });
                }
            },
        }
    }

    if !parsed.skipped.is_empty() {
        tracing::warn!(
            skipped = parsed.skipped.len(),
            kept = parsed.entries.len(),
            "Skipped journal entries with unparseable timestamps"
        );
    }

    Ok(parsed)
}

/// Read a JSON array of journal entries, as stored by the journal service
/// or saved from a `GET /logs` response.
pub fn load_entries_file(path: &Path) -> Result<Vec<RawJournalEntry>> {
    let content = std::fs::read_to_string(path)?;
    let entries: Vec<RawJournalEntry> = serde_json::from_str(&content)?;
    tracing::info!(path = %path.display(), count = entries.len(), "Loaded journal entries from file");
    Ok(entries)
}

/// Anything that can hand over the raw journal.
pub trait JournalSource {
    fn fetch_entries(&self) -> Result<Vec<RawJournalEntry>>;
}

/// A journal export on disk.
#[derive(Debug, Clone)]
pub struct FileJournalSource {
    path: PathBuf,
}

impl FileJournalSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl JournalSource for FileJournalSource {
    fn fetch_entries(&self) -> Result<Vec<RawJournalEntry>> {
        load_entries_file(&self.path)
    }
}
