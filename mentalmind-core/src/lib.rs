//! # mentalmind-core
//!
//! Core library for MentalMind mood analytics.
//!
//! This library provides:
//! - Domain types for journal entries and moods
//! - Timestamp parsing and entry loading
//! - The analytics aggregator (daily series, distribution, summary)
//! - A client for the journal store API
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Data flow
//!
//! Raw entries come from the journal store (`GET /logs`) or a JSON export,
//! get their timestamps resolved in [`ingest`], and are then projected by
//! [`analytics`] into the shapes the charts and cards render. Nothing is
//! persisted here.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chrono::Local;
//! use mentalmind_core::analytics::generate_report;
//! use mentalmind_core::ingest::{parse_entries, JournalSource};
//! use mentalmind_core::{Config, SyncJournalClient};
//!
//! let config = Config::load().expect("failed to load config");
//! let client = SyncJournalClient::new(config.api.clone()).expect("invalid api config");
//! let raw = client.fetch_entries().expect("journal store unavailable");
//!
//! let parsed = parse_entries(raw, &Local, config.analytics.invalid_timestamps)
//!     .expect("bad timestamps");
//! let report = generate_report(&parsed.entries, 30, &Local::now(), &config.analytics.trend_policy());
//! println!("{} entries, trend {}", report.summary.total_entries, report.summary.trend);
//! ```

// Re-export commonly used items at the crate root
pub use client::{JournalClient, SyncJournalClient};
pub use config::Config;
pub use error::{Error, Result};
pub use types::*;

// Public modules
pub mod analytics;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod ingest;
pub mod logging;
pub mod types;
