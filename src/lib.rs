//! Trackboard - Explore music streaming exports
//!
//! Trackboard loads a CSV export of track metadata (stream counts, audio
//! features, key/mode, release year) into an immutable in-memory snapshot
//! and turns UI selections into chart specifications.
//!
//! # Overview
//!
//! Everything is derived once at load time: the key/mode aggregate behind
//! the distribution chart, the stream-count quantile cutoffs, the
//! popularity tercile of every track, and the decile-filtered pool the
//! bubble chart draws from. After that, each chart is a pure function of
//! the snapshot and the current selection - rerunning a builder with the
//! same inputs always yields the same figure, so the serve layer never has
//! to reason about ordering or caching.
//!
//! # Quick Start
//!
//! ```no_run
//! use trackboard::charts::key_mode;
//! use trackboard::Dataset;
//!
//! let dataset = Dataset::load("tracks.csv")?;
//!
//! let selection = key_mode::Selection {
//!     keys: vec!["C".to_string()],
//!     modes: vec!["Major".to_string()],
//! };
//! let figure = key_mode::build(&dataset, &selection);
//!
//! println!("{}", serde_json::to_string_pretty(&figure)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Popularity terciles
//!
//! Every track lands in exactly one tercile of the stream-count
//! distribution, with the lowest bin including its lower edge:
//!
//! | Stream count | Category |
//! |--------------|----------|
//! | `[0, p33]` | Least-Streamed |
//! | `(p33, p66]` | Middle-Streamed |
//! | `(p66, max]` | Top-Streamed |
//!
//! # Modules
//!
//! - [`dataset`]: CSV ingestion and the derived views
//! - [`charts`]: the five chart builders and their dispatch table
//! - [`figure`]: the chart-specification types the builders return
//! - [`report`]: offline output formatters (JSON, CSV)
//! - [`serve`]: the local dashboard server

pub mod charts;
pub mod dataset;
pub mod figure;
pub mod report;
pub mod serve;

pub use dataset::{Dataset, LoadStats, StreamCategory, StreamCutoffs, Track};
pub use figure::{Figure, Layout, Trace};
