//! Report generation for offline use
//!
//! This module writes the precomputed views to disk in two formats:
//!
//! - **JSON**: dataset summary plus all five figures built with the
//!   dashboard's initial selections, for programmatic consumption
//! - **CSV**: the key/mode aggregate table, spreadsheet-compatible
//!
//! # Usage
//!
//! ```ignore
//! use trackboard::report;
//!
//! // Automatically picks format based on extension
//! report::generate("report.json", &dataset)?;  // JSON
//! report::generate("report.csv", &dataset)?;   // CSV
//! ```

pub mod csv;
pub mod json;

use crate::dataset::Dataset;
use std::io;
use std::path::Path;

/// Generate a report in the appropriate format based on file extension
pub fn generate<P: AsRef<Path>>(path: P, dataset: &Dataset) -> io::Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut file = std::fs::File::create(path)?;

    match ext.as_str() {
        "json" => json::write(&mut file, dataset),
        _ => csv::write(&mut file, dataset),
    }
}
