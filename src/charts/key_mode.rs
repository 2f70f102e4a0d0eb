//! Grouped bar chart of total streams by key and mode
//!
//! Filters the precomputed key/mode aggregate to the selected keys and
//! modes, then draws one bar group per key with a side-by-side bar per
//! mode. Bar height is total streams; the bar label is the song count.

use super::{parse_query, split_multi};
use crate::dataset::Dataset;
use crate::figure::{Figure, Layout, Legend, Text, Trace};
use serde::Deserialize;

/// Keys and modes chosen on the dashboard; both multi-select
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub keys: Vec<String>,
    pub modes: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Query {
    keys: Option<String>,
    modes: Option<String>,
}

impl Selection {
    /// Absent parameters default to everything, matching the dashboard's
    /// initial state; empty parameters mean an empty selection.
    pub fn from_query(dataset: &Dataset, query: &str) -> Self {
        let raw: Query = parse_query(query);
        Self {
            keys: split_multi(raw.keys.as_deref()).unwrap_or_else(|| dataset.keys()),
            modes: split_multi(raw.modes.as_deref()).unwrap_or_else(|| dataset.modes()),
        }
    }
}

pub fn handle(dataset: &Dataset, query: &str) -> Figure {
    build(dataset, &Selection::from_query(dataset, query))
}

pub fn build(dataset: &Dataset, selection: &Selection) -> Figure {
    let mut traces = Vec::new();

    // One trace per mode keeps the modes side by side under barmode=group.
    // Mode order comes from the dataset, not the query, so identical
    // selections always produce identical figures.
    for mode in dataset.modes() {
        if !selection.modes.contains(&mode) {
            continue;
        }

        let rows: Vec<_> = dataset
            .key_mode
            .iter()
            .filter(|row| row.mode == mode && selection.keys.contains(&row.key))
            .collect();
        if rows.is_empty() {
            continue;
        }

        let mut trace = Trace::bar(
            rows.iter().map(|r| r.key.clone()).collect(),
            rows.iter().map(|r| r.total_streams as f64).collect(),
        )
        .named(&mode);
        trace.text = Some(rows.iter().map(|r| r.song_count.to_string()).collect());
        trace.textposition = Some("auto".to_string());
        traces.push(trace);
    }

    let mut layout = Layout::titled(
        "Distribution of Songs by Key and Mode with Streaming Numbers",
        "Musical Key",
        "Total Streaming Numbers",
    );
    layout.barmode = Some("group".to_string());
    layout.legend = Some(Legend { title: Text::new("Mode") });

    Figure { data: traces, layout }
}
