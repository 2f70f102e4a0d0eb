//! Row-level scatter of streams against energy and BPM
//!
//! No aggregation: every track contributes one point per selected series.
//! Energy points are blue, BPM points red, both at half opacity so the
//! clouds stay readable where they overlap.

use super::{parse_query, split_multi};
use crate::dataset::Dataset;
use crate::figure::{Figure, Layout, Marker, Trace};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub energy_streams: bool,
    pub bpm_streams: bool,
}

#[derive(Debug, Default, Deserialize)]
struct Query {
    metrics: Option<String>,
}

impl Selection {
    /// Absent parameter selects both series, the dashboard's initial state
    pub fn from_query(query: &str) -> Self {
        let raw: Query = parse_query(query);
        match split_multi(raw.metrics.as_deref()) {
            None => Selection { energy_streams: true, bpm_streams: true },
            Some(picked) => Selection {
                energy_streams: picked.iter().any(|m| m == "energy_streams"),
                bpm_streams: picked.iter().any(|m| m == "bpm_streams"),
            },
        }
    }
}

pub fn handle(dataset: &Dataset, query: &str) -> Figure {
    build(dataset, &Selection::from_query(query))
}

pub fn build(dataset: &Dataset, selection: &Selection) -> Figure {
    let streams: Vec<f64> = dataset.tracks.iter().map(|t| t.streams as f64).collect();
    let mut traces = Vec::new();

    if selection.energy_streams {
        let x = dataset.tracks.iter().map(|t| t.energy).collect();
        let mut trace = Trace::markers(x, streams.clone()).named("Energy vs. Streams");
        trace.marker = Some(Marker::fixed("blue", 0.5));
        traces.push(trace);
    }
    if selection.bpm_streams {
        let x = dataset.tracks.iter().map(|t| t.bpm).collect();
        let mut trace = Trace::markers(x, streams).named("BPM vs. Streams");
        trace.marker = Some(Marker::fixed("red", 0.5));
        traces.push(trace);
    }

    Figure {
        data: traces,
        layout: Layout::titled(
            "Correlation Between Streams and Music Metrics",
            "Metric Value",
            "Streams",
        ),
    }
}
