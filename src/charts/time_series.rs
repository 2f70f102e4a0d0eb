//! Average energy and BPM by release year
//!
//! Groups the whole table by release year and plots the per-year mean of
//! each selected metric as a lines+markers trace. Zero, one, or both
//! metrics may be selected; an empty selection keeps the axes and title
//! with no traces.

use super::{parse_query, split_multi};
use crate::dataset::{stats, Dataset};
use crate::figure::{Figure, Layout, Trace};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub energy: bool,
    pub bpm: bool,
}

#[derive(Debug, Default, Deserialize)]
struct Query {
    metrics: Option<String>,
}

impl Selection {
    /// Absent parameter selects both metrics, the dashboard's initial state
    pub fn from_query(query: &str) -> Self {
        let raw: Query = parse_query(query);
        match split_multi(raw.metrics.as_deref()) {
            None => Selection { energy: true, bpm: true },
            Some(picked) => Selection {
                energy: picked.iter().any(|m| m == "energy"),
                bpm: picked.iter().any(|m| m == "bpm"),
            },
        }
    }
}

pub fn handle(dataset: &Dataset, query: &str) -> Figure {
    build(dataset, &Selection::from_query(query))
}

pub fn build(dataset: &Dataset, selection: &Selection) -> Figure {
    let mut traces = Vec::new();

    if selection.energy {
        let (years, means) = stats::yearly_mean(&dataset.tracks, |t| t.energy);
        traces.push(Trace::lines_markers(years, means).named("Average Energy"));
    }
    if selection.bpm {
        let (years, means) = stats::yearly_mean(&dataset.tracks, |t| t.bpm);
        traces.push(Trace::lines_markers(years, means).named("Average BPM"));
    }

    Figure {
        data: traces,
        layout: Layout::titled("Average Energy and BPM Over Time", "Year", "Value"),
    }
}
