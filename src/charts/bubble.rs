//! Bubble chart of song attributes against streams or playlist reach
//!
//! Always draws the decile-filtered pool (tracks at or above the
//! 10th-percentile stream cutoff): x = danceability, y = the selected
//! metric, bubble area = energy, color = valence on a continuous scale.
//!
//! The key picker is accepted here so the control row can drive both top
//! charts, but it does not narrow the pool: the bubble chart always shows
//! the whole filtered library. Changing that would be a semantic change to
//! the dashboard, not a cleanup.

use super::{parse_query, split_multi};
use crate::dataset::Dataset;
use crate::figure::{ColorBar, Figure, Layout, Marker, MarkerColor, Text, Trace};
use serde::Deserialize;

/// Largest bubble diameter in pixels
const SIZE_MAX: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    #[default]
    Streams,
    Playlists,
}

impl Metric {
    /// Parameter values match the dashboard dropdown
    pub fn from_param(param: &str) -> Self {
        match param {
            "in_spotify_playlists" => Metric::Playlists,
            _ => Metric::Streams,
        }
    }

    pub fn axis_title(&self) -> &'static str {
        match self {
            Metric::Streams => "Streams",
            Metric::Playlists => "Playlist Numbers",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Accepted for control-row parity; does not filter (see module docs)
    pub keys: Vec<String>,
    pub metric: Metric,
}

#[derive(Debug, Default, Deserialize)]
struct Query {
    keys: Option<String>,
    metric: Option<String>,
}

impl Selection {
    pub fn from_query(dataset: &Dataset, query: &str) -> Self {
        let raw: Query = parse_query(query);
        Self {
            keys: split_multi(raw.keys.as_deref()).unwrap_or_else(|| dataset.keys()),
            metric: Metric::from_param(raw.metric.as_deref().unwrap_or("streams")),
        }
    }
}

pub fn handle(dataset: &Dataset, query: &str) -> Figure {
    build(dataset, &Selection::from_query(dataset, query))
}

pub fn build(dataset: &Dataset, selection: &Selection) -> Figure {
    let mut x = Vec::with_capacity(dataset.bubble_pool.len());
    let mut y = Vec::with_capacity(dataset.bubble_pool.len());
    let mut sizes = Vec::with_capacity(dataset.bubble_pool.len());
    let mut colors = Vec::with_capacity(dataset.bubble_pool.len());
    let mut names = Vec::with_capacity(dataset.bubble_pool.len());

    for track in dataset.bubble_tracks() {
        x.push(track.danceability);
        y.push(match selection.metric {
            Metric::Streams => track.streams as f64,
            Metric::Playlists => track.playlist_count as f64,
        });
        sizes.push(track.energy);
        colors.push(track.valence);
        names.push(track.name.clone());
    }

    // Area sizing scaled so the most energetic track hits SIZE_MAX pixels
    let max_size = sizes.iter().cloned().fold(0.0f64, f64::max);
    let sizeref = if max_size > 0.0 {
        2.0 * max_size / (SIZE_MAX * SIZE_MAX)
    } else {
        1.0
    };

    let mut trace = Trace::markers(x, y);
    trace.hovertext = Some(names);
    trace.marker = Some(Marker {
        color: Some(MarkerColor::Values(colors)),
        size: Some(sizes),
        sizemode: Some("area".to_string()),
        sizeref: Some(sizeref),
        opacity: Some(0.7),
        colorscale: Some("Viridis".to_string()),
        showscale: Some(true),
        colorbar: Some(ColorBar { title: Text::new("Valence (%)") }),
    });

    let title = format!(
        "Bubble Chart of Song Attributes and {}",
        selection.metric.axis_title()
    );
    let layout = Layout::titled(&title, "Danceability (%)", selection.metric.axis_title());

    Figure { data: vec![trace], layout }
}
