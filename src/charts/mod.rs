//! Chart builders
//!
//! One module per chart on the dashboard. Every builder is a pure function
//! `(&Dataset, &Selection) -> Figure`: no shared mutable state, no IO, and
//! rebuilding with the same inputs yields a structurally identical figure.
//! Each module also knows how to read its selection from the query string
//! the dashboard submits, so the serve layer stays a thin router.
//!
//! The [`CHARTS`] table is the single place chart identifiers are wired to
//! builders; the server, the report writer, and the debug dump all route
//! through it.
//!
//! # Selection encoding
//!
//! Multi-selects arrive as comma-separated values (`modes=Major,Minor`).
//! An absent parameter means the dashboard's initial default for that
//! control; a present-but-empty parameter means an empty selection, which
//! yields a figure with no data traces.

pub mod bubble;
pub mod correlation;
pub mod genre_scatter;
pub mod key_mode;
pub mod time_series;

use crate::dataset::{Dataset, Track};
use crate::figure::Figure;
use serde::de::DeserializeOwned;

/// The seven audio-feature columns selectable on the genre scatter
pub const GENRE_FIELDS: [&str; 7] = [
    "danceability_%",
    "acousticness_%",
    "instrumentalness_%",
    "liveness_%",
    "speechiness_%",
    "energy_%",
    "valence_%",
];

/// Human-readable axis label for an audio-feature column
///
/// Unrecognized fields fall back to the raw identifier rather than erroring.
pub fn genre_label(field: &str) -> &str {
    match field {
        "danceability_%" => "Percent Danceability",
        "acousticness_%" => "Percent Acousticness",
        "instrumentalness_%" => "Percent Instrumentalness",
        "liveness_%" => "Percent Liveness",
        "speechiness_%" => "Percent Speechiness",
        "energy_%" => "Percent Energy",
        "valence_%" => "Percent Valence",
        other => other,
    }
}

/// Value of an audio-feature column for one track; None for unknown fields
pub(crate) fn genre_value(track: &Track, field: &str) -> Option<f64> {
    match field {
        "danceability_%" => Some(track.danceability),
        "acousticness_%" => Some(track.acousticness),
        "instrumentalness_%" => Some(track.instrumentalness),
        "liveness_%" => Some(track.liveness),
        "speechiness_%" => Some(track.speechiness),
        "energy_%" => Some(track.energy),
        "valence_%" => Some(track.valence),
        _ => None,
    }
}

/// One dashboard chart: its URL slug, display title, and builder
pub struct ChartSpec {
    pub slug: &'static str,
    pub title: &'static str,
    pub handler: fn(&Dataset, &str) -> Figure,
}

/// Dispatch table mapping chart identifiers to builders
pub const CHARTS: [ChartSpec; 5] = [
    ChartSpec {
        slug: "key-mode",
        title: "Songs by Key and Mode",
        handler: key_mode::handle,
    },
    ChartSpec {
        slug: "bubble",
        title: "Song Attribute Bubbles",
        handler: bubble::handle,
    },
    ChartSpec {
        slug: "time-series",
        title: "Energy and BPM Over Time",
        handler: time_series::handle,
    },
    ChartSpec {
        slug: "correlation",
        title: "Streams Correlation",
        handler: correlation::handle,
    },
    ChartSpec {
        slug: "genre-scatter",
        title: "Genre by Release Year",
        handler: genre_scatter::handle,
    },
];

/// Look up a chart by slug
pub fn find(slug: &str) -> Option<&'static ChartSpec> {
    CHARTS.iter().find(|c| c.slug == slug)
}

/// Decode a query string into a chart's raw parameter struct
///
/// Anything undecodable is treated as an empty query, which selects the
/// defaults; builders are total over their input domain.
pub(crate) fn parse_query<T: DeserializeOwned + Default>(query: &str) -> T {
    serde_urlencoded::from_str(query).unwrap_or_default()
}

/// Split a comma-separated multi-select parameter
///
/// `None` means the parameter was absent (caller applies its default);
/// `Some(vec![])` means it was present but empty (empty selection).
pub(crate) fn split_multi(raw: Option<&str>) -> Option<Vec<String>> {
    raw.map(|s| {
        s.split(',')
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    })
}
