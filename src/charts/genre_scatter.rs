//! Audio-feature scatter by release year, colored by popularity tercile
//!
//! Picking a stream category narrows the table to that tercile; clearing it
//! shows everything. One trace per tercile present in the plotted rows, so
//! the legend doubles as a color key. The hover payload carries all seven
//! audio-feature percentages plus the tercile label.

use super::{genre_label, genre_value, parse_query, GENRE_FIELDS};
use crate::dataset::{Dataset, StreamCategory, Track};
use crate::figure::{Figure, Layout, Marker, Trace};
use serde::Deserialize;

/// One fixed color per tercile, in `StreamCategory::ALL` order
const CATEGORY_COLORS: [&str; 3] = ["#636efa", "#ef553b", "#00cc96"];

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// One of the seven audio-feature columns
    pub genre: String,
    /// None plots the full table
    pub category: Option<StreamCategory>,
}

#[derive(Debug, Default, Deserialize)]
struct Query {
    genre: Option<String>,
    category: Option<String>,
}

impl Selection {
    /// Absent parameters default to the dashboard's initial state
    /// (danceability, Least-Streamed); an empty category plots everything.
    pub fn from_query(query: &str) -> Self {
        let raw: Query = parse_query(query);
        let category = match raw.category.as_deref() {
            None => Some(StreamCategory::Least),
            Some(label) => StreamCategory::from_label(label),
        };
        Self {
            genre: raw.genre.unwrap_or_else(|| GENRE_FIELDS[0].to_string()),
            category,
        }
    }
}

pub fn handle(dataset: &Dataset, query: &str) -> Figure {
    build(dataset, &Selection::from_query(query))
}

pub fn build(dataset: &Dataset, selection: &Selection) -> Figure {
    let layout = Layout::titled(
        "Interactive Scatter Plot",
        "Released Year",
        genre_label(&selection.genre),
    );

    // Unknown feature column: keep the figure total, label it raw
    if !GENRE_FIELDS.contains(&selection.genre.as_str()) {
        return Figure::empty(layout);
    }

    let mut traces = Vec::new();
    for (slot, category) in StreamCategory::ALL.into_iter().enumerate() {
        if let Some(selected) = selection.category {
            if selected != category {
                continue;
            }
        }

        let mut x = Vec::new();
        let mut y = Vec::new();
        let mut hover = Vec::new();
        for (track, &track_category) in dataset.tracks.iter().zip(&dataset.categories) {
            if track_category != category {
                continue;
            }
            let Some(value) = genre_value(track, &selection.genre) else {
                continue;
            };
            x.push(track.released_year as f64);
            y.push(value);
            hover.push(hover_payload(track, category));
        }
        if x.is_empty() {
            continue;
        }

        let mut trace = Trace::markers(x, y).named(category.label());
        trace.hovertext = Some(hover);
        trace.marker = Some(Marker::fixed(CATEGORY_COLORS[slot], 0.8));
        traces.push(trace);
    }

    Figure { data: traces, layout }
}

/// Hover block: track name, all seven feature percentages, tercile label
fn hover_payload(track: &Track, category: StreamCategory) -> String {
    format!(
        "{}<br>Danceability: {}%<br>Acousticness: {}%<br>Instrumentalness: {}%<br>\
         Liveness: {}%<br>Speechiness: {}%<br>Energy: {}%<br>Valence: {}%<br>Category: {}",
        track.name,
        track.danceability,
        track.acousticness,
        track.instrumentalness,
        track.liveness,
        track.speechiness,
        track.energy,
        track.valence,
        category.label(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{test_track, Dataset, LoadStats};

    // ==========================================================================
    // GENRE SCATTER TESTS
    // ==========================================================================

    fn tiered_dataset() -> Dataset {
        // 10 tracks with spread-out stream counts; the terciles split them
        let tracks = (0..10)
            .map(|i| test_track("C", "Major", 2015 + i as i32, (i + 1) * 1000))
            .collect();
        Dataset::from_records(tracks, LoadStats::default())
    }

    fn count_points(fig: &Figure) -> usize {
        fig.data.iter().map(|t| t.len()).sum()
    }

    #[test]
    fn test_category_filter_plots_only_matching_rows() {
        let ds = tiered_dataset();
        let top_rows = ds
            .categories
            .iter()
            .filter(|&&c| c == StreamCategory::Top)
            .count();

        let fig = build(
            &ds,
            &Selection {
                genre: "danceability_%".to_string(),
                category: Some(StreamCategory::Top),
            },
        );

        assert_eq!(fig.data.len(), 1);
        assert_eq!(fig.data[0].name.as_deref(), Some("Top-Streamed"));
        assert_eq!(count_points(&fig), top_rows);
    }

    #[test]
    fn test_no_category_plots_full_table() {
        let ds = tiered_dataset();
        let fig = build(
            &ds,
            &Selection { genre: "energy_%".to_string(), category: None },
        );

        assert_eq!(count_points(&fig), ds.len());
        // One trace per tercile present
        assert_eq!(fig.data.len(), 3);
    }

    #[test]
    fn test_exact_point_count_for_selected_tercile() {
        // 2 of 10 rows Top-Streamed -> exactly 2 points
        let mut tracks: Vec<_> = (0..8).map(|_| test_track("C", "Major", 2020, 10)).collect();
        tracks.push(test_track("D", "Minor", 2021, 1_000_000));
        tracks.push(test_track("E", "Major", 2022, 2_000_000));
        let ds = Dataset::from_records(tracks, LoadStats::default());
        assert_eq!(
            ds.categories.iter().filter(|&&c| c == StreamCategory::Top).count(),
            2
        );

        let fig = build(
            &ds,
            &Selection {
                genre: "danceability_%".to_string(),
                category: Some(StreamCategory::Top),
            },
        );

        assert_eq!(count_points(&fig), 2);
    }

    #[test]
    fn test_axis_labels_use_readable_names() {
        let ds = tiered_dataset();
        let fig = build(
            &ds,
            &Selection { genre: "valence_%".to_string(), category: None },
        );

        assert_eq!(
            fig.layout.yaxis.as_ref().unwrap().title.as_ref().unwrap().text,
            "Percent Valence"
        );
        assert_eq!(
            fig.layout.xaxis.as_ref().unwrap().title.as_ref().unwrap().text,
            "Released Year"
        );
    }

    #[test]
    fn test_unknown_genre_falls_back_to_raw_label() {
        let ds = tiered_dataset();
        let fig = build(
            &ds,
            &Selection { genre: "mystery_%".to_string(), category: None },
        );

        assert!(fig.data.is_empty());
        assert_eq!(
            fig.layout.yaxis.as_ref().unwrap().title.as_ref().unwrap().text,
            "mystery_%"
        );
    }

    #[test]
    fn test_hover_carries_all_features_and_category() {
        let ds = tiered_dataset();
        let fig = build(
            &ds,
            &Selection { genre: "danceability_%".to_string(), category: None },
        );

        let hover = fig.data[0].hovertext.as_ref().unwrap();
        for label in ["Danceability", "Acousticness", "Instrumentalness", "Liveness",
                      "Speechiness", "Energy", "Valence", "Category"] {
            assert!(hover[0].contains(label), "hover missing {label}");
        }
    }

    #[test]
    fn test_query_parsing_defaults() {
        let sel = Selection::from_query("");
        assert_eq!(sel.genre, "danceability_%");
        assert_eq!(sel.category, Some(StreamCategory::Least));

        let cleared = Selection::from_query("genre=energy_%25&category=");
        assert_eq!(cleared.genre, "energy_%");
        assert_eq!(cleared.category, None);
    }

    #[test]
    fn test_idempotent() {
        let ds = tiered_dataset();
        let sel = Selection {
            genre: "speechiness_%".to_string(),
            category: Some(StreamCategory::Middle),
        };

        assert_eq!(build(&ds, &sel), build(&ds, &sel));
    }
}
