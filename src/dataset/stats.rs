//! Derived statistics over the track table
//!
//! Everything here is computed once at startup from the loaded rows and then
//! treated as read-only:
//!
//! - Stream-count quantiles (linear interpolation), which give the tercile
//!   cutoffs and the bottom-decile cutoff
//! - The popularity tercile assigned to every track
//! - The key/mode aggregate behind the distribution bar chart
//! - Per-year metric means behind the time-series chart

use super::Track;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Popularity tercile of a track's stream count
///
/// Assigned by comparing against the 33rd and 66th percentile cutoffs of the
/// whole table. The lowest bin includes its lower edge, so a track sitting
/// exactly on the 33rd percentile is Least-Streamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StreamCategory {
    #[serde(rename = "Least-Streamed")]
    Least,
    #[serde(rename = "Middle-Streamed")]
    Middle,
    #[serde(rename = "Top-Streamed")]
    Top,
}

impl StreamCategory {
    pub const ALL: [StreamCategory; 3] =
        [StreamCategory::Least, StreamCategory::Middle, StreamCategory::Top];

    pub fn label(&self) -> &'static str {
        match self {
            StreamCategory::Least => "Least-Streamed",
            StreamCategory::Middle => "Middle-Streamed",
            StreamCategory::Top => "Top-Streamed",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.label() == label)
    }
}

impl fmt::Display for StreamCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stream-count cutoffs derived from the full table
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StreamCutoffs {
    /// 10th percentile; the bubble chart drops everything below it
    pub p10: f64,
    /// 33rd percentile, upper edge of Least-Streamed
    pub p33: f64,
    /// 66th percentile, upper edge of Middle-Streamed
    pub p66: f64,
    pub max: f64,
}

impl StreamCutoffs {
    pub fn from_streams(streams: &[u64]) -> Self {
        Self {
            p10: quantile(streams, 0.10),
            p33: quantile(streams, 0.33),
            p66: quantile(streams, 0.66),
            max: streams.iter().max().copied().unwrap_or(0) as f64,
        }
    }

    /// Bucket a stream count into its tercile
    ///
    /// Bin edges are `[0, p33]`, `(p33, p66]`, `(p66, max]` with the lowest
    /// edge inclusive.
    pub fn categorize(&self, streams: u64) -> StreamCategory {
        let s = streams as f64;
        if s <= self.p33 {
            StreamCategory::Least
        } else if s <= self.p66 {
            StreamCategory::Middle
        } else {
            StreamCategory::Top
        }
    }
}

/// Linear-interpolation quantile of a stream-count column
///
/// Sorts a copy, finds the fractional rank `(n - 1) * q`, and interpolates
/// between the two neighboring order statistics. Empty input yields 0.
pub fn quantile(values: &[u64], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted: Vec<u64> = values.to_vec();
    sorted.sort_unstable();

    let rank = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let lo_val = sorted[lo] as f64;
    let hi_val = sorted[hi] as f64;

    lo_val + (hi_val - lo_val) * (rank - lo as f64)
}

/// One row of the key/mode aggregate table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyModeRow {
    pub key: String,
    pub mode: String,
    pub total_streams: u64,
    pub song_count: u32,
}

/// Group tracks by (key, mode) and total their streams
///
/// Rows sort by key then mode. Tracks with no recorded key signature are
/// excluded; they still participate in every other chart.
pub fn aggregate_key_mode(tracks: &[Track]) -> Vec<KeyModeRow> {
    let mut groups: BTreeMap<(String, String), (u64, u32)> = BTreeMap::new();

    for track in tracks {
        if track.key.is_empty() {
            continue;
        }
        let entry = groups
            .entry((track.key.clone(), track.mode.clone()))
            .or_insert((0, 0));
        entry.0 += track.streams;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|((key, mode), (total_streams, song_count))| KeyModeRow {
            key,
            mode,
            total_streams,
            song_count,
        })
        .collect()
}

/// Per-release-year mean of one metric, years ascending
///
/// Returns parallel (years, means) vectors ready to plot.
pub fn yearly_mean<F>(tracks: &[Track], metric: F) -> (Vec<f64>, Vec<f64>)
where
    F: Fn(&Track) -> f64,
{
    let mut groups: BTreeMap<i32, (f64, u32)> = BTreeMap::new();

    for track in tracks {
        let entry = groups.entry(track.released_year).or_insert((0.0, 0));
        entry.0 += metric(track);
        entry.1 += 1;
    }

    let mut years = Vec::with_capacity(groups.len());
    let mut means = Vec::with_capacity(groups.len());
    for (year, (sum, count)) in groups {
        years.push(year as f64);
        means.push(sum / count as f64);
    }
    (years, means)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::test_track;

    // ==========================================================================
    // QUANTILE TESTS
    // ==========================================================================
    //
    // The tercile and decile cutoffs all come from this one function, so the
    // interpolation has to be right at the edges and in between.
    // ==========================================================================

    #[test]
    fn test_quantile_empty_is_zero() {
        assert_eq!(quantile(&[], 0.5), 0.0);
    }

    #[test]
    fn test_quantile_single_value() {
        assert_eq!(quantile(&[42], 0.0), 42.0);
        assert_eq!(quantile(&[42], 0.5), 42.0);
        assert_eq!(quantile(&[42], 1.0), 42.0);
    }

    #[test]
    fn test_quantile_endpoints() {
        let values = [50, 100, 300];
        assert_eq!(quantile(&values, 0.0), 50.0);
        assert_eq!(quantile(&values, 1.0), 300.0);
    }

    #[test]
    fn test_quantile_interpolates_between_ranks() {
        // Ranks 0..3, q=0.5 lands halfway between 10 and 20
        let values = [0, 10, 20, 30];
        assert_eq!(quantile(&values, 0.5), 15.0);
    }

    #[test]
    fn test_quantile_unsorted_input() {
        let values = [300, 50, 100];
        assert_eq!(quantile(&values, 0.5), 100.0);
    }

    #[test]
    fn test_cutoffs_are_monotonic() {
        let streams: Vec<u64> = (0..100).map(|i| i * 1000).collect();
        let cutoffs = StreamCutoffs::from_streams(&streams);

        assert!(cutoffs.p10 <= cutoffs.p33);
        assert!(cutoffs.p33 <= cutoffs.p66);
        assert!(cutoffs.p66 <= cutoffs.max);
        assert!(cutoffs.p10 >= 0.0);
    }

    // ==========================================================================
    // CATEGORIZATION TESTS
    // ==========================================================================

    #[test]
    fn test_categorize_lower_edge_inclusive() {
        // A track exactly on the 33rd percentile belongs to the bottom bin
        let cutoffs = StreamCutoffs { p10: 0.0, p33: 100.0, p66: 200.0, max: 300.0 };

        assert_eq!(cutoffs.categorize(100), StreamCategory::Least);
        assert_eq!(cutoffs.categorize(101), StreamCategory::Middle);
    }

    #[test]
    fn test_categorize_all_bins() {
        let cutoffs = StreamCutoffs { p10: 0.0, p33: 100.0, p66: 200.0, max: 300.0 };

        assert_eq!(cutoffs.categorize(0), StreamCategory::Least);
        assert_eq!(cutoffs.categorize(150), StreamCategory::Middle);
        assert_eq!(cutoffs.categorize(200), StreamCategory::Middle);
        assert_eq!(cutoffs.categorize(300), StreamCategory::Top);
    }

    #[test]
    fn test_category_labels_round_trip() {
        for category in StreamCategory::ALL {
            assert_eq!(StreamCategory::from_label(category.label()), Some(category));
        }
        assert_eq!(StreamCategory::from_label("nope"), None);
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&StreamCategory::Top).unwrap();
        assert_eq!(json, "\"Top-Streamed\"");
    }

    // ==========================================================================
    // KEY/MODE AGGREGATE TESTS
    // ==========================================================================

    #[test]
    fn test_aggregate_groups_and_totals() {
        let tracks = vec![
            test_track("C", "Major", 2020, 100),
            test_track("C", "Major", 2021, 300),
            test_track("D", "Minor", 2022, 50),
        ];
        let rows = aggregate_key_mode(&tracks);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, "C");
        assert_eq!(rows[0].mode, "Major");
        assert_eq!(rows[0].total_streams, 400);
        assert_eq!(rows[0].song_count, 2);
        assert_eq!(rows[1].key, "D");
        assert_eq!(rows[1].total_streams, 50);
        assert_eq!(rows[1].song_count, 1);
    }

    #[test]
    fn test_aggregate_splits_modes_within_key() {
        let tracks = vec![
            test_track("C", "Major", 2020, 100),
            test_track("C", "Minor", 2020, 200),
        ];
        let rows = aggregate_key_mode(&tracks);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].mode, "Major");
        assert_eq!(rows[1].mode, "Minor");
    }

    #[test]
    fn test_aggregate_skips_blank_keys() {
        let tracks = vec![
            test_track("", "Major", 2020, 100),
            test_track("C", "Major", 2020, 200),
        ];
        let rows = aggregate_key_mode(&tracks);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key, "C");
    }

    #[test]
    fn test_aggregate_empty_table() {
        assert!(aggregate_key_mode(&[]).is_empty());
    }

    // ==========================================================================
    // YEARLY MEAN TESTS
    // ==========================================================================

    #[test]
    fn test_yearly_mean_averages_within_year() {
        let mut a = test_track("C", "Major", 2020, 1);
        a.energy = 40.0;
        let mut b = test_track("D", "Major", 2020, 1);
        b.energy = 60.0;
        let mut c = test_track("E", "Major", 2021, 1);
        c.energy = 80.0;

        let (years, means) = yearly_mean(&[a, b, c], |t| t.energy);

        assert_eq!(years, vec![2020.0, 2021.0]);
        assert_eq!(means, vec![50.0, 80.0]);
    }

    #[test]
    fn test_yearly_mean_years_ascending() {
        let tracks = vec![
            test_track("C", "Major", 2023, 1),
            test_track("D", "Major", 1999, 1),
            test_track("E", "Major", 2010, 1),
        ];
        let (years, _) = yearly_mean(&tracks, |t| t.bpm);

        assert_eq!(years, vec![1999.0, 2010.0, 2023.0]);
    }
}
