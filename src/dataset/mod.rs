//! The in-memory track table and its derived views
//!
//! A [`Dataset`] is built once at startup and never mutated afterwards: the
//! raw rows, the key/mode aggregate, the stream-count cutoffs, the
//! popularity tercile of every row, and the decile-filtered pool the bubble
//! chart draws from. Every chart builder takes `&Dataset` and reads from
//! these views; selections only ever narrow what gets plotted.
//!
//! # Modules
//!
//! - [`load`]: CSV ingestion and stream-count coercion
//! - [`stats`]: quantiles, terciles, and the aggregate tables

pub mod load;
pub mod stats;

pub use load::LoadStats;
pub use stats::{KeyModeRow, StreamCategory, StreamCutoffs};

use serde::Serialize;
use std::io::{self, Read};
use std::path::Path;

/// One row of the source table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    pub name: String,
    /// Musical key signature, e.g. "C", "A#"; empty when the export has none
    pub key: String,
    /// "Major" or "Minor"
    pub mode: String,
    pub released_year: i32,
    pub streams: u64,
    pub playlist_count: u64,
    pub bpm: f64,
    pub danceability: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub speechiness: f64,
    pub energy: f64,
    pub valence: f64,
}

/// Immutable startup snapshot: raw rows plus everything derived from them
#[derive(Debug, Clone)]
pub struct Dataset {
    pub tracks: Vec<Track>,
    /// Popularity tercile per track, parallel to `tracks`
    pub categories: Vec<StreamCategory>,
    /// Total streams and song count per distinct (key, mode)
    pub key_mode: Vec<KeyModeRow>,
    pub cutoffs: StreamCutoffs,
    /// Indices of tracks at or above the 10th-percentile stream cutoff
    pub bubble_pool: Vec<usize>,
    pub load_stats: LoadStats,
}

impl Dataset {
    /// Load a CSV export from disk. A missing or unreadable file is fatal.
    pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> io::Result<Self> {
        let (tracks, stats) = load::read_tracks(reader)?;
        Ok(Self::from_records(tracks, stats))
    }

    /// Build the snapshot from already-parsed rows
    pub fn from_records(tracks: Vec<Track>, load_stats: LoadStats) -> Self {
        let streams: Vec<u64> = tracks.iter().map(|t| t.streams).collect();
        let cutoffs = StreamCutoffs::from_streams(&streams);

        let categories = tracks
            .iter()
            .map(|t| cutoffs.categorize(t.streams))
            .collect();

        let bubble_pool = tracks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.streams as f64 >= cutoffs.p10)
            .map(|(i, _)| i)
            .collect();

        let key_mode = stats::aggregate_key_mode(&tracks);

        Self { tracks, categories, key_mode, cutoffs, bubble_pool, load_stats }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Distinct keys in aggregate order, for the key picker
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for row in &self.key_mode {
            if !keys.contains(&row.key) {
                keys.push(row.key.clone());
            }
        }
        keys
    }

    /// Distinct modes in aggregate order, for the mode checklist
    pub fn modes(&self) -> Vec<String> {
        let mut modes: Vec<String> = Vec::new();
        for row in &self.key_mode {
            if !modes.contains(&row.mode) {
                modes.push(row.mode.clone());
            }
        }
        modes.sort();
        modes
    }

    /// Tracks in the decile-filtered bubble pool
    pub fn bubble_tracks(&self) -> impl Iterator<Item = &Track> + '_ {
        self.bubble_pool.iter().map(move |&i| &self.tracks[i])
    }

    /// How many tracks fall in each tercile, in `StreamCategory::ALL` order
    pub fn category_counts(&self) -> [usize; 3] {
        let mut counts = [0usize; 3];
        for category in &self.categories {
            match category {
                StreamCategory::Least => counts[0] += 1,
                StreamCategory::Middle => counts[1] += 1,
                StreamCategory::Top => counts[2] += 1,
            }
        }
        counts
    }
}

/// Minimal track for tests; charts under test override the fields they read
#[cfg(test)]
pub(crate) fn test_track(key: &str, mode: &str, released_year: i32, streams: u64) -> Track {
    Track {
        name: format!("{key} {mode} {streams}"),
        key: key.to_string(),
        mode: mode.to_string(),
        released_year,
        streams,
        playlist_count: streams / 1000,
        bpm: 120.0,
        danceability: 50.0,
        acousticness: 20.0,
        instrumentalness: 0.0,
        liveness: 15.0,
        speechiness: 5.0,
        energy: 60.0,
        valence: 40.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // DATASET SNAPSHOT TESTS
    // ==========================================================================
    //
    // from_records wires the derived views together; these tests pin the
    // invariants the charts rely on.
    // ==========================================================================

    fn uniform_dataset(n: u64) -> Dataset {
        let tracks = (0..n)
            .map(|i| test_track("C", "Major", 2020, i * 100))
            .collect();
        Dataset::from_records(tracks, LoadStats::default())
    }

    #[test]
    fn test_every_track_gets_exactly_one_category() {
        let ds = uniform_dataset(50);
        assert_eq!(ds.categories.len(), ds.tracks.len());

        let counts = ds.category_counts();
        assert_eq!(counts.iter().sum::<usize>(), ds.len());
    }

    #[test]
    fn test_bubble_pool_is_exactly_the_decile_filter() {
        let ds = uniform_dataset(100);

        for (i, track) in ds.tracks.iter().enumerate() {
            let in_pool = ds.bubble_pool.contains(&i);
            assert_eq!(in_pool, track.streams as f64 >= ds.cutoffs.p10);
        }
    }

    #[test]
    fn test_bubble_pool_size_bound_for_uniform_streams() {
        // For a uniform distribution the filter keeps at least 90% of rows
        let ds = uniform_dataset(100);
        assert!(ds.bubble_pool.len() >= 90);
    }

    #[test]
    fn test_keys_and_modes_distinct_and_ordered() {
        let tracks = vec![
            test_track("D", "Minor", 2020, 10),
            test_track("C", "Major", 2020, 20),
            test_track("C", "Minor", 2020, 30),
            test_track("D", "Minor", 2021, 40),
        ];
        let ds = Dataset::from_records(tracks, LoadStats::default());

        assert_eq!(ds.keys(), vec!["C".to_string(), "D".to_string()]);
        assert_eq!(ds.modes(), vec!["Major".to_string(), "Minor".to_string()]);
    }

    #[test]
    fn test_empty_dataset_is_consistent() {
        let ds = Dataset::from_records(vec![], LoadStats::default());

        assert!(ds.is_empty());
        assert!(ds.key_mode.is_empty());
        assert!(ds.bubble_pool.is_empty());
        assert_eq!(ds.cutoffs, StreamCutoffs::default());
    }

    #[test]
    fn test_category_counts_split_terciles() {
        let ds = uniform_dataset(99);
        let [least, middle, top] = ds.category_counts();

        // Terciles of a uniform table split roughly in thirds
        assert!(least >= 30 && least <= 36, "least = {least}");
        assert!(middle >= 30 && middle <= 36, "middle = {middle}");
        assert!(top >= 30 && top <= 36, "top = {top}");
    }
}
