//! CSV ingestion
//!
//! Reads the track export once at startup. The `streams` column arrives as
//! text in real exports (a handful of rows carry junk like a stray song
//! title), so it is coerced to an integer here and rows that fail coercion
//! are dropped. Rows that fail deserialization outright (malformed numeric
//! in a required column) are dropped the same way. Dropped rows are counted
//! in [`LoadStats`] so callers can surface how much of the file survived.
//!
//! Extra columns in the export are ignored; only the columns the charts need
//! are read.

use super::Track;
use serde::Deserialize;
use std::io::{self, Read};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Row counts from one load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct LoadStats {
    /// Data rows seen in the file (header excluded)
    pub rows_read: usize,
    /// Rows discarded: unparseable stream count or malformed record
    pub rows_dropped: usize,
}

impl LoadStats {
    pub fn rows_loaded(&self) -> usize {
        self.rows_read - self.rows_dropped
    }
}

/// Raw row as it appears in the export; `streams` stays text until coerced
#[derive(Debug, Deserialize)]
struct CsvRow {
    track_name: String,
    #[serde(default)]
    key: String,
    mode: String,
    released_year: i32,
    streams: String,
    in_spotify_playlists: u64,
    bpm: f64,
    #[serde(rename = "danceability_%")]
    danceability: f64,
    #[serde(rename = "acousticness_%")]
    acousticness: f64,
    #[serde(rename = "instrumentalness_%")]
    instrumentalness: f64,
    #[serde(rename = "liveness_%")]
    liveness: f64,
    #[serde(rename = "speechiness_%")]
    speechiness: f64,
    #[serde(rename = "energy_%")]
    energy: f64,
    #[serde(rename = "valence_%")]
    valence: f64,
}

impl CsvRow {
    fn into_track(self, streams: u64) -> Track {
        Track {
            name: self.track_name,
            key: self.key,
            mode: self.mode,
            released_year: self.released_year,
            streams,
            playlist_count: self.in_spotify_playlists,
            bpm: self.bpm,
            danceability: self.danceability,
            acousticness: self.acousticness,
            instrumentalness: self.instrumentalness,
            liveness: self.liveness,
            speechiness: self.speechiness,
            energy: self.energy,
            valence: self.valence,
        }
    }
}

/// Parse track rows from raw CSV bytes
///
/// Strips an optional UTF-8 byte-order mark before handing the bytes to the
/// reader. IO errors are fatal; per-row problems are counted and skipped.
pub fn read_tracks<R: Read>(mut reader: R) -> io::Result<(Vec<Track>, LoadStats)> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let body = bytes.strip_prefix(&UTF8_BOM[..]).unwrap_or(&bytes);

    let mut csv_reader = csv::Reader::from_reader(body);
    let mut tracks = Vec::new();
    let mut stats = LoadStats::default();

    for result in csv_reader.deserialize::<CsvRow>() {
        stats.rows_read += 1;
        let row = match result {
            Ok(row) => row,
            Err(e) if e.is_io_error() => {
                return Err(io::Error::new(io::ErrorKind::Other, e));
            }
            Err(_) => {
                stats.rows_dropped += 1;
                continue;
            }
        };

        match row.streams.trim().parse::<u64>() {
            Ok(streams) => tracks.push(row.into_track(streams)),
            Err(_) => stats.rows_dropped += 1,
        }
    }

    Ok((tracks, stats))
}
