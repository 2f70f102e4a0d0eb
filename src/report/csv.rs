//! CSV report: the key/mode aggregate table

use crate::dataset::Dataset;
use std::io::{self, Write};

pub fn write<W: Write>(writer: &mut W, dataset: &Dataset) -> io::Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    for row in &dataset.key_mode {
        out.serialize(row)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{test_track, LoadStats};

    #[test]
    fn test_csv_report_rows() {
        let ds = Dataset::from_records(
            vec![
                test_track("C", "Major", 2020, 100),
                test_track("C", "Major", 2021, 300),
                test_track("D", "Minor", 2022, 50),
            ],
            LoadStats::default(),
        );

        let mut out = Vec::new();
        write(&mut out, &ds).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        assert_eq!(lines.next(), Some("key,mode,total_streams,song_count"));
        assert_eq!(lines.next(), Some("C,Major,400,2"));
        assert_eq!(lines.next(), Some("D,Minor,50,1"));
        assert_eq!(lines.next(), None);
    }
}
