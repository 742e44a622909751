//! File export
//!
//! Writes the canonical record as `week_<n>_songs.json`. The file content is
//! exactly the preview text; downstream consumers diff these files, so no
//! extra trailing newline or formatting is added.

use songslide_common::{CanonicalRecord, Result};
use std::path::{Path, PathBuf};

/// Write the record into `out_dir`, returning the written path
pub fn write_record(record: &CanonicalRecord, out_dir: &Path) -> Result<PathBuf> {
    let path = out_dir.join(record.export_file_name());
    std::fs::write(&path, record.to_pretty_json()?)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use songslide_common::{SongField, WeeklyDraft};

    #[test]
    fn test_write_record_name_and_content() {
        let mut draft = WeeklyDraft::new();
        draft.week_number = 5;
        let id = draft.songs()[0].id;
        draft.edit_song(id, SongField::Main, "Om".to_string());
        let record = draft.generate();

        let dir = tempfile::tempdir().unwrap();
        let path = write_record(&record, dir.path()).unwrap();

        assert_eq!(path.file_name().unwrap(), "week_5_songs.json");
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, record.to_pretty_json().unwrap());

        // The file parses back to the same document
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed["week_number"], 5);
        assert_eq!(parsed["songs"]["song_1"]["main"], "Om");
    }
}
