//! Draft file loading
//!
//! The draft file is the CLI's stand-in for the editing form: a TOML
//! document with the week metadata, the five name strings, and a `[[songs]]`
//! list. Everything is optional; omissions keep the fresh-draft defaults.
//! Input handling stays lenient — an unknown week suffix degrades to the
//! default with a warning instead of rejecting the file.

use serde::Deserialize;
use songslide_common::{Error, Result, SongField, WeeklyDraft};
use std::path::Path;
use tracing::warn;

/// TOML draft file schema
#[derive(Debug, Default, Deserialize)]
pub struct DraftFile {
    pub week_number: Option<u32>,
    pub week_suffix: Option<String>,
    pub bn_offering: Option<String>,
    pub mn_offering: Option<String>,
    pub pn_offering: Option<String>,
    pub bn_sunday: Option<String>,
    pub mn_sunday: Option<String>,
    #[serde(default)]
    pub songs: Vec<DraftSong>,
}

/// One `[[songs]]` entry
#[derive(Debug, Default, Deserialize)]
pub struct DraftSong {
    pub main: Option<String>,
    pub eng: Option<String>,
}

/// Load a draft file and apply it onto a fresh draft
pub fn load_draft(path: &Path) -> Result<WeeklyDraft> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let file: DraftFile = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;
    Ok(apply(file))
}

/// Apply a parsed draft file through the draft's own operations
///
/// The first `[[songs]]` entry edits the default empty slot, later entries
/// are appended, so a file with no songs still yields a submittable draft
/// with one empty song.
fn apply(file: DraftFile) -> WeeklyDraft {
    let mut draft = WeeklyDraft::new();

    if let Some(week_number) = file.week_number {
        // Zero is not a valid week; degrade to 1 like any other bad input
        draft.week_number = week_number.max(1);
    }
    if let Some(raw) = file.week_suffix {
        match raw.parse() {
            Ok(suffix) => draft.week_suffix = suffix,
            Err(_) => warn!(
                "Unknown week suffix {:?} in draft file, keeping '{}'",
                raw, draft.week_suffix
            ),
        }
    }
    if let Some(name) = file.bn_offering {
        draft.bn_offering = name;
    }
    if let Some(name) = file.mn_offering {
        draft.mn_offering = name;
    }
    if let Some(name) = file.pn_offering {
        draft.pn_offering = name;
    }
    if let Some(lead) = file.bn_sunday {
        draft.bn_sunday = lead;
    }
    if let Some(lead) = file.mn_sunday {
        draft.mn_sunday = lead;
    }

    for (idx, song) in file.songs.into_iter().enumerate() {
        let id = if idx == 0 {
            draft.songs()[0].id
        } else {
            draft.add_song()
        };
        draft.edit_song(id, SongField::Main, song.main.unwrap_or_default());
        draft.edit_song(id, SongField::English, song.eng.unwrap_or_default());
    }

    draft
}
