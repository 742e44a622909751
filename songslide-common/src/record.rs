//! Weekly service record model
//!
//! Holds the in-progress weekly record (week metadata, offering sponsors,
//! ordered bilingual song list) and derives the canonical JSON document used
//! for file export and slide submission.
//!
//! The draft is a plain value owned by the caller; `generate()` is a pure
//! function of the draft state, so the transform is testable without any
//! HTTP or UI harness.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Ordinal suffix attached to the week number ("3rd week" etc.)
///
/// Free choice by the operator; deliberately not derived from the week
/// number, so a mismatched pair like `2` + `st` is accepted and exported
/// as entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekSuffix {
    #[default]
    St,
    Nd,
    Rd,
    Th,
}

impl WeekSuffix {
    /// All selectable suffixes, in display order
    pub const ALL: [WeekSuffix; 4] = [
        WeekSuffix::St,
        WeekSuffix::Nd,
        WeekSuffix::Rd,
        WeekSuffix::Th,
    ];

    /// Lowercase form used in the exported document
    pub fn as_str(&self) -> &'static str {
        match self {
            WeekSuffix::St => "st",
            WeekSuffix::Nd => "nd",
            WeekSuffix::Rd => "rd",
            WeekSuffix::Th => "th",
        }
    }
}

impl fmt::Display for WeekSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeekSuffix {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "st" => Ok(WeekSuffix::St),
            "nd" => Ok(WeekSuffix::Nd),
            "rd" => Ok(WeekSuffix::Rd),
            "th" => Ok(WeekSuffix::Th),
            other => Err(crate::Error::InvalidInput(format!(
                "Unknown week suffix '{}' (expected st, nd, rd or th)",
                other
            ))),
        }
    }
}

/// Which text field of a song entry to edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SongField {
    /// Main lyrics (Tamil/Telugu)
    Main,
    /// English transcript
    English,
}

/// One song under edit in the current session
///
/// `id` is session-local identity used only to address the entry for
/// edit/removal; it never appears in the exported record. Export numbering
/// is positional (see [`WeeklyDraft::generate`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongEntry {
    pub id: u64,
    pub main: String,
    pub eng: String,
}

/// One row of the remote songs source (Apps Script sheet export)
///
/// Both fields are optional in the wire format; missing fields default to
/// empty strings when loaded into the draft.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SongRow {
    pub lyrics: Option<String>,
    pub english: Option<String>,
}

/// Mutable weekly record under construction for one editing session
///
/// Invariant: the song list always contains at least one entry, so the
/// exported record always has at least one song slot. Song ids are allocated
/// monotonically and never reused within a session; a stale id held across a
/// removal can never alias a newly added entry.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyDraft {
    pub week_number: u32,
    pub week_suffix: WeekSuffix,
    pub bn_offering: String,
    pub mn_offering: String,
    pub pn_offering: String,
    pub bn_sunday: String,
    pub mn_sunday: String,
    songs: Vec<SongEntry>,
    next_song_id: u64,
}

impl WeeklyDraft {
    /// Create a fresh draft: week 1 "st", empty names, one empty song
    pub fn new() -> Self {
        let mut draft = Self {
            week_number: 1,
            week_suffix: WeekSuffix::St,
            bn_offering: String::new(),
            mn_offering: String::new(),
            pn_offering: String::new(),
            bn_sunday: String::new(),
            mn_sunday: String::new(),
            songs: Vec::new(),
            next_song_id: 1,
        };
        draft.add_song();
        draft
    }

    /// Current song list, in export order
    pub fn songs(&self) -> &[SongEntry] {
        &self.songs
    }

    /// Next id the allocator will hand out
    pub fn next_song_id(&self) -> u64 {
        self.next_song_id
    }

    /// Set the week number from raw user input
    ///
    /// Anything that does not parse as a positive integer stores 1,
    /// including zero. This is a silent fallback, not an error: the editing
    /// tool never rejects input, it degrades to a safe default.
    pub fn set_week_number_from_input(&mut self, raw: &str) {
        self.week_number = raw
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .unwrap_or(1);
    }

    /// Append a new empty song and return its id
    pub fn add_song(&mut self) -> u64 {
        let id = self.next_song_id;
        self.next_song_id += 1;
        self.songs.push(SongEntry {
            id,
            main: String::new(),
            eng: String::new(),
        });
        id
    }

    /// Remove the song with the given id
    ///
    /// Refused silently when exactly one song remains (the record must stay
    /// submittable) or when the id matches nothing. Returns whether an entry
    /// was removed.
    pub fn remove_song(&mut self, id: u64) -> bool {
        if self.songs.len() <= 1 {
            return false;
        }
        let before = self.songs.len();
        self.songs.retain(|song| song.id != id);
        self.songs.len() != before
    }

    /// Replace one text field of the song with the given id, verbatim
    ///
    /// No trimming, no length limit; lyrics are expected to contain line
    /// breaks. Returns false when the id matches nothing.
    pub fn edit_song(&mut self, id: u64, field: SongField, text: String) -> bool {
        match self.songs.iter_mut().find(|song| song.id == id) {
            Some(song) => {
                match field {
                    SongField::Main => song.main = text,
                    SongField::English => song.eng = text,
                }
                true
            }
            None => false,
        }
    }

    /// Replace the entire song list from remote rows
    ///
    /// Maps `lyrics` to the main text and `english` to the transcript,
    /// defaulting missing fields to empty strings, and resets the id
    /// allocator to `rows.len() + 1`. An empty row list leaves an empty
    /// list here; callers treat a failed or empty fetch as "keep the
    /// existing draft" before calling this.
    pub fn load_songs(&mut self, rows: Vec<SongRow>) {
        self.next_song_id = rows.len() as u64 + 1;
        self.songs = rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| SongEntry {
                id: idx as u64 + 1,
                main: row.lyrics.unwrap_or_default(),
                eng: row.english.unwrap_or_default(),
            })
            .collect();
    }

    /// Derive the canonical record from the current draft state
    ///
    /// Pure and deterministic; callable any number of times. Song keys are
    /// regenerated from current positions on every call, so numbering never
    /// references removed entries. Offering names get the `" & Family"`
    /// suffix when non-empty and stay empty otherwise.
    pub fn generate(&self) -> CanonicalRecord {
        CanonicalRecord {
            week_number: self.week_number,
            week_suffix: self.week_suffix.as_str().to_string(),
            bn_offering: with_family(&self.bn_offering),
            mn_offering: with_family(&self.mn_offering),
            pn_offering: with_family(&self.pn_offering),
            bn_sunday: self.bn_sunday.clone(),
            mn_sunday: self.mn_sunday.clone(),
            songs: SongTable(
                self.songs
                    .iter()
                    .map(|song| CanonicalSong {
                        main: song.main.clone(),
                        eng: song.eng.clone(),
                    })
                    .collect(),
            ),
        }
    }
}

impl Default for WeeklyDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// Offering-name transform: non-empty names sponsor as a family
fn with_family(name: &str) -> String {
    if name.is_empty() {
        String::new()
    } else {
        format!("{} & Family", name)
    }
}

/// Exported song text pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalSong {
    pub main: String,
    pub eng: String,
}

/// Ordered song list serialized as a `song_1..song_N` JSON object
///
/// Keys are derived purely from position at serialization time; the table
/// itself stores no keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongTable(pub Vec<CanonicalSong>);

impl Serialize for SongTable {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (idx, song) in self.0.iter().enumerate() {
            map.serialize_entry(&format!("song_{}", idx + 1), song)?;
        }
        map.end()
    }
}

/// Immutable export shape consumed by the slide-generation pipeline
///
/// Field names in the serialized document are fixed by the downstream
/// Apps Script consumer; do not rename.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRecord {
    pub week_number: u32,
    pub week_suffix: String,
    #[serde(rename = "BN_offering")]
    pub bn_offering: String,
    #[serde(rename = "MN_offering")]
    pub mn_offering: String,
    #[serde(rename = "PN_offering")]
    pub pn_offering: String,
    #[serde(rename = "BN_SundayS")]
    pub bn_sunday: String,
    #[serde(rename = "MN_SundayS")]
    pub mn_sunday: String,
    pub songs: SongTable,
}

impl CanonicalRecord {
    /// Pretty-printed document text (2-space indent)
    ///
    /// Downstream consumers diff these files; the formatting must stay
    /// byte-stable across releases.
    pub fn to_pretty_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// File name used for downloaded exports
    pub fn export_file_name(&self) -> String {
        format!("week_{}_songs.json", self.week_number)
    }
}
