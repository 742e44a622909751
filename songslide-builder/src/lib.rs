//! songslide-builder library - Weekly record builder
//!
//! Loads a weekly draft from a TOML file, optionally preloads songs from
//! the remote songs source, and previews, exports, or pushes the canonical
//! record derived by songslide-common.

pub mod draft;
pub mod export;
pub mod remote;
