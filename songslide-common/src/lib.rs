//! # Songslide Common Library
//!
//! Shared code for the songslide tools:
//! - Weekly record draft model and canonical JSON export
//! - Configuration loading
//! - Common error types

pub mod config;
pub mod error;
pub mod record;

pub use error::{Error, Result};
pub use record::{CanonicalRecord, SongEntry, SongField, SongRow, WeekSuffix, WeeklyDraft};
