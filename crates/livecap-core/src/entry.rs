//! Caption entry types.
//!
//! This module contains the record type for one captured caption and its
//! translation, as it appears both in the session buffer and on disk.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A single recorded caption with its translation, if one was available.
///
/// Each entry is stamped with the local wall-clock time at creation and is
/// immutable afterwards. On disk the timestamp is RFC 3339 local time, so
/// session files stay human-readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionEntry {
    /// When the caption was recorded (local time).
    pub timestamp: DateTime<Local>,
    /// The source-language utterance.
    pub caption: String,
    /// The translated text, `None` while no translation is available.
    pub translation: Option<String>,
}

impl CaptionEntry {
    /// Creates an entry stamped with the current local time.
    pub fn new(caption: impl Into<String>, translation: Option<String>) -> Self {
        Self {
            timestamp: Local::now(),
            caption: caption.into(),
            translation,
        }
    }
}
