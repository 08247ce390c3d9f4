/*!
 * On-screen captions for synchronized playback.
 *
 * - `chunker`: Splits long transcript segments into short display captions
 * - `playback`: Maps a playback time to the active caption and spoken word
 */

use serde::{Deserialize, Serialize};

pub mod chunker;
pub mod playback;

// Re-export main types
pub use chunker::{DEFAULT_MAX_WORDS_PER_CHUNK, rechunk};
pub use playback::{HighlightState, PlaybackSynchronizer, WordState, resolve};

/// A screen-sized fragment of a transcript segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayCaption {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Words joined by single spaces
    pub text: String,
    /// Words in display order
    pub words: Vec<String>,
    /// Duration in whole milliseconds
    #[serde(rename = "duration")]
    pub duration_ms: u64,
}

impl DisplayCaption {
    /// Build a caption from its words; text and duration are derived
    pub fn new(start: f64, end: f64, words: Vec<String>) -> Self {
        let duration_ms = ((end - start).max(0.0) * 1000.0).round() as u64;
        Self {
            start,
            end,
            text: words.join(" "),
            words,
            duration_ms,
        }
    }

    /// Whether `time` falls inside the caption, both bounds inclusive
    pub fn contains(&self, time: f64) -> bool {
        self.start <= time && time <= self.end
    }

    /// Length in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}
