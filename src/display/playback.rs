/*!
 * Playback synchronization for highlighted captions.
 *
 * The host player reports its current time on every tick; `resolve` answers
 * with the caption on screen and the last word that has been "spoken". It is
 * a pure function of its inputs, so a new `HighlightState` replaces the old
 * one on every call and no timers or threads live here.
 */

use serde::Serialize;

use crate::display::{DisplayCaption, rechunk};
use crate::transcript::TranscriptSegment;

/// How a word should be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WordState {
    /// At or before the highlight index
    Spoken,
    /// After the highlight index
    Pending,
}

/// Caption and word highlighted at a given playback time
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightState<'a> {
    /// Caption containing the playback time, if any
    pub active_caption: Option<&'a DisplayCaption>,
    /// Index of the most recently reached word in the active caption
    pub highlighted_word_index: Option<usize>,
}

impl<'a> HighlightState<'a> {
    /// State with nothing on screen
    pub fn none() -> Self {
        Self {
            active_caption: None,
            highlighted_word_index: None,
        }
    }

    /// Whether a caption is on screen
    pub fn is_active(&self) -> bool {
        self.active_caption.is_some()
    }

    /// Words of the active caption paired with their render state
    pub fn word_states(&self) -> Vec<(&'a str, WordState)> {
        let (Some(caption), Some(highlighted)) = (self.active_caption, self.highlighted_word_index) else {
            return Vec::new();
        };

        caption
            .words
            .iter()
            .enumerate()
            .map(|(i, word)| {
                let state = if i <= highlighted { WordState::Spoken } else { WordState::Pending };
                (word.as_str(), state)
            })
            .collect()
    }
}

/// Resolve the highlight for `current_time`.
///
/// The first caption whose range contains the time wins, so a time sitting
/// exactly on a shared boundary belongs to the earlier caption.
pub fn resolve(current_time: f64, captions: &[DisplayCaption]) -> HighlightState<'_> {
    match captions.iter().find(|caption| caption.contains(current_time)) {
        Some(caption) => HighlightState {
            active_caption: Some(caption),
            highlighted_word_index: highlight_index(caption, current_time),
        },
        None => HighlightState::none(),
    }
}

/// Index of the last word reached at `current_time`, assuming words are
/// spread evenly over the caption. `None` for a caption without words.
pub fn highlight_index(caption: &DisplayCaption, current_time: f64) -> Option<usize> {
    let last = caption.words.len().checked_sub(1)?;

    let duration = caption.duration();
    let progress = if duration > 0.0 {
        (current_time - caption.start) / duration
    } else {
        0.0
    };

    // Float-to-int casts saturate, so progress below zero lands on word 0
    let index = (progress * caption.words.len() as f64).floor() as usize;
    Some(index.min(last))
}

/// Caption list for one playback session
#[derive(Debug, Clone, Default)]
pub struct PlaybackSynchronizer {
    captions: Vec<DisplayCaption>,
}

impl PlaybackSynchronizer {
    /// Create a synchronizer over captions already in time order
    pub fn new(captions: Vec<DisplayCaption>) -> Self {
        Self { captions }
    }

    /// Re-chunk segments and synchronize over the result
    pub fn from_segments(segments: &[TranscriptSegment], max_words_per_chunk: usize) -> Self {
        Self::new(rechunk(segments, max_words_per_chunk))
    }

    /// Captions driven by this session
    pub fn captions(&self) -> &[DisplayCaption] {
        &self.captions
    }

    /// Resolve the highlight for one time-update tick
    pub fn resolve(&self, current_time: f64) -> HighlightState<'_> {
        resolve(current_time, &self.captions)
    }
}
