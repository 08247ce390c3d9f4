use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::CaptionError;
use crate::subtitle_processor;
use crate::text_normalizer;

// @module: Transcription segments and ingestion of transcriber output

/// A time-stamped unit of transcribed speech.
///
/// Times are seconds from the start of the media and may carry sub-second
/// precision. Segments are produced by the transcription collaborator and
/// treated as immutable values afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,

    /// Transcribed text
    pub text: String,
}

impl TranscriptSegment {
    /// Create a new segment
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Length of the segment in seconds (negative for inverted ranges)
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Copy of this segment with its text normalized
    pub fn normalized(&self) -> Self {
        Self {
            start: self.start,
            end: self.end,
            text: text_normalizer::normalize(&self.text),
        }
    }
}

// Shape of a single segment in transcriber JSON; extra fields (tokens,
// avg_logprob, words...) are ignored
#[derive(Debug, Deserialize)]
struct RawSegment {
    start: f64,
    end: f64,
    #[serde(default)]
    text: String,
}

/// Parse transcriber JSON into segments.
///
/// Accepts either a Whisper-style document (`{"segments": [...]}`) or a bare
/// array of `{start, end, text}` objects. Text is trimmed and segments left
/// without text are dropped.
pub fn parse_transcript_json(json: &str) -> Result<Vec<TranscriptSegment>, CaptionError> {
    let document: Value = serde_json::from_str(json)
        .map_err(|e| CaptionError::InvalidTranscript(format!("not valid JSON: {}", e)))?;

    let raw_segments = match document {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => map
            .remove("segments")
            .filter(Value::is_array)
            .ok_or_else(|| CaptionError::InvalidTranscript("missing 'segments' array".to_string()))?,
        _ => {
            return Err(CaptionError::InvalidTranscript(
                "expected an object with 'segments' or an array of segments".to_string(),
            ));
        }
    };

    let raw: Vec<RawSegment> = serde_json::from_value(raw_segments)
        .map_err(|e| CaptionError::InvalidTranscript(format!("bad segment: {}", e)))?;

    let total = raw.len();
    let segments: Vec<TranscriptSegment> = raw
        .into_iter()
        .filter_map(|seg| {
            let text = seg.text.trim();
            if text.is_empty() {
                None
            } else {
                Some(TranscriptSegment::new(seg.start, seg.end, text))
            }
        })
        .collect();

    if segments.len() < total {
        debug!("Dropped {} empty transcript segments", total - segments.len());
    }

    Ok(segments)
}

/// Turn SRT output of a transcriber back into segments.
///
/// Multi-line entry text is joined with single spaces.
pub fn segments_from_srt(content: &str) -> Vec<TranscriptSegment> {
    let segments: Vec<TranscriptSegment> = subtitle_processor::decode(content)
        .into_iter()
        .filter_map(|entry| {
            let text = entry
                .text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join(" ");

            (!text.is_empty()).then(|| TranscriptSegment::new(entry.start, entry.end, text))
        })
        .collect();

    if segments.is_empty() && !content.trim().is_empty() {
        warn!("No subtitle entries could be read from SRT transcript");
    }

    segments
}
