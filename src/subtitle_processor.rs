use once_cell::sync::Lazy;
use regex::Regex;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::CaptionError;
use crate::text_normalizer;
use crate::timestamp::{Timestamp, encode_timestamp};
use crate::transcript::TranscriptSegment;

// @module: SRT encoding and tolerant decoding

// @const: SRT timing line, hours may exceed two digits
static TIMING_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2,}:\d{2}:\d{2},\d{3})\s*-->\s*(\d{2,}:\d{2}:\d{2},\d{3})").unwrap()
});

// @const: Blank line between blocks, tolerating CRLF and stray indentation
static BLOCK_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r?\n[ \t]*\r?\n").unwrap()
});

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleEntry {
    // @field: Sequence number, 1-based position in the file
    pub index: usize,

    // @field: Start time in seconds
    pub start: f64,

    // @field: End time in seconds
    pub end: f64,

    // @field: Subtitle text
    pub text: String,
}

impl SubtitleEntry {
    /// Creates a new subtitle entry
    pub fn new(index: usize, start: f64, end: f64, text: impl Into<String>) -> Self {
        SubtitleEntry {
            index,
            start,
            end,
            text: text.into(),
        }
    }

    // @creates: Entry for a transcript segment at a given position
    // @normalizes: Segment text
    pub fn from_segment(index: usize, segment: &TranscriptSegment) -> Self {
        SubtitleEntry {
            index,
            start: segment.start,
            end: segment.end,
            text: text_normalizer::normalize(&segment.text),
        }
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> Result<String, CaptionError> {
        encode_timestamp(self.start)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> Result<String, CaptionError> {
        encode_timestamp(self.end)
    }

    /// Render the entry as an SRT block without a trailing blank line
    pub fn format_block(&self) -> Result<String, CaptionError> {
        Ok(format!(
            "{}\n{} --> {}\n{}",
            self.index,
            self.format_start_time()?,
            self.format_end_time()?,
            self.text
        ))
    }
}

/// Encode transcript segments as SRT text.
///
/// Entries are numbered by position. Each segment's text is normalized on the
/// way out. An empty input yields an empty string; a segment whose time
/// cannot be rendered fails the whole call.
pub fn encode(segments: &[TranscriptSegment]) -> Result<String, CaptionError> {
    if segments.is_empty() {
        return Ok(String::new());
    }

    let blocks = segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let entry = SubtitleEntry::from_segment(i + 1, segment);
            if entry.text.is_empty() {
                warn!("Subtitle entry {} has no text after normalization", entry.index);
            }
            entry.format_block()
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(blocks.join("\n\n").trim_end().to_string())
}

/// Outcome of parsing one blank-line-delimited block
#[derive(Debug, Clone, PartialEq)]
pub enum BlockParse<'a> {
    /// The block held a usable entry
    Entry {
        start: f64,
        end: f64,
        text: String,
    },
    /// The block was not a subtitle entry and is ignored
    Skipped {
        block: &'a str,
        reason: String,
    },
}

/// Lazily parse SRT content block by block.
///
/// Every block yields a [`BlockParse`]; nothing here fails, so callers decide
/// what to do with skipped blocks.
pub fn parse_blocks(content: &str) -> impl Iterator<Item = BlockParse<'_>> {
    BLOCK_SEPARATOR_REGEX
        .split(content.trim())
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(parse_block)
}

fn parse_block(block: &str) -> BlockParse<'_> {
    let skip = |reason: String| BlockParse::Skipped { block, reason };

    let lines: Vec<&str> = block.lines().collect();
    if lines.len() < 3 {
        return skip(format!("expected at least 3 lines, found {}", lines.len()));
    }

    let Some(caps) = TIMING_LINE_REGEX.captures(lines[1]) else {
        return skip(format!("no timing line: '{}'", lines[1]));
    };

    let times = (caps[1].parse::<Timestamp>(), caps[2].parse::<Timestamp>());
    let (start, end) = match times {
        (Ok(start), Ok(end)) => (start, end),
        (Err(e), _) | (_, Err(e)) => return skip(e.to_string()),
    };

    BlockParse::Entry {
        start: start.as_seconds(),
        end: end.as_seconds(),
        text: lines[2..].join("\n").trim().to_string(),
    }
}

/// Decode SRT text into entries, skipping anything that is not a valid block.
///
/// Index lines in the input are not trusted: entries are renumbered by their
/// position among the blocks that parsed.
pub fn decode(content: &str) -> Vec<SubtitleEntry> {
    parse_blocks(content)
        .filter_map(|outcome| match outcome {
            BlockParse::Entry { start, end, text } => Some((start, end, text)),
            BlockParse::Skipped { block, reason } => {
                debug!("Skipping subtitle block ({}): {:?}", reason, block.lines().next().unwrap_or_default());
                None
            }
        })
        .enumerate()
        .map(|(i, (start, end, text))| SubtitleEntry::new(i + 1, start, end, text))
        .collect()
}

/// Caption with integer millisecond timing, for consumers that do not want
/// to parse SRT text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedCaption {
    /// 1-based position
    pub id: usize,
    /// Start time in ms
    pub start_time: i64,
    /// End time in ms
    pub end_time: i64,
    /// Normalized text
    pub text: String,
    /// Duration in ms
    pub duration: i64,
}

/// Map segments to millisecond-timed captions
pub fn to_timed_captions(segments: &[TranscriptSegment]) -> Vec<TimedCaption> {
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| TimedCaption {
            id: i + 1,
            start_time: seconds_to_rounded_ms(segment.start),
            end_time: seconds_to_rounded_ms(segment.end),
            text: text_normalizer::normalize(&segment.text),
            duration: seconds_to_rounded_ms(segment.end - segment.start),
        })
        .collect()
}

fn seconds_to_rounded_ms(seconds: f64) -> i64 {
    (seconds * 1000.0).round() as i64
}
