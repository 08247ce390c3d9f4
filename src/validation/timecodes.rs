/*!
 * Timecode validation for subtitle entries.
 *
 * This module validates that timecodes are:
 * - Present (the content decodes to at least one entry)
 * - Non-overlapping between consecutive entries
 * - Logically consistent (start < end)
 *
 * Every problem is reported; none of them is fatal.
 */

use std::fmt;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::display::DisplayCaption;
use crate::subtitle_processor::{self, SubtitleEntry};
use crate::transcript::TranscriptSegment;

/// Anything with a start and end time in seconds
pub trait TimedSpan {
    /// Start time in seconds
    fn start_secs(&self) -> f64;
    /// End time in seconds
    fn end_secs(&self) -> f64;
}

impl TimedSpan for SubtitleEntry {
    fn start_secs(&self) -> f64 {
        self.start
    }

    fn end_secs(&self) -> f64 {
        self.end
    }
}

impl TimedSpan for TranscriptSegment {
    fn start_secs(&self) -> f64 {
        self.start
    }

    fn end_secs(&self) -> f64 {
        self.end
    }
}

impl TimedSpan for DisplayCaption {
    fn start_secs(&self) -> f64 {
        self.start
    }

    fn end_secs(&self) -> f64 {
        self.end
    }
}

/// Types of timing issues. Entry numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimingIssue {
    /// Nothing to validate
    EmptyContent,
    /// Content decoded to zero entries
    NoEntries,
    /// An entry ends after the next one starts
    Overlap {
        entry: usize,
        next_entry: usize,
    },
    /// An entry ends at or before its start
    InvalidDuration {
        entry: usize,
    },
}

impl fmt::Display for TimingIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingIssue::EmptyContent => write!(f, "content is empty or invalid"),
            TimingIssue::NoEntries => write!(f, "no valid subtitle entries found"),
            TimingIssue::Overlap { entry, next_entry } => {
                write!(f, "overlapping timestamps at entry {} and {}", entry, next_entry)
            }
            TimingIssue::InvalidDuration { entry } => {
                write!(f, "invalid duration at entry {}", entry)
            }
        }
    }
}

/// Outcome of a validation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True when no issue was found
    pub is_valid: bool,
    /// Human readable issue descriptions, in detection order
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Build a result from detected issues
    pub fn from_issues(issues: &[TimingIssue]) -> Self {
        Self {
            is_valid: issues.is_empty(),
            errors: issues.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Collect timing issues for an ordered sequence.
///
/// All overlaps are listed first, then all bad durations.
pub fn find_issues<T: TimedSpan>(items: &[T]) -> Vec<TimingIssue> {
    let overlaps = items
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0].end_secs() > pair[1].start_secs())
        .map(|(i, _)| TimingIssue::Overlap {
            entry: i + 1,
            next_entry: i + 2,
        });

    let durations = items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.end_secs() <= item.start_secs())
        .map(|(i, _)| TimingIssue::InvalidDuration { entry: i + 1 });

    overlaps.chain(durations).collect()
}

fn validate_sequence<T: TimedSpan>(items: &[T]) -> ValidationResult {
    if items.is_empty() {
        return ValidationResult::from_issues(&[TimingIssue::NoEntries]);
    }

    let issues = find_issues(items);

    debug!(
        "Timecode validation: {} entries, {} issues",
        items.len(),
        issues.len()
    );

    ValidationResult::from_issues(&issues)
}

/// Validate SRT text.
///
/// Only a zero-length string is "empty"; whitespace-only text goes through
/// decoding and reports that it holds no entries.
pub fn validate(content: &str) -> ValidationResult {
    if content.is_empty() {
        return ValidationResult::from_issues(&[TimingIssue::EmptyContent]);
    }

    validate_sequence(&subtitle_processor::decode(content))
}

/// Validate already decoded entries
pub fn validate_entries(entries: &[SubtitleEntry]) -> ValidationResult {
    validate_sequence(entries)
}

/// Validate transcript segments before encoding
pub fn validate_segments(segments: &[TranscriptSegment]) -> ValidationResult {
    validate_sequence(segments)
}

/// Validate re-chunked display captions
pub fn validate_captions(captions: &[DisplayCaption]) -> ValidationResult {
    validate_sequence(captions)
}
