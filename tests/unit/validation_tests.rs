/*!
 * Tests for subtitle timing validation
 */

use anyhow::Result;
use capsync::subtitle_processor::{SubtitleEntry, encode};
use capsync::validation::{TimingIssue, validate, validate_entries, validate_segments};
use crate::common;

/// Test valid subtitle content passes
#[test]
fn test_validate_withSampleSubtitle_shouldBeValid() {
    let result = validate(common::SAMPLE_SRT);

    assert!(result.is_valid);
    assert!(result.errors.is_empty());
}

/// Test overlapping entries are reported by position
#[test]
fn test_validate_withOverlap_shouldReportEntryPair() {
    let content = "1\n00:00:00,000 --> 00:00:03,000\nA\n\n2\n00:00:02,000 --> 00:00:04,000\nB";

    let result = validate(content);

    assert!(!result.is_valid);
    assert_eq!(result.errors, vec!["overlapping timestamps at entry 1 and 2".to_string()]);
}

/// Test an entry ending before it starts is reported
#[test]
fn test_validate_withInvertedEntry_shouldReportDuration() {
    let content = "1\n00:00:05,000 --> 00:00:04,000\nA";

    let result = validate(content);

    assert_eq!(result.errors, vec!["invalid duration at entry 1".to_string()]);
}

/// Test a zero-length entry is invalid
#[test]
fn test_validate_withZeroLengthEntry_shouldReportDuration() {
    let result = validate_entries(&[SubtitleEntry::new(1, 2.0, 2.0, "A")]);

    assert!(!result.is_valid);
    assert_eq!(result.errors, vec!["invalid duration at entry 1".to_string()]);
}

/// Test empty and entry-less content
#[test]
fn test_validate_withEmptyOrGarbageContent_shouldBeInvalid() {
    assert_eq!(validate("").errors, vec!["content is empty or invalid".to_string()]);
    assert_eq!(validate("no subtitles here").errors, vec!["no valid subtitle entries found".to_string()]);
    assert_eq!(validate(" \r\n\t ").errors, vec!["no valid subtitle entries found".to_string()]);
}

/// Test every problem is listed, overlaps first
#[test]
fn test_validate_withSeveralProblems_shouldListAll() {
    let content = "1\n00:00:00,000 --> 00:00:05,000\nA\n\n\
                   2\n00:00:04,000 --> 00:00:03,000\nB\n\n\
                   3\n00:00:02,000 --> 00:00:06,000\nC";

    let result = validate(content);

    assert_eq!(
        result.errors,
        vec![
            "overlapping timestamps at entry 1 and 2".to_string(),
            "overlapping timestamps at entry 2 and 3".to_string(),
            "invalid duration at entry 2".to_string(),
        ]
    );
}

/// Test segments that touch end to start validate cleanly after encoding
#[test]
fn test_validate_withEncodedContiguousSegments_shouldBeValid() -> Result<()> {
    let segments = vec![
        common::segment(0.0, 1.5, "one"),
        common::segment(1.5, 3.0, "two"),
        common::segment(3.0, 4.5, "three"),
    ];

    assert!(validate(&encode(&segments)?).is_valid);
    assert!(validate_segments(&segments).is_valid);

    Ok(())
}

/// Test issue descriptions
#[test]
fn test_timing_issue_display_shouldMatchMessages() {
    assert_eq!(TimingIssue::Overlap { entry: 4, next_entry: 5 }.to_string(), "overlapping timestamps at entry 4 and 5");
    assert_eq!(TimingIssue::InvalidDuration { entry: 9 }.to_string(), "invalid duration at entry 9");
}
