/*!
 * Tests for subtitle processing functionality
 */

use anyhow::Result;
use capsync::subtitle_processor::{SubtitleEntry, decode, encode, to_timed_captions};
use crate::common;

/// Test subtitle entry block formatting
#[test]
fn test_subtitle_entry_format_block_withValidEntry_shouldFormatCorrectly() -> Result<()> {
    let entry = SubtitleEntry::new(7, 5.0, 10.25, "Test subtitle");

    assert_eq!(entry.format_block()?, "7\n00:00:05,000 --> 00:00:10,250\nTest subtitle");
    assert_eq!(entry.duration(), 5.25);

    Ok(())
}

/// Test entries built from segments carry normalized text
#[test]
fn test_subtitle_entry_from_segment_shouldNormalizeText() {
    let entry = SubtitleEntry::from_segment(3, &common::segment(1.0, 2.0, "  <i>so</i> it begins ."));

    assert_eq!(entry.index, 3);
    assert_eq!(entry.text, "So it begins.");
}

/// Test the SRT layout for a two-segment transcript
#[test]
fn test_encode_withTwoSegments_shouldProduceNumberedBlocks() -> Result<()> {
    let segments = vec![
        common::segment(0.0, 2.5, "hello world"),
        common::segment(2.5, 4.0, "second  line ."),
    ];

    let srt = encode(&segments)?;

    let expected = "1\n00:00:00,000 --> 00:00:02,500\nHello world\n\n\
                    2\n00:00:02,500 --> 00:00:04,000\nSecond line.";
    assert_eq!(srt, expected);

    Ok(())
}

/// Test a segment with no text after cleanup is still emitted
#[test]
fn test_encode_withBlankSegmentText_shouldKeepEntry() -> Result<()> {
    let srt = encode(&[common::segment(0.0, 1.0, "<i></i>"), common::segment(1.0, 2.0, "after")])?;

    assert!(srt.starts_with("1\n00:00:00,000 --> 00:00:01,000\n\n\n2\n"));
    assert!(srt.ends_with("After"));

    Ok(())
}

/// Test decoding the sample subtitle file content
#[test]
fn test_decode_withSampleSubtitle_shouldReturnAllEntries() {
    let entries = decode(common::SAMPLE_SRT);

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0], SubtitleEntry::new(1, 1.0, 4.0, "This is a test subtitle."));
    assert_eq!(entries[2].end, 14.0);
}

/// Test decode ignores the index line and renumbers by position
#[test]
fn test_decode_withUnorderedIndexes_shouldRenumber() {
    let content = "42\n00:00:01,000 --> 00:00:02,000\nA\n\n7\n00:00:03,000 --> 00:00:04,000\nB";

    let entries = decode(content);

    assert_eq!(entries.iter().map(|e| e.index).collect::<Vec<_>>(), vec![1, 2]);
}

/// Test decode keeps multi-line text as lines
#[test]
fn test_decode_withMultilineText_shouldJoinWithNewline() {
    let entries = decode("1\n00:00:01,000 --> 00:00:02,000\nline one\nline two\n");

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].text, "line one\nline two");
}

/// Test decode tolerates a malformed block between good ones
#[test]
fn test_decode_withMalformedTimingLine_shouldSkipOnlyThatBlock() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\nGood\n\n2\n00:00:02 --> 00:00:03\nBad\n\n3\n00:00:04,000 --> 00:00:05,000\nGood again";

    let entries = decode(content);

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].text, "Good again");
    assert_eq!(entries[1].start, 4.0);
}

/// Test encode then decode preserves timing within a millisecond
#[test]
fn test_encode_decode_withFractionalTimes_shouldStayWithinOneMillisecond() -> Result<()> {
    let segments = vec![
        common::segment(0.3333, 1.6667, "Thirds."),
        common::segment(1.6667, 2.0001, "Almost two."),
    ];

    let entries = decode(&encode(&segments)?);

    for (entry, segment) in entries.iter().zip(&segments) {
        assert!((entry.start - segment.start).abs() < 0.001);
        assert!((entry.end - segment.end).abs() < 0.001);
        assert_eq!(entry.text, segment.text);
    }

    Ok(())
}

/// Test millisecond captions mirror the segments
#[test]
fn test_to_timed_captions_withSegments_shouldMapEachSegment() {
    let captions = to_timed_captions(&[common::segment(0.0, 2.5, "hello"), common::segment(2.5, 4.0, "there")]);

    assert_eq!(captions.len(), 2);
    assert_eq!(captions[0].end_time, 2500);
    assert_eq!(captions[1].start_time, 2500);
    assert_eq!(captions[1].duration, 1500);
    assert_eq!(captions[1].text, "There");
}
