/*!
 * Common test utilities for the capsync test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;
use capsync::transcript::TranscriptSegment;

/// Whisper-style transcript with three segments and one empty segment
pub const SAMPLE_TRANSCRIPT_JSON: &str = r#"{
  "text": "hello world. this is a test of the caption pipeline with a long segment",
  "language": "en",
  "segments": [
    {"id": 0, "start": 0.0, "end": 2.5, "text": " hello world.", "avg_logprob": -0.2},
    {"id": 1, "start": 2.5, "end": 9.0, "text": " this is a test of the caption pipeline with a long segment"},
    {"id": 2, "start": 9.0, "end": 9.5, "text": "   "},
    {"id": 3, "start": 9.5, "end": 11.0, "text": " <i>goodbye</i> ."}
  ]
}"#;

/// Three well-formed SRT entries
pub const SAMPLE_SRT: &str = "1
00:00:01,000 --> 00:00:04,000
This is a test subtitle.

2
00:00:05,000 --> 00:00:09,000
It contains multiple entries.

3
00:00:10,000 --> 00:00:14,000
For testing purposes.
";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample transcript file for testing
pub fn create_test_transcript(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_TRANSCRIPT_JSON)
}

/// Creates a sample subtitle file for testing
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_SRT)
}

/// Shorthand for building a segment
pub fn segment(start: f64, end: f64, text: &str) -> TranscriptSegment {
    TranscriptSegment::new(start, end, text)
}

/// Route library logs to the test output when RUST_LOG is set
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
