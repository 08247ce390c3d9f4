/*!
 * # capsync - Caption timing and subtitle codec
 *
 * A Rust library that turns speech-transcription segments into SRT subtitles
 * and into short, word-highlighted captions for synchronized playback.
 *
 * ## Features
 *
 * - SRT timestamp encoding and decoding (`HH:MM:SS,mmm`)
 * - Transcript text cleanup (tags, spacing, sentence capitalisation)
 * - SRT encoding and tolerant decoding
 * - Advisory timing validation (overlaps, non-positive durations)
 * - Proportional re-chunking of long segments into display captions
 * - Playback-time to highlighted-word resolution
 * - Whisper-style JSON transcript ingestion
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timestamp`: SRT timestamp codec
 * - `text_normalizer`: Transcript text cleanup
 * - `transcript`: Transcript segments and ingestion
 * - `subtitle_processor`: SRT encoding/decoding and millisecond captions
 * - `validation`: Timing validation
 * - `display`: Display captions:
 *   - `display::chunker`: Re-chunking of segments
 *   - `display::playback`: Highlight resolution
 * - `app_config`: Configuration management
 * - `app_controller`: File-level pipeline and folder processing
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod display;
pub mod errors;
pub mod file_utils;
pub mod subtitle_processor;
pub mod text_normalizer;
pub mod timestamp;
pub mod transcript;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{CaptionBundle, Controller};
pub use display::{DisplayCaption, HighlightState, PlaybackSynchronizer, WordState, rechunk, resolve};
pub use errors::{AppError, CaptionError};
pub use subtitle_processor::{SubtitleEntry, TimedCaption, decode, encode, to_timed_captions};
pub use text_normalizer::normalize;
pub use timestamp::{Timestamp, decode_timestamp, encode_timestamp};
pub use transcript::TranscriptSegment;
pub use validation::{ValidationResult, validate};
