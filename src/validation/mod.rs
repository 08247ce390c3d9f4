/*!
 * Validation of subtitle timing.
 *
 * Checks are advisory: they describe what is wrong with a subtitle track but
 * never stop the pipeline from delivering it.
 *
 * # Architecture
 *
 * - `timecodes`: Ordering, overlap and duration checks over SRT text or
 *   in-memory entries
 */

pub mod timecodes;

// Re-export main types
pub use timecodes::{TimedSpan, TimingIssue, ValidationResult, validate, validate_captions, validate_entries, validate_segments};
