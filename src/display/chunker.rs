use log::debug;

use crate::display::DisplayCaption;
use crate::transcript::TranscriptSegment;

// @module: Proportional re-chunking of transcript segments

/// Word budget for a single on-screen caption
pub const DEFAULT_MAX_WORDS_PER_CHUNK: usize = 6;

/// Split segments into display captions of at most `max_words_per_chunk` words.
///
/// Each segment's time range is divided evenly between its chunks. This
/// assumes every word in a segment takes the same time to say; it is an
/// approximation for when the transcriber gives no per-word timing, not a
/// measurement. Order is preserved and the chunks of one segment tile its
/// range exactly. A budget of zero is treated as one word.
pub fn rechunk(segments: &[TranscriptSegment], max_words_per_chunk: usize) -> Vec<DisplayCaption> {
    let max_words = max_words_per_chunk.max(1);

    let captions: Vec<DisplayCaption> = segments
        .iter()
        .flat_map(|segment| chunk_segment(segment, max_words))
        .collect();

    debug!(
        "Re-chunked {} segments into {} display captions (max {} words)",
        segments.len(),
        captions.len(),
        max_words
    );

    captions
}

/// Split one segment. A segment without words yields nothing; one whose end
/// precedes its start is treated as zero-length at its start.
pub fn chunk_segment(segment: &TranscriptSegment, max_words: usize) -> Vec<DisplayCaption> {
    let max_words = max_words.max(1);
    let words: Vec<&str> = segment.text.split_whitespace().collect();
    if words.is_empty() {
        debug!("Segment at {:.3}s has no words, dropping it", segment.start);
        return Vec::new();
    }

    let chunk_count = words.len().div_ceil(max_words);
    let segment_end = segment.end.max(segment.start);
    let per_chunk = (segment_end - segment.start) / chunk_count as f64;

    words
        .chunks(max_words)
        .enumerate()
        .map(|(k, chunk)| {
            let start = segment.start + k as f64 * per_chunk;
            // Last chunk absorbs rounding drift so the segment end is hit exactly
            let end = if k + 1 == chunk_count {
                segment_end
            } else {
                (segment.start + (k + 1) as f64 * per_chunk).min(segment_end)
            };

            DisplayCaption::new(start, end, chunk.iter().map(|w| w.to_string()).collect())
        })
        .collect()
}
