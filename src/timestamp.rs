use std::fmt;
use std::str::FromStr;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::CaptionError;

// @module: SRT timestamp codec (HH:MM:SS,mmm)

// @const: Full-string timestamp pattern, hours take two or more digits
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,}):(\d{2}):(\d{2}),(\d{3})$").unwrap()
});

/// Slack applied before flooring to milliseconds, so that values such as
/// 1.001 (stored as 1.000999...) do not lose a whole millisecond.
const FLOOR_TOLERANCE_MS: f64 = 1e-6;

/// A subtitle timestamp with millisecond resolution.
///
/// Conversion floors the total `seconds * 1000` after adding a 1e-6 ms slack.
/// This departs from flooring the fractional part alone
/// (`floor((s mod 1) * 1000)`): 2.3 and 1.001 render as `,300` and `,001`
/// here where that formula yields `,299` and `,000`. A timestamp never points
/// more than that slack past its input, and never a full millisecond before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp {
    millis: u64,
}

impl Timestamp {
    /// Build a timestamp from whole milliseconds
    pub const fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    /// Build a timestamp from a seconds value.
    ///
    /// Negative, NaN and infinite inputs are rejected with
    /// [`CaptionError::InvalidTimestamp`].
    pub fn from_seconds(seconds: f64) -> Result<Self, CaptionError> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(CaptionError::InvalidTimestamp(seconds));
        }

        let millis = (seconds * 1000.0 + FLOOR_TOLERANCE_MS).floor();
        if millis >= u64::MAX as f64 {
            return Err(CaptionError::InvalidTimestamp(seconds));
        }

        Ok(Self { millis: millis as u64 })
    }

    /// Total milliseconds
    pub fn as_millis(&self) -> u64 {
        self.millis
    }

    /// Total seconds as a float
    pub fn as_seconds(&self) -> f64 {
        self.millis as f64 / 1000.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.millis / 3_600_000;
        let minutes = (self.millis % 3_600_000) / 60_000;
        let seconds = (self.millis % 60_000) / 1_000;
        let millis = self.millis % 1_000;

        write!(f, "{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl FromStr for Timestamp {
    type Err = CaptionError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let malformed = || CaptionError::MalformedTimestamp(text.to_string());

        let caps = TIMESTAMP_REGEX.captures(text).ok_or_else(malformed)?;
        let field = |idx: usize| -> Result<u64, CaptionError> {
            caps.get(idx)
                .and_then(|m| m.as_str().parse::<u64>().ok())
                .ok_or_else(malformed)
        };

        let hours = field(1)?;
        let minutes = field(2)?;
        let seconds = field(3)?;
        let millis = field(4)?;

        if minutes >= 60 || seconds >= 60 {
            return Err(malformed());
        }

        hours
            .checked_mul(3_600_000)
            .and_then(|ms| ms.checked_add(minutes * 60_000 + seconds * 1_000 + millis))
            .map(Self::from_millis)
            .ok_or_else(malformed)
    }
}

/// Format a seconds value as an SRT timestamp (`HH:MM:SS,mmm`)
pub fn encode_timestamp(seconds: f64) -> Result<String, CaptionError> {
    Ok(Timestamp::from_seconds(seconds)?.to_string())
}

/// Parse an SRT timestamp (`HH:MM:SS,mmm`) into seconds
pub fn decode_timestamp(text: &str) -> Result<f64, CaptionError> {
    Ok(text.parse::<Timestamp>()?.as_seconds())
}
