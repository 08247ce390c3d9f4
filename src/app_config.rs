use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::display::DEFAULT_MAX_WORDS_PER_CHUNK;
use crate::file_utils::FileManager;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Display caption settings
    #[serde(default)]
    pub captions: CaptionConfig,

    /// Which artifacts to write and how
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Display caption configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CaptionConfig {
    /// Maximum words shown in one on-screen caption
    #[serde(default = "default_max_words_per_chunk")]
    pub max_words_per_chunk: usize,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            max_words_per_chunk: default_max_words_per_chunk(),
        }
    }
}

/// Output configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    // @field: Write <stem>.srt
    #[serde(default = "default_true")]
    pub write_srt: bool,

    // @field: Write <stem>.captions.json
    #[serde(default = "default_true")]
    pub write_captions_json: bool,

    // @field: Embed re-chunked display captions in the JSON bundle
    #[serde(default = "default_true")]
    pub include_display_captions: bool,

    // @field: Indent JSON output
    #[serde(default = "default_true")]
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            write_srt: true,
            write_captions_json: true,
            include_display_captions: true,
            pretty_json: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_max_words_per_chunk() -> usize {
    DEFAULT_MAX_WORDS_PER_CHUNK
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        FileManager::write_to_file(path, &json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.captions.max_words_per_chunk == 0 {
            return Err(anyhow!("captions.max_words_per_chunk must be at least 1"));
        }

        if !self.output.write_srt && !self.output.write_captions_json {
            return Err(anyhow!("Output configuration disables every output file"));
        }

        Ok(())
    }
}
