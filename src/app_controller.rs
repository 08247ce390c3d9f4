use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::display::{DisplayCaption, rechunk};
use crate::errors::CaptionError;
use crate::file_utils::{FileManager, FileType};
use crate::subtitle_processor::{self, TimedCaption};
use crate::transcript::{self, TranscriptSegment};
use crate::validation::{self, ValidationResult};

// @module: Application controller for caption generation

/// Everything produced for one transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionBundle {
    /// Name of the input the bundle was built from
    pub filename: String,
    /// SRT interchange text
    pub srt: String,
    /// Millisecond-timed captions, one per segment
    pub captions: Vec<TimedCaption>,
    /// Re-chunked captions for highlighted playback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_captions: Option<Vec<DisplayCaption>>,
    /// Segments as received from the transcriber
    pub transcription: Vec<TranscriptSegment>,
    /// End of the last segment in seconds, 0 when empty
    pub duration: f64,
    /// Number of segments
    pub segment_count: usize,
    /// Timing check of the SRT text
    pub validation: ValidationResult,
}

/// Counts from a folder run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller for caption generation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the caption pipeline over segments.
    ///
    /// Validation problems are logged and carried in the bundle; only an
    /// unrepresentable timestamp fails the call.
    pub fn build_bundle(&self, filename: &str, segments: Vec<TranscriptSegment>) -> Result<CaptionBundle, CaptionError> {
        let srt = subtitle_processor::encode(&segments)?;
        let captions = subtitle_processor::to_timed_captions(&segments);

        let display_captions = self.config.output.include_display_captions.then(|| {
            let normalized: Vec<TranscriptSegment> = segments.iter().map(TranscriptSegment::normalized).collect();
            rechunk(&normalized, self.config.captions.max_words_per_chunk)
        });

        let validation = validation::validate(&srt);
        if !validation.is_valid {
            warn!("Subtitle validation warnings for {}: {}", filename, validation.errors.join("; "));
        }

        if let Some(captions) = display_captions.as_deref().filter(|captions| !captions.is_empty()) {
            let display_check = validation::validate_captions(captions);
            if !display_check.is_valid {
                debug!("Display caption timing issues for {}: {}", filename, display_check.errors.join("; "));
            }
        }

        debug!(
            "Built caption bundle for {}: {} segments, {} display captions",
            filename,
            segments.len(),
            display_captions.as_ref().map_or(0, Vec::len)
        );

        Ok(CaptionBundle {
            filename: filename.to_string(),
            srt,
            captions,
            display_captions,
            duration: segments.last().map_or(0.0, |s| s.end),
            segment_count: segments.len(),
            transcription: segments,
            validation,
        })
    }

    /// Read segments from a transcript JSON or SRT file
    pub async fn load_segments(&self, input_file: &Path) -> Result<Vec<TranscriptSegment>> {
        let file_type = FileManager::detect_file_type(input_file)?;
        let content = tokio::fs::read_to_string(input_file)
            .await
            .with_context(|| format!("Failed to read input file: {:?}", input_file))?;

        match file_type {
            FileType::Transcript => transcript::parse_transcript_json(&content)
                .with_context(|| format!("Failed to parse transcript: {:?}", input_file)),
            FileType::Subtitle => Ok(transcript::segments_from_srt(&content)),
            FileType::Unknown => Err(anyhow!("Unsupported input file: {:?}", input_file)),
        }
    }

    /// Output paths for an input: (srt, captions json)
    pub fn output_paths(&self, input_file: &Path, output_dir: &Path) -> (PathBuf, PathBuf) {
        let mut srt_path = FileManager::generate_output_path(input_file, output_dir, None, "srt");
        // Never write over an SRT input, however either path is spelled
        if FileManager::same_file(&srt_path, input_file) {
            srt_path = FileManager::generate_output_path(input_file, output_dir, Some("captions"), "srt");
        }
        let json_path = FileManager::generate_output_path(input_file, output_dir, Some("captions"), "json");
        (srt_path, json_path)
    }

    /// Process one transcript file and write the enabled outputs.
    ///
    /// Returns `None` when outputs already exist and `force_overwrite` is off.
    pub async fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<Option<CaptionBundle>> {
        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        FileManager::ensure_dir(&output_dir)?;

        let output = &self.config.output;
        let (srt_path, json_path) = self.output_paths(&input_file, &output_dir);
        let existing = (output.write_srt && FileManager::file_exists(&srt_path))
            || (output.write_captions_json && FileManager::file_exists(&json_path));
        if existing && !force_overwrite {
            warn!("Skipping {:?}, captions already exist (use -f to force overwrite)", input_file);
            return Ok(None);
        }

        let segments = self.load_segments(&input_file).await?;
        if segments.is_empty() {
            warn!("No transcript segments found in {:?}", input_file);
        }

        let filename = input_file
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        let bundle = self.build_bundle(&filename, segments)
            .with_context(|| format!("Failed to build captions for {:?}", input_file))?;

        if output.write_srt {
            tokio::fs::write(&srt_path, &bundle.srt)
                .await
                .with_context(|| format!("Failed to write subtitle file: {:?}", srt_path))?;
            info!("Wrote {:?}", srt_path);
        }

        if output.write_captions_json {
            let json = self.bundle_to_json(&bundle)?;
            tokio::fs::write(&json_path, json)
                .await
                .with_context(|| format!("Failed to write captions file: {:?}", json_path))?;
            info!("Wrote {:?}", json_path);
        }

        Ok(Some(bundle))
    }

    /// Run the workflow in folder mode, processing all JSON transcripts in a directory.
    ///
    /// A failing file is logged and counted; the rest of the folder still runs.
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let files = FileManager::find_transcript_files(&input_dir)?;
        if files.is_empty() {
            warn!("No transcript files found in {:?}", input_dir);
            return Ok(FolderSummary::default());
        }

        info!("Found {} transcript files in {:?}", files.len(), input_dir);

        let folder_pb = ProgressBar::new(files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("=> "));
        folder_pb.set_message("Generating captions");

        let mut summary = FolderSummary::default();
        for file in files {
            let output_dir = file.parent().unwrap_or(Path::new(".")).to_path_buf();
            match self.run(file.clone(), output_dir, force_overwrite).await {
                Ok(Some(_)) => summary.processed += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing {:?}: {:#}", file, e);
                    summary.failed += 1;
                }
            }
            folder_pb.inc(1);
        }

        folder_pb.finish_and_clear();

        info!(
            "Finished in {}: {} processed, {} skipped, {} failed",
            Self::format_duration(start_time.elapsed()),
            summary.processed,
            summary.skipped,
            summary.failed
        );

        Ok(summary)
    }

    /// Serialize a bundle according to the output configuration
    pub fn bundle_to_json(&self, bundle: &CaptionBundle) -> Result<String> {
        let json = if self.config.output.pretty_json {
            serde_json::to_string_pretty(bundle)
        } else {
            serde_json::to_string(bundle)
        };
        json.context("Failed to serialize caption bundle")
    }

    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
