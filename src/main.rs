// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use capsync::app_config::{Config, LogLevel};
use capsync::app_controller::Controller;
use capsync::display::{rechunk, resolve};
use capsync::file_utils::FileManager;
use capsync::transcript::TranscriptSegment;
use capsync::validation;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate SRT and caption JSON from transcripts (default command)
    Generate(GenerateArgs),

    /// Check an SRT file for overlapping or empty timings
    Validate {
        /// SRT file to check
        #[arg(value_name = "SRT_FILE")]
        input_path: PathBuf,
    },

    /// Print re-chunked display captions as JSON
    Rechunk(DisplayArgs),

    /// Print the caption and word highlighted at a playback time
    Highlight {
        #[command(flatten)]
        display: DisplayArgs,

        /// Playback time in seconds
        #[arg(short, long)]
        time: f64,
    },

    /// Generate shell completions for capsync
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Transcript file (JSON or SRT) or directory of JSON transcripts
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Directory for output files (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Maximum words per display caption
    #[arg(short = 'w', long)]
    max_words: Option<usize>,
}

#[derive(Args, Debug)]
struct DisplayArgs {
    /// Transcript file (JSON or SRT)
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Maximum words per display caption
    #[arg(short = 'w', long)]
    max_words: Option<usize>,
}

/// capsync - caption timing and subtitle codec
///
/// Turns speech-transcription segments into SRT subtitles and word-highlighted
/// display captions.
#[derive(Parser, Debug)]
#[command(name = "capsync")]
#[command(version)]
#[command(about = "Subtitle generation and caption timing from transcripts")]
#[command(long_about = "capsync turns transcriber output into SRT subtitles and short display captions.

EXAMPLES:
    capsync talk.json                         # Write talk.srt and talk.captions.json
    capsync generate -w 4 talk.json           # Four words per display caption
    capsync generate -f /transcripts/         # Process a directory, overwrite outputs
    capsync validate talk.srt                 # Report overlapping or empty timings
    capsync rechunk talk.json                 # Print display captions
    capsync highlight --time 12.5 talk.json   # Caption and word active at 12.5s
    capsync completions bash > capsync.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Transcript file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Directory for output files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Maximum words per display caption
    #[arg(short = 'w', long)]
    max_words: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Tag and ANSI colour for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("ERROR", "1;31"),
            Level::Warn => ("WARN ", "1;33"),
            Level::Info => ("INFO ", "1;32"),
            Level::Debug => ("DEBUG", "1;36"),
            Level::Trace => ("TRACE", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (tag, colour) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", colour, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Start at info; the config or --log-level adjusts it later
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(level) = cli.log_level {
        log::set_max_level(LogLevel::from(level).to_level_filter());
    }

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "capsync", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Validate { input_path }) => run_validate(&input_path),
        Some(Commands::Generate(args)) => {
            let config = load_config(&cli.config_path, cli.log_level, args.max_words)?;
            run_generate(config, args).await
        }
        Some(Commands::Rechunk(args)) => {
            let config = load_config(&cli.config_path, cli.log_level, args.max_words)?;
            let captions = load_display_captions(&config, &args.input_path).await?;
            print_json(&captions)
        }
        Some(Commands::Highlight { display, time }) => {
            let config = load_config(&cli.config_path, cli.log_level, display.max_words)?;
            let captions = load_display_captions(&config, &display.input_path).await?;
            let state = resolve(time, &captions);
            if !state.is_active() {
                info!("No caption is active at {}s", time);
            }
            print_json(&state)
        }
        None => {
            // Default behavior - use top-level args as the generate command
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            let args = GenerateArgs {
                input_path,
                output_dir: cli.output_dir,
                force_overwrite: cli.force_overwrite,
                max_words: cli.max_words,
            };
            let config = load_config(&cli.config_path, cli.log_level, args.max_words)?;
            run_generate(config, args).await
        }
    }
}

/// Load or create configuration, then apply command line overrides
fn load_config(config_path: &str, log_level: Option<CliLogLevel>, max_words: Option<usize>) -> Result<Config> {
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        config.save(config_path)
            .context(format!("Failed to write default config to file: {}", config_path))?;
        config
    };

    if let Some(level) = log_level {
        config.log_level = level.into();
    }

    if let Some(max_words) = max_words {
        config.captions.max_words_per_chunk = max_words;
    }

    config.validate()
        .context("Configuration validation failed")?;

    // Command line level already applied; otherwise follow the config
    if log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    Ok(config)
}

async fn run_generate(config: Config, args: GenerateArgs) -> Result<()> {
    let controller = Controller::with_config(config)?;

    if args.input_path.is_file() {
        let output_dir = args.output_dir.unwrap_or_else(|| {
            args.input_path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or(Path::new("."))
                .to_path_buf()
        });
        controller.run(args.input_path, output_dir, args.force_overwrite).await?;
    } else if args.input_path.is_dir() {
        if args.output_dir.is_some() {
            warn!("--output-dir is ignored in directory mode; outputs go next to each transcript");
        }
        let summary = controller.run_folder(args.input_path, args.force_overwrite).await?;
        if summary.failed > 0 {
            return Err(anyhow!("{} transcript(s) failed to process", summary.failed));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", args.input_path));
    }

    Ok(())
}

fn run_validate(input_path: &Path) -> Result<()> {
    let content = FileManager::read_to_string(input_path)?;
    let result = validation::validate(&content);

    if result.is_valid {
        info!("{:?}: subtitle timing is valid", input_path);
    } else {
        for error in &result.errors {
            warn!("{:?}: {}", input_path, error);
        }
    }

    print_json(&result)
}

async fn load_display_captions(config: &Config, input_path: &Path) -> Result<Vec<capsync::DisplayCaption>> {
    let controller = Controller::with_config(config.clone())?;
    let segments: Vec<TranscriptSegment> = controller
        .load_segments(input_path)
        .await?
        .iter()
        .map(TranscriptSegment::normalized)
        .collect();

    Ok(rechunk(&segments, config.captions.max_words_per_chunk))
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
