// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error};
use std::io::Write;
use std::path::PathBuf;

use locapipe::app_config::{self, Config, TranslationProvider};
use locapipe::errors::AppError;
use locapipe::app_controller::Controller;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    #[value(name = "openai")]
    OpenAI,
    Anthropic,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::OpenAI => TranslationProvider::OpenAI,
            CliTranslationProvider::Anthropic => TranslationProvider::Anthropic,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate missing locale variants (default command)
    Generate(GenerateArgs),

    /// Generate shell completions for locapipe
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct GenerateArgs {
    /// Content root directory (overrides the config file)
    #[arg(long, value_name = "DIR", env = "LOCAPIPE_CONTENT_ROOT")]
    content_root: Option<PathBuf>,

    /// Target locale to generate; repeat for several (default: all)
    #[arg(short = 't', long = "locale", value_name = "CODE", env = "LOCAPIPE_LOCALES", value_delimiter = ',')]
    locales: Vec<String>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "locapipe.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Report what would be created without translating or writing
    #[arg(long)]
    dry_run: bool,

    /// Disable the progress spinner
    #[arg(long)]
    no_progress: bool,
}

/// locapipe - Localized content generation for static sites
///
/// Walks a content tree of English Markdown documents and writes translated
/// locale variants next to each one, then does the same for the site's
/// navigation and metadata JSON.
#[derive(Parser, Debug)]
#[command(name = "locapipe")]
#[command(version)]
#[command(about = "Generate localized variants of site content")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "locapipe generates missing locale variants (sv, de, fr) of English site content.

EXAMPLES:
    locapipe                                    # Generate every missing variant
    locapipe --locale sv                        # Only Swedish
    locapipe --dry-run                          # List what would be created
    locapipe -p anthropic -m claude-3-5-haiku-latest
    locapipe --content-root site/content        # Use another content tree
    locapipe completions bash > locapipe.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in locapipe.json by default. If the file doesn't
    exist, a default one is created automatically. API keys are read from
    OPENAI_API_KEY or ANTHROPIC_API_KEY (a .env file is honored). Without a
    key, translations come from the built-in translation memory.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() {
    // Trace is the ceiling; the effective level is set once config is known
    if CustomLogger::init(LevelFilter::Trace).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }

    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = CommandLineOptions::parse();

    let result = match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "locapipe", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Generate(args)) => run_generate(args).await,
        None => run_generate(cli.generate).await,
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run_generate(options: GenerateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;
    apply_overrides(&mut config, &options);
    config.apply_env_api_key();
    config
        .validate()
        .map_err(|e| AppError::Config(format!("{:#}", e)))
        .context("Configuration validation failed")?;

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config)?
        .dry_run(options.dry_run)
        .show_progress(!options.no_progress);

    controller.run().await?;
    Ok(())
}

// Override config with CLI options if provided
fn apply_overrides(config: &mut Config, options: &GenerateArgs) {
    if let Some(root) = &options.content_root {
        config.content.root = root.clone();
    }
    if !options.locales.is_empty() {
        config.content.target_locales = options.locales.clone();
    }
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }
    if let Some(model) = &options.model {
        config.translation.set_model(model.clone());
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
}
