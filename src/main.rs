// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::Path;

use gengo::app_config::{self, ClientMode, Config, DEFAULT_CONFIG_FILE};
use gengo::{GengoClient, JobDraft, TranslationStatus, TranslationTier};

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

/// CLI Wrapper for TranslationTier to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTier {
    Standard,
    Pro,
    Ultra,
    Machine,
}

impl From<CliTier> for TranslationTier {
    fn from(tier: CliTier) -> Self {
        match tier {
            CliTier::Standard => TranslationTier::Standard,
            CliTier::Pro => TranslationTier::Pro,
            CliTier::Ultra => TranslationTier::Ultra,
            CliTier::Machine => TranslationTier::Machine,
        }
    }
}

/// CLI Wrapper for TranslationStatus to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliStatus {
    Available,
    Pending,
    Reviewable,
    Revising,
    Approved,
    Cancelled,
}

impl From<CliStatus> for TranslationStatus {
    fn from(status: CliStatus) -> Self {
        match status {
            CliStatus::Available => TranslationStatus::Available,
            CliStatus::Pending => TranslationStatus::Pending,
            CliStatus::Reviewable => TranslationStatus::Reviewable,
            CliStatus::Revising => TranslationStatus::Revising,
            CliStatus::Approved => TranslationStatus::Approved,
            CliStatus::Cancelled => TranslationStatus::Cancelled,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the account balance
    Balance,

    /// Show account statistics
    Stats,

    /// List supported languages
    Languages,

    /// List supported language pairs
    Pairs {
        /// Only pairs translating from this language
        #[arg(long)]
        source: Option<String>,
    },

    /// Submit a text job
    Submit(SubmitArgs),

    /// Show a job
    Job {
        /// Job id
        id: i64,

        /// Fill in a machine translation until a human one exists
        #[arg(long)]
        machine_translation: bool,
    },

    /// List recent jobs
    Recent {
        /// Only jobs with this status
        #[arg(long, value_enum)]
        status: Option<CliStatus>,

        /// Maximum number of jobs
        #[arg(long, default_value_t = 10)]
        count: i64,
    },

    /// Generate shell completions for gengo
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct SubmitArgs {
    /// Job title
    #[arg(long)]
    slug: String,

    /// Text to translate
    #[arg(long)]
    body: String,

    /// Source language code (e.g., 'en')
    #[arg(long)]
    source: String,

    /// Target language code (e.g., 'ja')
    #[arg(long)]
    target: String,

    /// Translation tier
    #[arg(long, value_enum, default_value = "standard")]
    tier: CliTier,

    /// Submit even if an identical job exists
    #[arg(long)]
    force: bool,

    /// Require one translator for all jobs
    #[arg(long)]
    as_group: bool,

    /// Allow the group to be split between translators
    #[arg(long)]
    allow_fork: bool,
}

/// gengo - command line client for the Gengo translation API
#[derive(Parser, Debug)]
#[command(name = "gengo")]
#[command(version)]
#[command(about = "Gengo translation API client")]
#[command(long_about = "Command line client for the Gengo human translation API.

EXAMPLES:
    gengo balance                                      # Show remaining credits
    gengo --sandbox languages                          # List languages on the sandbox
    gengo submit --slug hi --body Hello --source en --target ja
    gengo recent --status reviewable --count 5         # Jobs waiting for review
    gengo completions bash > gengo.bash                # Generate bash completions

CONFIGURATION:
    Configuration is stored in gengo.json by default. Keys can also be passed
    with --public-key/--private-key or the GENGO_PUBLIC_KEY/GENGO_PRIVATE_KEY
    environment variables.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long = "config", global = true, default_value = DEFAULT_CONFIG_FILE)]
    config_path: String,

    /// Use the sandbox environment
    #[arg(long, global = true)]
    sandbox: bool,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Public API key
    #[arg(long, global = true, env = "GENGO_PUBLIC_KEY", hide_env_values = true)]
    public_key: Option<String>,

    /// Private API key
    #[arg(long, global = true, env = "GENGO_PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,
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

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
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
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                color,
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
async fn main() -> Result<()> {
    // The logger accepts everything; verbosity is controlled by the max level,
    // which is raised or lowered once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "gengo", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.to_level_filter());

    let client = GengoClient::from_config(&config)
        .with_context(|| format!("Failed to create client for {}", config.endpoint()))?;

    run_command(&client, cli.command).await
}

fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let config_path = &cli.config_path;

    let mut config = if Path::new(config_path).exists() {
        Config::load(config_path)?
    } else {
        warn!("Config file not found at '{}', using defaults.", config_path);
        Config::default()
    };

    // Override config with CLI options if provided
    if let Some(public_key) = &cli.public_key {
        config.public_key = public_key.clone();
    }

    if let Some(private_key) = &cli.private_key {
        config.private_key = private_key.clone();
    }

    if cli.sandbox {
        config.mode = ClientMode::Sandbox;
    }

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config
        .validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

async fn run_command(client: &GengoClient, command: Commands) -> Result<()> {
    match command {
        Commands::Balance => {
            let balance = client.account().balance().await?;
            println!(
                "{:.2} {}",
                balance.credits,
                balance.currency.as_deref().unwrap_or("")
            );
        }
        Commands::Stats => {
            let stats = client.account().stats().await?;
            println!(
                "Spent {:.2} {} since {}",
                stats.credits_spent,
                stats.currency.as_deref().unwrap_or(""),
                stats.user_since.format("%Y-%m-%d")
            );
        }
        Commands::Languages => {
            for language in client.service().languages().await? {
                println!("{:<8} {} ({})", language.code, language.name, language.unit_type);
            }
        }
        Commands::Pairs { source } => {
            let pairs = match source {
                Some(source) => client.service().language_pairs_from(&source).await?,
                None => client.service().language_pairs().await?,
            };

            for pair in pairs {
                println!(
                    "{} -> {} {:<9} {} {}",
                    pair.source_language,
                    pair.target_language,
                    pair.tier.as_str(),
                    pair.unit_price,
                    pair.currency.as_deref().unwrap_or("")
                );
            }
        }
        Commands::Submit(args) => {
            let job = JobDraft::text(args.slug, args.body, args.source, args.target)
                .tier(args.tier.into())
                .force(args.force);

            let confirmation = client
                .jobs()
                .submit(args.as_group, args.allow_fork, vec![job])
                .await?;

            info!(
                "Order {}: {} job(s), {} {}",
                confirmation.order_id,
                confirmation.job_count,
                confirmation.credits_used,
                confirmation.currency.as_deref().unwrap_or("")
            );

            for dup in &confirmation.duplicates {
                let ids: Vec<String> = dup.existing_jobs.iter().map(|j| j.id().to_string()).collect();
                warn!("'{}' duplicates existing job(s) {}", dup.job.slug(), ids.join(", "));
            }
        }
        Commands::Job {
            id,
            machine_translation,
        } => {
            let job = client.job().get(id, machine_translation).await?;
            println!("#{} {} [{}]", job.id(), job.slug().unwrap_or(""), job.status());
            if let Some(body) = job.body_translated() {
                println!("{}", body);
            }
        }
        Commands::Recent { status, count } => {
            let recent = client
                .jobs()
                .recent(status.map(Into::into), None, count)
                .await?;

            for entry in recent {
                let created = entry
                    .created
                    .map(|c| c.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_default();
                println!("{:>10} {}", entry.id, created);
            }
        }
        Commands::Completions { .. } => {
            return Err(anyhow!("Completions are handled before loading the config"));
        }
    }

    Ok(())
}
