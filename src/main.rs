use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use internet_times_bot::application::context::AppContext;
use internet_times_bot::application::errors::{BotError, ConfigError};
use internet_times_bot::application::messaging::EventDispatcher;
use internet_times_bot::application::services::register_defaults;
use internet_times_bot::domain::entities::{Channel, CommandRegistry};
use internet_times_bot::infrastructure::adapters::console::ConsoleAdapter;
use internet_times_bot::infrastructure::adapters::discord;
use internet_times_bot::infrastructure::config::{Config, TOKEN_ENV};
use internet_times_bot::infrastructure::feed::HttpFeedClient;

#[derive(Parser)]
#[command(name = "internet-times-bot")]
#[command(about = "Community bot for The Internet Times", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml", global = true)]
    config: String,

    /// Bot token (overrides environment and config)
    #[arg(short, long, global = true)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Discord and serve the guild
    Run,
    /// Read commands from stdin (dev mode, no token needed)
    Console {
        /// Channel name the commands appear to come from
        #[arg(long)]
        channel: Option<String>,
    },
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() -> ExitCode {
    // Load .env before logging so RUST_LOG can come from it
    let dotenv = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    if let Err(e) = dotenv {
        tracing::debug!("No .env loaded: {}", e);
    }

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run => run_bot(&cli.config, cli.token),
        Commands::Console { channel } => run_console(&cli.config, channel),
        Commands::Version => {
            println!("internet-times-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(BotError::Config(ConfigError::MissingField(field))) if field == TOKEN_ENV => {
            tracing::error!("Bot token not found! Set {} in the environment or .env file.", TOKEN_ENV);
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_bot(config_path: &str, token_override: Option<String>) -> Result<(), BotError> {
    let mut config = Config::load_or_default(config_path)?;
    if let Some(token) = token_override {
        config.discord.token = Some(token);
    }
    let token = config.token()?.to_string();

    tracing::info!("Starting {}", config.bot.name);
    let dispatcher = build_dispatcher(config)?;

    runtime()?.block_on(discord::start_bot(&token, dispatcher))
}

fn run_console(config_path: &str, channel: Option<String>) -> Result<(), BotError> {
    let config = Config::load_or_default(config_path)?;
    let channel_name = channel
        .or_else(|| config.channels.lounges.first().cloned())
        .unwrap_or_else(|| "general".to_string());

    let adapter = ConsoleAdapter::new(&config.bot.name);
    let dispatcher = build_dispatcher(config)?;

    tracing::info!("Starting console bot (dev mode) in #{}", channel_name);
    runtime()?.block_on(adapter.run(&dispatcher, Channel::new("1", channel_name)))
}

fn build_dispatcher(config: Config) -> Result<Arc<EventDispatcher>, BotError> {
    let feed = HttpFeedClient::new(Duration::from_secs(config.feed.timeout_seconds))?;

    let mut registry = CommandRegistry::new();
    register_defaults(&mut registry)?;
    tracing::info!("Registered {} commands", registry.len());

    let app = AppContext::new(registry, config, Arc::new(feed));
    Ok(Arc::new(EventDispatcher::new(Arc::new(app))))
}

fn runtime() -> Result<tokio::runtime::Runtime, BotError> {
    tokio::runtime::Runtime::new().map_err(|e| BotError::Internal(format!("Failed to start runtime: {}", e)))
}

fn init_config() -> Result<(), BotError> {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config)
        .map_err(|e| BotError::Internal(format!("Failed to render config: {}", e)))?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}
