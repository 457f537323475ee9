//! # epr
//!
//! Command-line client for the Event Provenance Registry. Results are
//! printed to stdout as JSON; logs go to stderr.

#![deny(unsafe_code)]

mod args;
mod output;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use epr_client::{
    Client, ClientConfig, ClientError, create, plan_create, plan_search, search,
};
use epr_logging::{LoggingConfig, init_logging};
use epr_settings::EprSettings;
use tracing::{Level, debug, error};

use crate::args::{CreateTarget, SearchTarget};

/// Event Provenance Registry client.
#[derive(Parser, Debug)]
#[command(name = "epr", about = "Event Provenance Registry client")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Default)]
struct GlobalArgs {
    /// Registry base URL (overrides settings).
    #[arg(long, global = true)]
    url: Option<String>,

    /// Bearer token (overrides settings).
    #[arg(long, global = true)]
    token: Option<String>,

    /// Enable debug logging.
    #[arg(long, global = true)]
    debug: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Settings file (default: `~/.epr/settings.json`).
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Print the GraphQL documents instead of sending them.
    #[arg(long)]
    dry_run: bool,

    /// JSONPath expression applied to the output.
    #[arg(long)]
    jsonpath: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create events, event receivers, and event receiver groups.
    Create {
        #[command(flatten)]
        run: RunArgs,
        #[command(subcommand)]
        target: CreateTarget,
    },
    /// Search events, event receivers, and event receiver groups.
    Search {
        #[command(flatten)]
        run: RunArgs,
        #[command(subcommand)]
        target: SearchTarget,
    },
    /// Print name and version.
    Version,
}

/// Settings from file and environment, with command-line flags on top.
fn resolve_settings(global: &GlobalArgs) -> Result<EprSettings> {
    let mut settings = match &global.settings {
        Some(path) => epr_settings::load_settings_from_path(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => epr_settings::load_settings().context("failed to load settings")?,
    };
    apply_flags(&mut settings, global);
    settings.validate().context("invalid settings")?;
    Ok(settings)
}

fn apply_flags(settings: &mut EprSettings, global: &GlobalArgs) {
    if let Some(url) = &global.url {
        settings.url.clone_from(url);
    }
    if let Some(token) = &global.token {
        settings.token = Some(token.clone());
    }
    if global.debug {
        settings.debug = true;
    }
    if global.log_json {
        settings.logging.json = true;
    }
}

fn logging_config(settings: &EprSettings) -> LoggingConfig {
    let mut config =
        LoggingConfig::from_level_name(settings.effective_log_level(), settings.logging.json);
    config.module_levels = vec![
        ("hyper_util".to_string(), Level::WARN),
        ("reqwest".to_string(), Level::WARN),
    ];
    config
}

fn client_config(settings: &EprSettings) -> ClientConfig {
    let config = ClientConfig {
        connect_timeout: Duration::from_millis(settings.connect_timeout_ms),
        request_timeout: Duration::from_millis(settings.request_timeout_ms),
        ..ClientConfig::new(settings.url.clone())
    };
    match &settings.token {
        Some(token) => config.with_token(token.clone()),
        None => config,
    }
}

/// Resolve settings and install logging for commands that talk to the registry.
fn start(global: &GlobalArgs) -> Result<EprSettings> {
    let settings = resolve_settings(global)?;
    init_logging(&logging_config(&settings)).context("failed to initialize logging")?;
    debug!(url = %settings.url, "settings resolved");
    Ok(settings)
}

/// Classification of a failed run, when it came from the registry client.
fn failure_class(err: &anyhow::Error) -> Option<(&'static str, bool)> {
    err.downcast_ref::<ClientError>()
        .map(|client_err| (client_err.error_kind(), client_err.is_fatal()))
}

async fn run(cli: Cli) -> Result<()> {
    let rendered = match cli.command {
        Command::Version => epr_core::constants::info(),
        Command::Create { run, target } => {
            let settings = start(&cli.global)?;
            let config = target.into_config();
            if run.dry_run {
                let plan = plan_create(&config).context("failed to plan create")?;
                output::render(&plan, run.jsonpath.as_deref())?
            } else {
                let client = Client::new(&client_config(&settings))?;
                let results = create(&client, &config).await.context("create failed")?;
                output::render(&results, run.jsonpath.as_deref())?
            }
        }
        Command::Search { run, target } => {
            let settings = start(&cli.global)?;
            let config = target.into_config();
            if run.dry_run {
                let plan = plan_search(&config).context("failed to plan search")?;
                output::render(&plan, run.jsonpath.as_deref())?
            } else {
                let client = Client::new(&client_config(&settings))?;
                let results = search(&client, &config).await.context("search failed")?;
                output::render(&results, run.jsonpath.as_deref())?
            }
        }
    };
    println!("{rendered}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let result = run(Cli::parse()).await;
    if let Err(err) = &result {
        match failure_class(err) {
            Some((kind, fatal)) => error!(kind, fatal, "{err:#}"),
            None => error!("{err:#}"),
        }
    }
    result
}

// ─── Tests ───────────────────────────────────────────────────────────────────
