//! emote-sync CLI
//!
//! Rewrites the emote tokens in a bot's source file so every token points at
//! an emote that exists on one of the configured Discord guilds, uploading
//! missing emotes where needed.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use config::{mask_token, Config};
use emote_sync::{Artifact, CancelFlag, HttpImageFetcher, ResolutionKind, SyncEngine, SyncReport};
use emote_sync_discord::{DiscordConfig, DiscordPlatform};

#[derive(Parser)]
#[command(name = "emote-sync")]
#[command(about = "Keep emote tokens in a source file in sync with Discord guilds", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.config/emote-sync/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile the emote file with the guilds and rewrite it
    Sync {
        /// Discord bot token
        #[arg(long)]
        token: Option<String>,
        /// Guild to upload to (repeatable, tried in the given order)
        #[arg(short, long = "guild")]
        guilds: Vec<u64>,
        /// Emote file to rewrite
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// List the emote tokens declared in the emote file
    Scan {
        /// Emote file to read
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config;
    match cli.command {
        Commands::Sync {
            token,
            guilds,
            file,
        } => cmd_sync(config_path.as_deref(), token, guilds, file).await,
        Commands::Scan { file } => cmd_scan(config_path.as_deref(), file),
        Commands::Config => cmd_config(config_path.as_deref()),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "emote_sync=debug,emote_sync_discord=debug"
    } else {
        "emote_sync=info,emote_sync_discord=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = Config::load(path)?;
    config.apply_env(|key| std::env::var(key).ok())?;
    Ok(config)
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_sync(
    config_path: Option<&Path>,
    token: Option<String>,
    guilds: Vec<u64>,
    file: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    config.apply_overrides(token, guilds, file);
    let settings = config.resolve()?;

    let fetcher =
        HttpImageFetcher::new(settings.fetch_timeout).context("Failed to build HTTP client")?;
    let platform = DiscordPlatform::new(DiscordConfig::new(&settings.token));

    let cancel = CancelFlag::new();
    tokio::spawn(handle_interrupts(tokio::signal::ctrl_c, cancel.clone(), || {
        std::process::exit(130)
    }));

    let report = SyncEngine::new(&platform, &fetcher)
        .with_cancel_flag(cancel)
        .sync(&settings.emote_file, &settings.guild_ids)
        .await
        .with_context(|| format!("Emote sync failed for {:?}", settings.emote_file))?;

    print_report(&report);
    Ok(())
}

/// First interrupt lets the current emote finish; a second one exits at once
async fn handle_interrupts<S, F>(mut next_signal: S, cancel: CancelFlag, force_exit: impl FnOnce())
where
    S: FnMut() -> F,
    F: Future<Output = std::io::Result<()>>,
{
    if next_signal().await.is_err() {
        return;
    }
    warn!("Shutdown requested, finishing the current emote (Ctrl-C again to quit now)");
    cancel.cancel();

    if next_signal().await.is_ok() {
        warn!("Second interrupt, exiting without saving");
        force_exit();
    }
}

fn print_report(report: &SyncReport) {
    println!(
        "{} {} resolved ({} already present, {} matched, {} uploaded)",
        "✓".green(),
        report.resolved_count(),
        report.count(ResolutionKind::AlreadyPresent),
        report.count(ResolutionKind::Matched),
        report.uploaded_count()
    );

    if report.failed_count() > 0 {
        println!("{} {} failed", "✗".red(), report.failed_count());
        for (name, reason) in report.failures() {
            println!("  {} {}", name.cyan(), reason.to_string().dimmed());
        }
    }

    if report.was_cancelled() {
        println!("{}", "Run cancelled before all emotes were processed".yellow());
    }

    if report.written {
        println!("{} Updated {:?}", "✓".green(), report.path);
    } else {
        println!("{}", "Emote file unchanged".dimmed());
    }
}

fn cmd_scan(config_path: Option<&Path>, file: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;
    let path = file.unwrap_or_else(|| config.emote_file());

    let artifact = Artifact::load(&path)?;
    let catalog = artifact.catalog();

    if catalog.is_empty() {
        println!("No emote tokens found in {:?}", path);
        return Ok(());
    }

    println!("{} ({} emotes)", "Emote tokens:".bold(), catalog.len());
    for token in catalog.iter() {
        let kind = if token.animated { "animated" } else { "static" };
        println!(
            "  {} {} {} {}",
            token.name.cyan(),
            token.id,
            kind.dimmed(),
            token.download_url().dimmed()
        );
    }

    Ok(())
}

fn cmd_config(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;

    println!("{}", "Configuration:".bold());
    match config_path {
        Some(path) => println!("  Config file: {:?}", path),
        None => println!("  Config file: {:?}", Config::config_path()?),
    }
    println!(
        "  Token: {}",
        config
            .token
            .as_deref()
            .map(mask_token)
            .unwrap_or_else(|| "(not set)".dimmed().to_string())
    );

    if config.guild_ids.is_empty() {
        println!("  Guilds: {}", "(none)".dimmed());
    } else {
        let guilds: Vec<String> = config.guild_ids.iter().map(|id| id.to_string()).collect();
        println!("  Guilds: {}", guilds.join(", "));
    }
    println!("  Emote file: {:?}", config.emote_file());
    println!("  Fetch timeout: {}s", config.fetch_timeout().as_secs());

    Ok(())
}
