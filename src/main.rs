//! `embedres` CLI - Resolve video embeds and inspect content feeds

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use embedres::EmbedConfig;

#[derive(Parser)]
#[command(name = "embedres")]
#[command(about = "Resolve video embed descriptors into playable frame URLs")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (default: ~/.config/embedres/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a single embed descriptor
    Resolve {
        /// Player or watch page URL (protocol-relative URLs allowed)
        #[arg(long, conflicts_with_all = ["iframe", "bvid"])]
        player_url: Option<String>,

        /// Raw iframe HTML snippet
        #[arg(long, conflicts_with = "bvid")]
        iframe: Option<String>,

        /// Bilibili BV id
        #[arg(long)]
        bvid: Option<String>,

        /// Part number for --bvid
        #[arg(long, requires = "bvid")]
        page: Option<u32>,

        /// Self-hosted media fallback
        #[arg(long)]
        src: Option<String>,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve the embed of one item in a local content feed
    Inspect {
        /// Feed file (JSON with an `items` array)
        file: PathBuf,

        /// Item slug or numeric id
        slug: String,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => EmbedConfig::load_from(path)?,
        None => EmbedConfig::load()?,
    };

    match cli.command {
        Commands::Resolve {
            player_url,
            iframe,
            bvid,
            page,
            src,
            json,
        } => {
            let descriptor = cmd::resolve::descriptor_from_args(player_url, iframe, bvid, page);
            cmd::resolve::cmd_resolve(&config, descriptor.as_ref(), src.as_deref(), json)?;
        }
        Commands::Inspect { file, slug, json } => {
            cmd::inspect::cmd_inspect(&config, &file, &slug, json)?;
        }
        Commands::Config => {
            cmd::config::cmd_config(&config, cli.config.as_deref())?;
        }
    }

    Ok(())
}

/// Log to stderr so `--json` output on stdout stays clean.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
