//! `dualsub` - inspect cue files and replay subtitle pairs against a simulated clock

mod commands;
mod fetcher;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a cue file and print its cues
    Parse {
        /// Cue file to read
        file: PathBuf,
        /// Print cues as JSON
        #[arg(long)]
        json: bool,
        /// Drop cues whose end precedes their start
        #[arg(long)]
        reject_inverted: bool,
    },
    /// List diagnostics reported while parsing a cue file
    Issues {
        /// Cue file to read
        file: PathBuf,
        /// Fail when any warning is reported
        #[arg(long)]
        deny_warnings: bool,
    },
    /// Play two cue files through a session and print every transition
    Replay {
        /// Primary-language cue file
        primary: PathBuf,
        /// Secondary-language cue file
        secondary: PathBuf,
        /// Language code of the primary file
        #[arg(long, default_value = "en")]
        primary_lang: String,
        /// Language code of the secondary file
        #[arg(long, default_value = "tr")]
        secondary_lang: String,
        /// Tick interval in milliseconds
        #[arg(long, default_value_t = 250)]
        step: u64,
        /// Playback position to start from, in seconds
        #[arg(long, default_value_t = 0.0)]
        from: f64,
        /// Stop after this position in milliseconds (default: end of the last cue)
        #[arg(long)]
        until: Option<u64>,
        /// Suppress secondary transitions in the output
        #[arg(long)]
        hide_secondary: bool,
    },
    /// List the subtitle languages of a player configuration document
    Catalog {
        /// Player configuration JSON file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Parse {
            file,
            json,
            reject_inverted,
        } => commands::parse(&file, json, reject_inverted, &mut out),
        Command::Issues {
            file,
            deny_warnings,
        } => commands::issues(&file, deny_warnings, &mut out),
        Command::Replay {
            primary,
            secondary,
            primary_lang,
            secondary_lang,
            step,
            from,
            until,
            hide_secondary,
        } => {
            let options = commands::ReplayOptions {
                primary_lang,
                secondary_lang,
                step,
                from,
                until,
                hide_secondary,
            };
            commands::replay(&primary, &secondary, &options, &mut out).await
        }
        Command::Catalog { file } => commands::catalog(&file, &mut out),
    }
}
