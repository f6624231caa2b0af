//! Vidseek CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vidseek::cli::{commands, Cli, Commands, Output};
use vidseek::config::Settings;

#[tokio::main]
async fn main() {
    // Credentials may live in a local .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Commands leave error reporting to this single place
    if let Err(e) = run(cli).await {
        Output::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("vidseek={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Execute command
    match &cli.command {
        Commands::Find {
            query,
            max,
            outdir,
            region,
            fallback,
            cookies,
        } => {
            let options = commands::FindOptions {
                max: *max,
                outdir: outdir.clone(),
                region: region.clone(),
                fallback: *fallback,
                cookies: cookies.clone(),
            };
            commands::run_find(query, options, settings).await?;
        }

        Commands::Transcript {
            input,
            outdir,
            fallback,
            cookies,
        } => {
            let options = commands::TranscriptOptions {
                outdir: outdir.clone(),
                fallback: *fallback,
                cookies: cookies.clone(),
            };
            commands::run_transcript(input, options, settings).await?;
        }

        Commands::Vtt { file } => {
            commands::run_vtt(file)?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings, cli.config.as_deref())?;
        }
    }

    Ok(())
}
