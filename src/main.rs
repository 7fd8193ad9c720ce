//! reddit2md main entry point
//!
//! This is the command-line interface for the reddit2md chain exporter.

use anyhow::Context;
use clap::Parser;
use reddit2md::config::{apply_env, load_config, validate, Config};
use reddit2md::{Coordinator, RedditClient};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// reddit2md: pack a chain of Reddit posts into md or epub
///
/// Converts chains of Reddit posts into a collection of markdown files,
/// optionally bundled into an EPUB. It finds the link to the next post in
/// each post body and follows the chain until there are none left.
///
/// REDDIT_CLIENT_ID and REDDIT_CLIENT_SECRET must be set before use. The
/// `pandoc` tool is required for bundling.
#[derive(Parser, Debug)]
#[command(name = "reddit2md")]
#[command(version)]
#[command(about = "Pack a chain of Reddit posts into md or epub", long_about = None)]
struct Cli {
    /// URL of the first Reddit post in the chain
    #[arg(value_name = "URL")]
    url: String,

    /// Output directory for markdown and bundled files (created if missing)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Bundle file written inside the output directory (supports .epub)
    #[arg(short, long, value_name = "FILE")]
    bundle: Option<String>,

    /// Delay between Reddit requests in seconds [default: 2]
    #[arg(short, long, value_name = "SECONDS")]
    delay: Option<u64>,

    /// Maximum number of posts to follow (0 for no limit)
    #[arg(short, long, value_name = "N")]
    limit: Option<usize>,

    /// Remove markdown files after bundling
    #[arg(short, long)]
    clean: bool,

    /// Only print warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    silent: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Label of the link pointing to the next post [default: Next]
    #[arg(long, value_name = "LABEL")]
    next_label: Option<String>,

    /// Text the next link's URL must contain [default: reddit.com]
    #[arg(long, value_name = "DOMAIN")]
    link_domain: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.silent);

    let config = build_config(&cli).context("see 'reddit2md --help' for help")?;

    if config.output.clean && config.output.bundle.is_none() {
        tracing::warn!(
            "clean flag is set but bundle path is not specified, thus nothing will be output"
        );
    }

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, finishing current request...");
            on_interrupt.cancel();
        }
    });

    let client = RedditClient::new(&config.reddit)?;
    let coordinator = Coordinator::new(&config, &client)?;

    let summary = match coordinator.run(&cancel).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Export failed: {}", e);
            return Err(e.into());
        }
    };

    tracing::info!(
        "Done! {} posts exported ({} markdown files{})",
        summary.posts,
        summary.markdown_files.len() - summary.cleaned,
        summary
            .bundle
            .as_ref()
            .map(|b| format!(", bundle {}", b.display()))
            .unwrap_or_default()
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, silent: bool) {
    let filter = if silent {
        EnvFilter::new("warn")
    } else {
        match verbose {
            0 => EnvFilter::new("reddit2md=info,warn"),
            1 => EnvFilter::new("reddit2md=debug,info"),
            2 => EnvFilter::new("reddit2md=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Merges defaults, the config file, the environment and flags, then validates
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    apply_env(&mut config);

    config.chain.url = cli.url.clone();
    if let Some(output) = &cli.output {
        config.output.dir = output.clone();
    }
    if let Some(bundle) = &cli.bundle {
        config.output.bundle = Some(bundle.clone());
    }
    if let Some(delay) = cli.delay {
        config.chain.delay_secs = delay;
    }
    if let Some(limit) = cli.limit {
        config.chain.limit = limit;
    }
    if cli.clean {
        config.output.clean = true;
    }
    if let Some(label) = &cli.next_label {
        config.chain.next_label = label.clone();
    }
    if let Some(domain) = &cli.link_domain {
        config.chain.link_domain = domain.clone();
    }

    validate(&config)?;
    Ok(config)
}
