use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use feedscan::config::Config;
use feedscan::{display, feed_list, WriterSink};

#[derive(Parser)]
#[command(name = "feedscan", version, about = "Search content feeds concurrently for a pattern")]
struct Cli {
    /// Regular expression to look for in every feed.
    term: String,

    /// Feed list to search (JSON). Overrides `[feeds] path`.
    #[arg(long)]
    feeds: Option<PathBuf>,

    /// Config file to load instead of ~/.config/feedscan/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Per-feed timeout in seconds; 0 waits forever.
    #[arg(long)]
    timeout: Option<u64>,

    /// Prefix every result with the feed it came from.
    #[arg(long)]
    show_feed: bool,

    /// Log per-feed progress (debug level unless RUST_LOG is set).
    #[arg(short, long)]
    verbose: bool,

    /// Append logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "could not load config; using defaults");
            Config::defaults()
        }),
    };
    if let Some(path) = cli.feeds {
        config.feeds.path = path;
    }
    if let Some(secs) = cli.timeout {
        config.search.feed_timeout_secs = secs;
    }
    if cli.show_feed {
        config.output.show_feed = true;
    }

    let feeds = feed_list::load(&config.feeds.path)?;
    tracing::info!(feeds = feeds.len(), term = %cli.term, "starting search");

    let stream = feedscan::start_search(&config, feeds, &cli.term)?;

    let cancel = stream.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted; cancelling search");
            cancel.cancel();
        }
    });

    let mut sink = WriterSink::new(std::io::stdout()).show_feed(config.output.show_feed);
    let summary = display(stream, &mut sink).await?;

    for report in summary.failures() {
        tracing::debug!(feed = %report.feed, outcome = ?report.outcome, "feed contributed no results");
    }
    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_env_filter(filter)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
        }
    }
    Ok(())
}
