//! carookee-dump main entry point
//!
//! This is the command-line interface for the forum thread archiver.

use anyhow::Context;
use carookee_dump::config::load_config;
use carookee_dump::output::OutputHandler;
use carookee_dump::{Config, CrawlOptions, CrawlStats, Crawler, Credentials, JsonArrayWriter};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// carookee-dump: dump the textual content of a carookee forum
///
/// Logs into the forum, walks every subforum and topic, and writes one JSON
/// array of `{"Forum", "Topic", "Thread"}` objects.
#[derive(Parser, Debug)]
#[command(name = "carookee-dump")]
#[command(version)]
#[command(about = "Dump the posts of a carookee forum as JSON", long_about = None)]
struct Cli {
    /// Forum identifier (the path segment after /forum/)
    #[arg(value_name = "FORUM")]
    forum: String,

    /// Login name
    #[arg(value_name = "USERNAME")]
    username: String,

    /// Login password
    #[arg(value_name = "PASSWORD")]
    password: String,

    /// TOML file overriding site markers and HTTP settings
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write JSON to this file instead of standard output
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Only crawl the first N subforums
    #[arg(long, value_name = "N")]
    max_subforums: Option<usize>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr, stdout carries the JSON
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    let crawler = Crawler::new(config).context("Failed to set up crawler")?;

    let credentials = Credentials::new(cli.username, cli.password);
    crawler
        .login(&cli.forum, &credentials)
        .await
        .context("Login failed")?;

    let options = CrawlOptions {
        max_subforums: cli.max_subforums,
    };

    let result = match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = JsonArrayWriter::new(BufWriter::new(file));
            crawl(&crawler, &cli.forum, &options, &mut writer).await
        }
        None => {
            let mut writer = JsonArrayWriter::new(BufWriter::new(io::stdout()));
            crawl(&crawler, &cli.forum, &options, &mut writer).await
        }
    };

    match result {
        Ok(stats) => {
            tracing::info!("Wrote {} topics", stats.topics);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {:#}", e);
            Err(e)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("carookee_dump=info,warn"),
            1 => EnvFilter::new("carookee_dump=debug,info"),
            2 => EnvFilter::new("carookee_dump=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Runs the crawl into an output handler
async fn crawl(
    crawler: &Crawler,
    forum: &str,
    options: &CrawlOptions,
    output: &mut dyn OutputHandler,
) -> anyhow::Result<CrawlStats> {
    crawler
        .run(forum, options, output)
        .await
        .with_context(|| format!("Crawling forum {} failed", forum))
}
