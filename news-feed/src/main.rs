use anyhow::Context;
use clap::Parser;
use news_feed::{NewsFeedPipeline, PipelineConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Builds an RSS feed from the HSB Brf Svetsaren news page.
#[derive(Parser, Debug)]
#[command(name = "news-feed", version, about)]
struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(long, env = "NEWS_FEED_CONFIG")]
    config: Option<PathBuf>,

    /// News listing page to scrape
    #[arg(long, env = "NEWS_FEED_SOURCE_URL")]
    source_url: Option<String>,

    /// Where the RSS document is written
    #[arg(short, long, env = "NEWS_FEED_OUTPUT")]
    output: Option<PathBuf>,

    /// Public URL where the generated feed is hosted. Required for the
    /// channel's atom self link; the link is left out when unset.
    #[arg(long, env = "NEWS_FEED_URL")]
    feed_url: Option<String>,

    /// Channel link
    #[arg(long, env = "NEWS_FEED_SITE_URL")]
    site_url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    #[arg(long, env = "NEWS_FEED_USER_AGENT")]
    user_agent: Option<String>,

    #[arg(long)]
    max_items: Option<usize>,

    /// Exit with an error when the page yields no items
    #[arg(long)]
    fail_on_empty: bool,

    /// Print the items as JSON instead of writing the feed
    #[arg(long)]
    dry_run: bool,

    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => PipelineConfig::default(),
        };

        if let Some(source_url) = self.source_url {
            if self.site_url.is_none() && config.feed.site_url == config.source_url {
                config.feed.site_url = source_url.clone();
            }
            config.source_url = source_url;
        }
        if let Some(output) = self.output {
            config.output_path = output;
        }
        if let Some(feed_url) = self.feed_url {
            config.feed.feed_url = Some(feed_url);
        }
        if let Some(site_url) = self.site_url {
            config.feed.site_url = site_url;
        }
        if let Some(timeout) = self.timeout {
            config.fetch.timeout_seconds = timeout;
        }
        if let Some(user_agent) = self.user_agent {
            config.fetch.user_agent = user_agent;
        }
        if let Some(max_items) = self.max_items {
            config.max_items = max_items;
        }
        config.fail_on_empty |= self.fail_on_empty;

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    ExitCode::from(exit_status(&run(cli).await))
}

/// 0 on success (an empty feed included), 1 on any failure.
fn exit_status(result: &anyhow::Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            error!("Feed run failed: {:#}", e);
            1
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let dry_run = cli.dry_run;
    let config = cli.into_config()?;
    let pipeline = NewsFeedPipeline::new(config).context("invalid configuration")?;

    if dry_run {
        let items = pipeline.collect_items().await?;
        println!("{}", serde_json::to_string_pretty(&items)?);
        info!("Dry run: {} items, nothing written", items.len());
        return Ok(());
    }

    let report = pipeline.run().await?;
    info!(
        "Done: {} items in {}",
        report.write.items_written,
        report.write.path.display()
    );
    Ok(())
}
