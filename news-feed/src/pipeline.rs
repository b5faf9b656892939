use crate::extractor::HtmlExtractor;
use crate::fetcher::Fetcher;
use crate::normalizer::Normalizer;
use crate::serializer::FeedSerializer;
use crate::types::{FeedError, NewsItem, PipelineConfig, Result, WriteReport};
use crate::utils::url::is_http_url;
use crate::writer::write_feed;
use chrono::Utc;
use tracing::{info, warn};
use url::Url;

/// Fetch, extract, normalize, render and write: one run per invocation.
pub struct NewsFeedPipeline {
    config: PipelineConfig,
    fetcher: Fetcher,
    extractor: HtmlExtractor,
    normalizer: Normalizer,
    serializer: FeedSerializer,
}

#[derive(Debug)]
pub struct RunReport {
    pub items: Vec<NewsItem>,
    pub write: WriteReport,
}

impl NewsFeedPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        if !is_http_url(&config.source_url) {
            return Err(FeedError::Parse(format!(
                "Source URL must be http(s): {}",
                config.source_url
            )));
        }
        let source_url = Url::parse(&config.source_url)?;

        Ok(Self {
            fetcher: Fetcher::new(config.fetch.clone())?,
            extractor: HtmlExtractor::new(&config.extract, source_url)?,
            normalizer: Normalizer::new(config.max_items),
            serializer: FeedSerializer::new(config.feed.clone()),
            config,
        })
    }

    /// Items for the current page, without touching the output file.
    pub async fn collect_items(&self) -> Result<Vec<NewsItem>> {
        let page = self.fetcher.fetch_page(&self.config.source_url).await?;
        self.items_from_html(&page.body)
    }

    pub fn items_from_html(&self, html: &str) -> Result<Vec<NewsItem>> {
        let extracted = self.extractor.extract(html)?;
        let items = self.normalizer.normalize(extracted);

        if items.is_empty() {
            if self.config.fail_on_empty {
                return Err(FeedError::EmptyFeed {
                    url: self.config.source_url.clone(),
                });
            }
            warn!("No news items found at {}", self.config.source_url);
        }
        Ok(items)
    }

    pub fn render(&self, items: &[NewsItem]) -> Result<String> {
        self.serializer.render(items, Utc::now())
    }

    /// The output file is only written after every earlier stage succeeded.
    pub async fn run(&self) -> Result<RunReport> {
        info!("Building feed from {}", self.config.source_url);

        let items = self.collect_items().await?;
        let xml = self.render(&items)?;
        let write = write_feed(&self.config.output_path, &xml, items.len()).await?;

        info!(
            "Feed complete: {} items written to {}",
            write.items_written,
            write.path.display()
        );
        Ok(RunReport { items, write })
    }
}
