use crate::dates::parse_swedish_date;
use crate::strategies::{compile_selector, element_text, StructuredStrategy, TextPatternStrategy};
use crate::traits::ExtractionStrategy;
use crate::types::{Candidate, ExtractConfig, FeedError, NewsItem, Result};
use crate::utils::text::slugify;
use crate::utils::url::{resolve, with_fragment};
use scraper::{Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

/// Runs an ordered chain of extraction strategies over the listing page and
/// turns the winning strategy's candidates into dated, linked news items.
pub struct HtmlExtractor {
    base_url: Url,
    strategies: Vec<Box<dyn ExtractionStrategy>>,
    anchor: Selector,
}

impl HtmlExtractor {
    /// Structured news cards first, dated text lines as the fallback.
    pub fn new(config: &ExtractConfig, base_url: Url) -> Result<Self> {
        let strategies: Vec<Box<dyn ExtractionStrategy>> = vec![
            Box::new(StructuredStrategy::new(config)?),
            Box::new(TextPatternStrategy::new(config)?),
        ];
        Self::with_strategies(base_url, strategies)
    }

    pub fn with_strategies(
        base_url: Url,
        strategies: Vec<Box<dyn ExtractionStrategy>>,
    ) -> Result<Self> {
        Ok(Self {
            base_url,
            strategies,
            anchor: compile_selector("a[href]")?,
        })
    }

    pub fn extract(&self, html: &str) -> Result<Vec<NewsItem>> {
        if html.trim().is_empty() {
            return Err(FeedError::Parse("Empty document".to_string()));
        }
        debug!("Parsing HTML document ({} bytes)", html.len());
        let document = Html::parse_document(html);

        let items = self.run_strategies(&document);
        info!("Extracted {} news items", items.len());
        Ok(items)
    }

    /// A strategy only wins when at least one of its candidates survives
    /// date parsing; otherwise the next strategy is tried.
    fn run_strategies(&self, document: &Html) -> Vec<NewsItem> {
        for strategy in &self.strategies {
            let candidates = strategy.extract(document);
            if candidates.is_empty() {
                debug!("Strategy '{}' found nothing", strategy.name());
                continue;
            }

            let found = candidates.len();
            let candidates = self.attach_anchor_links(document, candidates);
            let items: Vec<NewsItem> = candidates
                .into_iter()
                .filter_map(|candidate| self.to_news_item(candidate))
                .collect();

            if items.is_empty() {
                warn!(
                    "Strategy '{}' found {} candidates but none had a usable date",
                    strategy.name(),
                    found
                );
                continue;
            }

            info!(
                "Strategy '{}' produced {} of {} candidates",
                strategy.name(),
                items.len(),
                found
            );
            return items;
        }
        Vec::new()
    }

    /// Give link-less candidates the href of an anchor whose visible text is
    /// exactly the candidate title. This scans every anchor once per
    /// link-less candidate (items × anchors), which is fine for one listing
    /// page.
    fn attach_anchor_links(&self, document: &Html, mut candidates: Vec<Candidate>) -> Vec<Candidate> {
        for candidate in candidates.iter_mut().filter(|c| c.href.is_none()) {
            let matching = document.select(&self.anchor).find(|anchor| {
                element_text(*anchor) == candidate.title
            });
            if let Some(anchor) = matching {
                candidate.href = anchor.value().attr("href").map(str::to_string);
                debug!("Linked '{}' via anchor text", candidate.title);
            }
        }
        candidates
    }

    fn to_news_item(&self, candidate: Candidate) -> Option<NewsItem> {
        let Some(pub_date) = parse_swedish_date(&candidate.date_text) else {
            warn!(
                "Dropping '{}': unparseable date '{}'",
                candidate.title, candidate.date_text
            );
            return None;
        };

        let link = candidate
            .href
            .as_deref()
            .and_then(|href| resolve(&self.base_url, href))
            .unwrap_or_else(|| self.fragment_link(&candidate.title));

        Some(NewsItem::new(candidate.title, link, pub_date, candidate.description))
    }

    fn fragment_link(&self, title: &str) -> String {
        let slug = slugify(title);
        if slug.is_empty() {
            self.base_url.to_string()
        } else {
            with_fragment(&self.base_url, &slug)
        }
    }
}
