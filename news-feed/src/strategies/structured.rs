use super::{compile_selector, element_text};
use crate::traits::ExtractionStrategy;
use crate::types::{Candidate, ExtractConfig, Result};
use scraper::{Html, Selector};
use tracing::debug;

/// Reads news cards: a link into the news section wrapping an info block with
/// heading, date label and optional description label.
pub struct StructuredStrategy {
    news_path_marker: String,
    anchor: Selector,
    info: Selector,
    heading: Selector,
    date: Selector,
    description: Selector,
}

impl StructuredStrategy {
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        Ok(Self {
            news_path_marker: config.news_path_marker.clone(),
            anchor: compile_selector("a[href]")?,
            info: compile_selector(&config.info_selector)?,
            heading: compile_selector(&config.heading_selector)?,
            date: compile_selector(&config.date_selector)?,
            description: compile_selector(&config.description_selector)?,
        })
    }
}

impl ExtractionStrategy for StructuredStrategy {
    fn name(&self) -> &'static str {
        "structured"
    }

    fn extract(&self, document: &Html) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for anchor in document.select(&self.anchor) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if !href.contains(&self.news_path_marker) {
                continue;
            }

            let Some(info) = anchor.select(&self.info).next() else {
                continue;
            };

            let title = info
                .select(&self.heading)
                .next()
                .map(element_text)
                .unwrap_or_default();
            let date_text = info
                .select(&self.date)
                .next()
                .map(element_text)
                .unwrap_or_default();

            if title.is_empty() || date_text.is_empty() {
                debug!("Skipping news link {} without title or date", href);
                continue;
            }

            let description = info
                .select(&self.description)
                .next()
                .map(element_text)
                .unwrap_or_default();

            candidates.push(Candidate {
                title,
                description,
                date_text,
                href: Some(href.to_string()),
            });
        }

        candidates
    }
}
