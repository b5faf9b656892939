use crate::types::Candidate;
use scraper::Html;

/// One way of recognising news entries in the listing page.
///
/// Strategies are tried in order by the extractor; the first one that
/// returns a non-empty list wins and later strategies are not consulted.
pub trait ExtractionStrategy {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Scan the parsed document. An empty vector means "no match" and lets
    /// the next strategy run.
    fn extract(&self, document: &Html) -> Vec<Candidate>;
}
