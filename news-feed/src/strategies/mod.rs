pub mod structured;
pub mod text_pattern;

pub use structured::StructuredStrategy;
pub use text_pattern::TextPatternStrategy;

use crate::types::{FeedError, Result};
use scraper::{ElementRef, Selector};

pub(crate) fn compile_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| FeedError::Parse(format!("Invalid selector '{}': {:?}", selector, e)))
}

pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    crate::utils::text::collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_element_text_separates_text_nodes() {
        let document = Html::parse_fragment("<h3>Nytt<br>kösystem  för <em>p-platser</em></h3>");
        let heading = document
            .select(&compile_selector("h3").unwrap())
            .next()
            .unwrap();
        assert_eq!(element_text(heading), "Nytt kösystem för p-platser");
    }
}
