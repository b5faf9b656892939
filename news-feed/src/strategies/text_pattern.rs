use super::compile_selector;
use crate::dates::split_dated_line;
use crate::traits::ExtractionStrategy;
use crate::types::{Candidate, ExtractConfig, Result};
use crate::utils::text::{collapse_whitespace, strip_bullets};
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashSet;
use tracing::debug;

const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "footer",
    "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p",
    "section", "table", "td", "th", "tr", "ul",
];

const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Fallback for pages without recognisable news cards: finds lines shaped like
/// `<title> <day> <month> <year>` inside containers mentioning the topic
/// keyword. Candidates carry no link; the extractor resolves one afterwards.
pub struct TextPatternStrategy {
    topic_keyword: String,
    containers: Selector,
}

impl TextPatternStrategy {
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        Ok(Self {
            topic_keyword: config.topic_keyword.to_lowercase(),
            containers: compile_selector(&config.fallback_container_selector)?,
        })
    }

    fn mentions_topic(&self, container: ElementRef<'_>) -> bool {
        container
            .text()
            .collect::<String>()
            .to_lowercase()
            .contains(&self.topic_keyword)
    }
}

impl ExtractionStrategy for TextPatternStrategy {
    fn name(&self) -> &'static str {
        "text-pattern"
    }

    fn extract(&self, document: &Html) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        // Nested containers repeat the same lines.
        let mut seen = HashSet::new();

        for container in document.select(&self.containers) {
            if !self.mentions_topic(container) {
                continue;
            }

            for line in block_lines(container) {
                let Some((title, date_text)) = split_dated_line(&line) else {
                    continue;
                };
                let title = strip_bullets(&title).to_string();
                if title.is_empty() {
                    continue;
                }
                if !seen.insert((title.clone(), date_text.clone())) {
                    continue;
                }

                debug!("Matched dated line: {} / {}", title, date_text);
                candidates.push(Candidate {
                    title,
                    description: String::new(),
                    date_text,
                    href: None,
                });
            }
        }

        candidates
    }
}

/// Visible text of `element` split into lines at block-level element
/// boundaries and literal newlines, whitespace-collapsed, empty lines dropped.
pub(crate) fn block_lines(element: ElementRef<'_>) -> Vec<String> {
    let mut buffer = String::new();
    collect_text(element, &mut buffer);
    buffer
        .lines()
        .map(collapse_whitespace)
        .filter(|line| !line.is_empty())
        .collect()
}

fn collect_text(element: ElementRef<'_>, buffer: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => buffer.push_str(text),
            Node::Element(el) => {
                let name = el.name();
                if SKIPPED_ELEMENTS.contains(&name) {
                    continue;
                }
                let block = BLOCK_ELEMENTS.contains(&name);
                if block {
                    buffer.push('\n');
                }
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, buffer);
                }
                if block {
                    buffer.push('\n');
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> Vec<Candidate> {
        let strategy = TextPatternStrategy::new(&ExtractConfig::default()).unwrap();
        strategy.extract(&Html::parse_document(html))
    }

    #[test]
    fn test_matches_dated_lines() {
        let candidates = extract(
            r#"<section>
                <h2>Nyheter</h2>
                <ul>
                    <li>• Vårstädning 9 april 2024</li>
                    <li>Årsstämma <span>12 maj 2024</span></li>
                    <li>Ingen datumrad här</li>
                </ul>
            </section>"#,
        );

        let titles: Vec<_> = candidates.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Vårstädning", "Årsstämma"]);
        assert_eq!(candidates[0].date_text, "9 april 2024");
        assert!(candidates.iter().all(|c| c.href.is_none()));
    }

    #[test]
    fn test_requires_topic_keyword() {
        let candidates = extract(
            r#"<section><h2>Kalender</h2><p>Vårstädning 9 april 2024</p></section>"#,
        );
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_nested_containers_do_not_duplicate() {
        let candidates = extract(
            r#"<main><div><section><h2>NYHETER</h2>
                <p>Vårstädning 9 april 2024</p>
            </section></div></main>"#,
        );
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_block_lines_ignores_scripts() {
        let document = Html::parse_fragment(
            r#"<div><p>Rad ett</p><script>var x = "1 maj 2024";</script>Rad<br>två</div>"#,
        );
        let div = document
            .select(&Selector::parse("div").unwrap())
            .next()
            .unwrap();
        assert_eq!(block_lines(div), vec!["Rad ett", "Rad", "två"]);
    }
}
