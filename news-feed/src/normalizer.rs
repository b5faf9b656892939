use crate::types::NewsItem;
use crate::utils::text::collapse_whitespace;
use std::collections::HashSet;
use tracing::{debug, info};

/// Deduplicates, orders and caps extracted items for the feed.
pub struct Normalizer {
    max_items: usize,
}

impl Normalizer {
    pub fn new(max_items: usize) -> Self {
        Self { max_items }
    }

    /// 1. drop repeated (title, date) identities, first occurrence wins
    /// 2. drop repeated GUIDs, first occurrence wins
    /// 3. stable sort, newest first
    /// 4. keep at most `max_items`
    pub fn normalize(&self, items: Vec<NewsItem>) -> Vec<NewsItem> {
        let total = items.len();
        let items: Vec<NewsItem> = items.into_iter().map(tidy).collect();

        let mut unique = deduplicate_by_identity(items);
        unique = deduplicate_by_guid(unique);

        let removed = total - unique.len();
        if removed > 0 {
            info!("Removed {} duplicate items", removed);
        }

        unique.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));

        if unique.len() > self.max_items {
            debug!(
                "Truncating {} items to the newest {}",
                unique.len(),
                self.max_items
            );
            unique.truncate(self.max_items);
        }

        unique
    }
}

fn tidy(mut item: NewsItem) -> NewsItem {
    item.title = collapse_whitespace(&item.title);
    item.description = collapse_whitespace(&item.description);
    item
}

pub fn deduplicate_by_identity(items: Vec<NewsItem>) -> Vec<NewsItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| {
            let fresh = seen.insert(item.identity_key());
            if !fresh {
                debug!("Removing duplicate item: {} ({})", item.title, item.pub_date);
            }
            fresh
        })
        .collect()
}

pub fn deduplicate_by_guid(items: Vec<NewsItem>) -> Vec<NewsItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| {
            let fresh = seen.insert(item.guid.clone());
            if !fresh {
                debug!("Removing item with duplicate GUID: {}", item.guid);
            }
            fresh
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_MAX_ITEMS;
    use chrono::{Duration, TimeZone, Utc};

    fn item(title: &str, link: &str, day: u32) -> NewsItem {
        NewsItem::new(
            title.to_string(),
            link.to_string(),
            Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap(),
            String::new(),
        )
    }

    fn normalize(items: Vec<NewsItem>) -> Vec<NewsItem> {
        Normalizer::new(DEFAULT_MAX_ITEMS).normalize(items)
    }

    #[test]
    fn test_whitespace_variants_collapse() {
        let items = normalize(vec![
            item("Nytt kösystem", "https://x.test/#nytt-kosystem", 2),
            item("  Nytt\n  kösystem ", "https://x.test/#nytt-kosystem-2", 2),
        ]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].link, "https://x.test/#nytt-kosystem");
    }

    #[test]
    fn test_same_title_different_date_kept() {
        let items = normalize(vec![
            item("Städdag", "https://x.test/a", 2),
            item("Städdag", "https://x.test/b", 9),
        ]);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_duplicate_guid_first_wins() {
        let items = normalize(vec![
            item("Första", "https://x.test/same", 2),
            item("Andra", "https://x.test/same", 9),
        ]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Första");
    }

    #[test]
    fn test_sorted_newest_first_and_stable() {
        let items = normalize(vec![
            item("a", "https://x.test/a", 1),
            item("b", "https://x.test/b", 5),
            item("c", "https://x.test/c", 3),
            item("d", "https://x.test/d", 5),
            item("e", "https://x.test/e", 3),
        ]);
        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "d", "c", "e", "a"]);
        assert!(items.windows(2).all(|w| w[0].pub_date >= w[1].pub_date));
    }

    #[test]
    fn test_caps_at_fifty_dropping_oldest() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let items: Vec<NewsItem> = (0..51)
            .map(|n| {
                NewsItem::new(
                    format!("Nyhet {}", n),
                    format!("https://x.test/{}", n),
                    start + Duration::days(n),
                    String::new(),
                )
            })
            .collect();

        let normalized = normalize(items);
        assert_eq!(normalized.len(), 50);
        assert_eq!(normalized[0].title, "Nyhet 50");
        assert!(normalized.iter().all(|i| i.title != "Nyhet 0"));
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize(Vec::new()).is_empty());
    }
}
