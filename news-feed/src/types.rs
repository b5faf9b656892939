use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_SOURCE_URL: &str = "https://www.hsb.se/stockholm/brf/svetsaren/nyheter/";
pub const DEFAULT_OUTPUT_PATH: &str = "public/feed.xml";
pub const DEFAULT_MAX_ITEMS: usize = 50;

/// A news entry as it appears in the generated feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub guid: String,
    pub pub_date: DateTime<Utc>,
    pub description: String,
}

impl NewsItem {
    pub fn new(title: String, link: String, pub_date: DateTime<Utc>, description: String) -> Self {
        Self {
            guid: link.clone(),
            title,
            link,
            pub_date,
            description,
        }
    }

    /// Title plus ISO-8601 date, used for the first deduplication pass.
    pub fn identity_key(&self) -> String {
        format!("{}{}", self.title, self.pub_date.to_rfc3339())
    }
}

/// Raw match produced by an extraction strategy, before date parsing and
/// link resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub title: String,
    pub description: String,
    pub date_text: String,
    pub href: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub follow_redirects: bool,
    pub max_redirects: usize,
    pub max_page_size_mb: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "brf-svetsaren-rss/1.0".to_string(),
            timeout_seconds: 20,
            follow_redirects: true,
            max_redirects: 5,
            max_page_size_mb: 10,
        }
    }
}

/// Markers and selectors describing the source page's markup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub news_path_marker: String,
    pub topic_keyword: String,
    pub info_selector: String,
    pub heading_selector: String,
    pub date_selector: String,
    pub description_selector: String,
    pub fallback_container_selector: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            news_path_marker: "/nyheter/".to_string(),
            topic_keyword: "nyheter".to_string(),
            info_selector: r#"[class*="info"]"#.to_string(),
            heading_selector: "h1, h2, h3, h4, h5, h6".to_string(),
            date_selector: r#"[class*="date"]"#.to_string(),
            description_selector:
                r#"[class*="description"], [class*="preamble"], [class*="excerpt"]"#.to_string(),
            fallback_container_selector: "article, section, main, div, li, p".to_string(),
        }
    }
}

/// Channel-level fields of the generated feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedMetadata {
    pub title: String,
    pub description: String,
    pub site_url: String,
    pub feed_url: Option<String>,
    pub language: String,
    pub generator: String,
    pub ttl_minutes: u32,
}

impl Default for FeedMetadata {
    fn default() -> Self {
        Self {
            title: "HSB Brf Svetsaren - Nyheter".to_string(),
            description: "Nyheter från HSB Brf Svetsaren i Stockholm".to_string(),
            site_url: DEFAULT_SOURCE_URL.to_string(),
            feed_url: None,
            language: "sv-SE".to_string(),
            generator: concat!("news-feed/", env!("CARGO_PKG_VERSION")).to_string(),
            ttl_minutes: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub source_url: String,
    pub output_path: PathBuf,
    pub max_items: usize,
    pub fail_on_empty: bool,
    pub fetch: FetchConfig,
    pub extract: ExtractConfig,
    pub feed: FeedMetadata,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            max_items: DEFAULT_MAX_ITEMS,
            fail_on_empty: false,
            fetch: FetchConfig::default(),
            extract: ExtractConfig::default(),
            feed: FeedMetadata::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub body: String,
    pub response_time_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    pub path: PathBuf,
    pub items_written: usize,
    pub bytes_written: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Fetch failed for {url}: {reason}")]
    Fetch {
        url: String,
        status: Option<u16>,
        reason: String,
    },

    #[error("HTML parse error: {0}")]
    Parse(String),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Feed render error: {0}")]
    Render(String),

    #[error("No news items found at {url}")]
    EmptyFeed { url: String },
}

impl FeedError {
    pub fn fetch(url: &str, status: Option<u16>, reason: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.to_string(),
            status,
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// HTTP status carried by a fetch failure, if the server answered at all.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Fetch { status, .. } => *status,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;
