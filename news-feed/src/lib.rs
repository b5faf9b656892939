pub mod types;
pub mod dates;
pub mod utils;
pub mod traits;
pub mod strategies;
pub mod fetcher;
pub mod extractor;
pub mod normalizer;
pub mod serializer;
pub mod writer;
pub mod pipeline;

pub use types::*;
pub use fetcher::Fetcher;
pub use extractor::HtmlExtractor;
pub use normalizer::Normalizer;
pub use serializer::FeedSerializer;
pub use traits::ExtractionStrategy;
pub use writer::write_feed;
pub use pipeline::{NewsFeedPipeline, RunReport};
