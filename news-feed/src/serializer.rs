use crate::types::{FeedError, FeedMetadata, NewsItem, Result};
use chrono::{DateTime, Utc};
use rss::extension::atom::{AtomExtension, Link};
use rss::{Channel, ChannelBuilder, GuidBuilder, Item, ItemBuilder};
use tracing::debug;

/// Renders news items as an RSS 2.0 document.
pub struct FeedSerializer {
    metadata: FeedMetadata,
}

impl FeedSerializer {
    pub fn new(metadata: FeedMetadata) -> Self {
        Self { metadata }
    }

    pub fn build_channel(&self, items: &[NewsItem], build_date: DateTime<Utc>) -> Channel {
        let items: Vec<Item> = items.iter().map(to_rss_item).collect();

        let mut channel = ChannelBuilder::default()
            .title(self.metadata.title.clone())
            .link(self.metadata.site_url.clone())
            .description(self.metadata.description.clone())
            .language(self.metadata.language.clone())
            .generator(self.metadata.generator.clone())
            .ttl(self.metadata.ttl_minutes.to_string())
            .last_build_date(build_date.to_rfc2822())
            .items(items)
            .build();

        if let Some(feed_url) = &self.metadata.feed_url {
            let mut link = Link::default();
            link.set_href(feed_url.clone());
            link.set_rel("self");
            link.set_mime_type(Some("application/rss+xml".to_string()));

            let mut atom = AtomExtension::default();
            atom.set_links(vec![link]);
            channel.set_atom_ext(atom);
        }

        channel
    }

    /// Pretty-printed (two-space indented) UTF-8 XML.
    pub fn render(&self, items: &[NewsItem], build_date: DateTime<Utc>) -> Result<String> {
        let channel = self.build_channel(items, build_date);
        let buffer = channel
            .pretty_write_to(Vec::new(), b' ', 2)
            .map_err(|e| FeedError::Render(e.to_string()))?;
        let xml = String::from_utf8(buffer).map_err(|e| FeedError::Render(e.to_string()))?;

        debug!("Rendered feed with {} items ({} bytes)", items.len(), xml.len());
        Ok(xml)
    }
}

fn to_rss_item(item: &NewsItem) -> Item {
    let guid = GuidBuilder::default()
        .value(item.guid.clone())
        .permalink(true)
        .build();

    let description = if item.description.is_empty() {
        None
    } else {
        Some(item.description.clone())
    };

    ItemBuilder::default()
        .title(item.title.clone())
        .link(item.link.clone())
        .guid(guid)
        .pub_date(item.pub_date.to_rfc2822())
        .description(description)
        .build()
}
