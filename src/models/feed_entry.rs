use feed_rs::model::Entry;

pub const UNTITLED_ENTRY: &str = "Untitled Entry";

/// One news item as read from a feed, labelled with the feed it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub source: String,
    pub title: String,
    pub link: String,
    /// Raw summary, may still contain markup.
    pub summary: String,
}

impl FeedEntry {
    /// Convert a parsed entry. Entries without a link can't be deduplicated
    /// and are dropped.
    pub fn from_feed_rs(source: &str, entry: &Entry) -> Option<Self> {
        let link = entry
            .links
            .first()
            .map(|l| l.href.trim().to_string())
            .filter(|href| !href.is_empty())?;

        let title = entry
            .title
            .as_ref()
            .map(|t| t.content.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED_ENTRY.to_string());

        let summary = entry
            .summary
            .as_ref()
            .map(|s| s.content.clone())
            .or_else(|| entry.content.as_ref().and_then(|c| c.body.clone()))
            .unwrap_or_default();

        Some(FeedEntry {
            source: source.to_string(),
            title,
            link,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{rss_document, RssItem};

    fn parse_entries(xml: &str) -> Vec<Entry> {
        feed_rs::parser::parse(xml.as_bytes())
            .expect("fixture should parse")
            .entries
    }

    #[test]
    fn test_converts_rss_item() {
        let xml = rss_document(&[RssItem {
            title: "Patch 7.36",
            link: "https://example.com/patch-736",
            description: "<p>Big <b>changes</b></p>",
        }]);
        let entries = parse_entries(&xml);
        let entry = FeedEntry::from_feed_rs("Steam News", &entries[0]).expect("has link");

        assert_eq!(entry.source, "Steam News");
        assert_eq!(entry.title, "Patch 7.36");
        assert_eq!(entry.link, "https://example.com/patch-736");
        assert!(entry.summary.contains("changes"));
    }

    #[test]
    fn test_missing_title_gets_placeholder() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>t</title>
<item><link>https://example.com/a</link><description>d</description></item>
</channel></rss>"#;
        let entries = parse_entries(xml);
        let entry = FeedEntry::from_feed_rs("Steam News", &entries[0]).expect("has link");
        assert_eq!(entry.title, UNTITLED_ENTRY);
        assert_eq!(entry.summary, "d");
    }

    #[test]
    fn test_entry_without_link_is_dropped() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>t</title>
<item><title>No link here</title><description>d</description></item>
</channel></rss>"#;
        let entries = parse_entries(xml);
        assert!(FeedEntry::from_feed_rs("Steam News", &entries[0]).is_none());
    }
}
