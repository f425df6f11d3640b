use std::path::PathBuf;

use tempfile::TempDir;

use crate::models::feed_entry::FeedEntry;

pub struct RssItem<'a> {
    pub title: &'a str,
    pub link: &'a str,
    pub description: &'a str,
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Minimal RSS 2.0 document, newest item first. Descriptions go into CDATA so
/// they can carry raw markup the way Steam's feeds do.
pub fn rss_document(items: &[RssItem]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rss version=\"2.0\">\n<channel>\n\
         <title>Dota 2 News</title>\n<link>https://example.com/</link>\n\
         <description>Test feed</description>\n",
    );
    for item in items {
        xml.push_str(&format!(
            "<item>\n<title>{}</title>\n<link>{}</link>\n<description><![CDATA[{}]]></description>\n</item>\n",
            escape_xml(item.title),
            escape_xml(item.link),
            item.description
        ));
    }
    xml.push_str("</channel>\n</rss>\n");
    xml
}

/// Temporary directory plus a not-yet-existing state file inside it. Keep
/// the `TempDir` alive for as long as the path is used.
pub fn temp_state_path() -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("last_post.json");
    (temp_dir, path)
}

pub fn sample_entry(source: &str, link: &str) -> FeedEntry {
    FeedEntry {
        source: source.to_string(),
        title: "Patch 7.36".to_string(),
        link: link.to_string(),
        summary: "<p>Patch <b>7.36</b></p>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rss_document_parses() {
        let xml = rss_document(&[
            RssItem {
                title: "First & newest",
                link: "https://example.com/1",
                description: "<p>one</p>",
            },
            RssItem {
                title: "Second",
                link: "https://example.com/2",
                description: "two",
            },
        ]);
        let feed = feed_rs::parser::parse(xml.as_bytes()).expect("should parse");
        assert_eq!(feed.entries.len(), 2);
        assert_eq!(feed.entries[0].links[0].href, "https://example.com/1");
    }

    #[test]
    fn test_temp_state_path_does_not_exist_yet() {
        let (_dir, path) = temp_state_path();
        assert!(!path.exists());
    }
}
