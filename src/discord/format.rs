use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{Embed, EmbedFooter, EmbedThumbnail, WebhookMessage};
use crate::config::EmbedStyle;
use crate::models::feed_entry::FeedEntry;

pub const MAX_TITLE_CHARS: usize = 256;
pub const MAX_DESCRIPTION_CHARS: usize = 500;
pub const ELLIPSIS: &str = "...";

// Naive on purpose: feed summaries are simple enough that any `<...>` run
// can just be dropped.
static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^<]+?>").expect("tag pattern is valid"));

/// Remove every `<...>` sequence from `text`.
pub fn strip_tags(text: &str) -> String {
    if !text.contains('<') || !text.contains('>') {
        return text.to_string();
    }
    TAG_PATTERN.replace_all(text, "").into_owned()
}

/// First `max` characters of `text` (counted in chars, not bytes).
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

pub fn format_title(title: &str) -> String {
    truncate_chars(title, MAX_TITLE_CHARS).to_string()
}

/// Stripped summary, cut to [`MAX_DESCRIPTION_CHARS`] with [`ELLIPSIS`]
/// appended when anything was cut.
pub fn format_description(summary: &str) -> String {
    let clean = strip_tags(summary);
    let truncated = truncate_chars(&clean, MAX_DESCRIPTION_CHARS);
    if truncated.len() < clean.len() {
        format!("{truncated}{ELLIPSIS}")
    } else {
        clean
    }
}

pub fn build_message(entry: &FeedEntry, style: &EmbedStyle, now: DateTime<Utc>) -> WebhookMessage {
    let embed = Embed {
        title: format_title(&entry.title),
        url: entry.link.clone(),
        description: format_description(&entry.summary),
        color: style.color,
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        footer: EmbedFooter {
            text: format!("{} • {}", style.footer_prefix, entry.source),
        },
        thumbnail: EmbedThumbnail {
            url: style.thumbnail_url.clone(),
        },
    };

    WebhookMessage {
        embeds: vec![embed],
        username: style.username.clone(),
    }
}
