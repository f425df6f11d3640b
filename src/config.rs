use std::path::PathBuf;
use std::time::Duration;

use url::Url;

pub const WEBHOOK_ENV: &str = "DISCORD_WEBHOOK";
pub const STATE_FILE_ENV: &str = "HOOKFEED_STATE_FILE";
pub const HTTP_TIMEOUT_ENV: &str = "HOOKFEED_HTTP_TIMEOUT_SECS";

pub const DEFAULT_STATE_FILE: &str = "last_post.json";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// A feed to watch, labelled with the name shown in notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

impl FeedSource {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

/// The two Steam feeds carrying Dota 2 news.
pub fn default_feeds() -> Vec<FeedSource> {
    vec![
        FeedSource::new(
            "Steam News",
            "https://store.steampowered.com/feeds/news/app/570/",
        ),
        FeedSource::new("Steam Community", "https://steamcommunity.com/games/570/rss/"),
    ]
}

/// Fixed presentation of every embed sent to the webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedStyle {
    pub username: String,
    pub footer_prefix: String,
    pub color: u32,
    pub thumbnail_url: String,
}

impl Default for EmbedStyle {
    fn default() -> Self {
        Self {
            username: "Dota 2 Updates".to_string(),
            footer_prefix: "Dota 2 News".to_string(),
            color: 10181046,
            thumbnail_url:
                "https://cdn.cloudflare.steamstatic.com/apps/dota2/images/dota2_social.jpg"
                    .to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `None` when the webhook is unset or unusable; delivery is then skipped.
    pub webhook_url: Option<Url>,
    pub state_path: PathBuf,
    pub http_timeout: Duration,
    pub feeds: Vec<FeedSource>,
    pub embed: EmbedStyle,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let webhook_url = match lookup(WEBHOOK_ENV).filter(|v| !v.trim().is_empty()) {
            Some(raw) => match Url::parse(raw.trim()) {
                Ok(url) => {
                    tracing::info!("Using webhook from {}", WEBHOOK_ENV);
                    Some(url)
                }
                Err(e) => {
                    tracing::warn!("Ignoring {}: not a valid URL ({})", WEBHOOK_ENV, e);
                    None
                }
            },
            None => {
                tracing::warn!("{} is not set, notifications will not be sent", WEBHOOK_ENV);
                None
            }
        };

        let state_path = match lookup(STATE_FILE_ENV).filter(|v| !v.trim().is_empty()) {
            Some(path) => {
                tracing::info!("Using state file from {}: {}", STATE_FILE_ENV, path);
                PathBuf::from(path)
            }
            None => {
                tracing::info!("Using default state file: {}", DEFAULT_STATE_FILE);
                PathBuf::from(DEFAULT_STATE_FILE)
            }
        };

        let http_timeout = match lookup(HTTP_TIMEOUT_ENV) {
            Some(secs) => match secs.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => {
                    tracing::info!("Using HTTP timeout from {}: {}s", HTTP_TIMEOUT_ENV, secs);
                    Duration::from_secs(secs)
                }
                _ => {
                    tracing::warn!(
                        "Failed to parse {}={:?}, using default {}s",
                        HTTP_TIMEOUT_ENV,
                        secs,
                        DEFAULT_HTTP_TIMEOUT.as_secs()
                    );
                    DEFAULT_HTTP_TIMEOUT
                }
            },
            None => DEFAULT_HTTP_TIMEOUT,
        };

        AppConfig {
            webhook_url,
            state_path,
            http_timeout,
            feeds: default_feeds(),
            embed: EmbedStyle::default(),
        }
    }
}
