use reqwest::Client;

use super::fetcher::FeedFetcher;
use crate::{
    config::{AppConfig, FeedSource},
    discord::client::DiscordClient,
    errors::{AppError, AppResult},
    models::{
        feed_entry::FeedEntry,
        last_posts::{LastPostStore, LastPosts},
    },
    tasks::types::{FeedOutcome, RunReport},
};

/// What to do with the newest entry of a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Unchanged,
    AlreadySent,
    New,
}

pub fn decide(last_posts: &LastPosts, report: &RunReport, entry: &FeedEntry) -> Decision {
    if last_posts.is_current(&entry.source, &entry.link) {
        Decision::Unchanged
    } else if report.was_delivered(&entry.link) || last_posts.has_link(&entry.link) {
        Decision::AlreadySent
    } else {
        Decision::New
    }
}

pub struct FeedMonitor {
    fetcher: FeedFetcher,
    /// `None` when no webhook is configured.
    discord: Option<DiscordClient>,
    store: LastPostStore,
    sources: Vec<FeedSource>,
}

impl FeedMonitor {
    pub fn new(
        fetcher: FeedFetcher,
        discord: Option<DiscordClient>,
        store: LastPostStore,
        sources: Vec<FeedSource>,
    ) -> Self {
        Self {
            fetcher,
            discord,
            store,
            sources,
        }
    }

    pub fn from_config(config: &AppConfig, client: Client) -> Self {
        let discord = config
            .webhook_url
            .clone()
            .map(|url| DiscordClient::new(client.clone(), url, config.embed.clone()));
        Self::new(
            FeedFetcher::new(client),
            discord,
            LastPostStore::new(&config.state_path),
            config.feeds.clone(),
        )
    }

    /// Check every feed once, in order, and persist the state if anything
    /// was delivered.
    pub async fn run_once(&self) -> RunReport {
        let mut last_posts = self.store.load();
        let mut report = RunReport::default();

        for source in &self.sources {
            let outcome = match self.check_feed(source, &mut last_posts, &report).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    if e.is_delivery_failure() {
                        tracing::error!(source = %source.name, code = e.code(), "{e}");
                    } else {
                        tracing::warn!(source = %source.name, code = e.code(), "{e}");
                    }
                    FeedOutcome::Failed(e)
                }
            };
            report.push(&source.name, outcome);
        }

        if report.has_updates() {
            match self.store.save(&last_posts) {
                Ok(()) => report.saved = true,
                Err(e) => {
                    let e = AppError::from(e);
                    tracing::error!(code = e.code(), "{e}");
                    report.save_error = Some(e);
                }
            }
        } else {
            tracing::info!("No new entries found");
        }

        tracing::info!(
            feeds = report.feeds.len(),
            delivered = report.delivered_count(),
            failed = report.failed_count(),
            "Run finished"
        );
        report
    }

    async fn check_feed(
        &self,
        source: &FeedSource,
        last_posts: &mut LastPosts,
        report: &RunReport,
    ) -> AppResult<FeedOutcome> {
        tracing::info!(source = %source.name, url = %source.url, "Checking feed");

        let entries = self.fetcher.fetch(&source.name, &source.url).await?;
        let latest = entries.into_iter().next().ok_or(AppError::EmptyFeed)?;

        match decide(last_posts, report, &latest) {
            Decision::Unchanged => {
                tracing::info!(source = %source.name, "No new entries");
                return Ok(FeedOutcome::Unchanged { link: latest.link });
            }
            Decision::AlreadySent => {
                tracing::info!(
                    source = %source.name,
                    title = %latest.title,
                    "Entry already sent through another feed"
                );
                // Remember it under this feed too so it stays Unchanged from
                // now on.
                last_posts.record(&latest.source, &latest.link);
                return Ok(FeedOutcome::AlreadySent { link: latest.link });
            }
            Decision::New => {}
        }

        tracing::info!(source = %source.name, title = %latest.title, "Found new entry");

        let discord = self.discord.as_ref().ok_or(AppError::ConfigMissing)?;
        discord.send_entry(&latest).await?;
        last_posts.record(&latest.source, &latest.link);

        tracing::info!(source = %source.name, title = %latest.title, "Sent to Discord");
        Ok(FeedOutcome::Delivered {
            title: latest.title,
            link: latest.link,
        })
    }
}
