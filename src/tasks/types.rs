use crate::errors::AppError;

/// Where a single feed ended up after one run.
#[derive(Debug)]
pub enum FeedOutcome {
    /// The newest entry is the one already recorded for this feed.
    Unchanged { link: String },
    /// The newest entry was already delivered through another feed, in this
    /// run or an earlier one.
    AlreadySent { link: String },
    /// Delivered, and the in-memory state now points at `link`.
    Delivered { title: String, link: String },
    /// Fetch, parse or delivery failed; state for this feed was not touched.
    Failed(AppError),
}

#[derive(Debug)]
pub struct FeedReport {
    pub source: String,
    pub outcome: FeedOutcome,
}

/// Everything that happened during one run, in feed order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub feeds: Vec<FeedReport>,
    /// Set when the state file was written during this run.
    pub saved: bool,
    pub save_error: Option<AppError>,
}

impl RunReport {
    pub fn push(&mut self, source: &str, outcome: FeedOutcome) {
        self.feeds.push(FeedReport {
            source: source.to_string(),
            outcome,
        });
    }

    pub fn delivered_links(&self) -> impl Iterator<Item = &str> {
        self.feeds.iter().filter_map(|feed| match &feed.outcome {
            FeedOutcome::Delivered { link, .. } => Some(link.as_str()),
            _ => None,
        })
    }

    pub fn was_delivered(&self, link: &str) -> bool {
        self.delivered_links().any(|delivered| delivered == link)
    }

    pub fn delivered_count(&self) -> usize {
        self.delivered_links().count()
    }

    pub fn failed_count(&self) -> usize {
        self.feeds
            .iter()
            .filter(|feed| matches!(feed.outcome, FeedOutcome::Failed(_)))
            .count()
    }

    /// The state only needs saving when a feed's record moved.
    pub fn has_updates(&self) -> bool {
        self.feeds.iter().any(|feed| {
            matches!(
                feed.outcome,
                FeedOutcome::Delivered { .. } | FeedOutcome::AlreadySent { .. }
            )
        })
    }

    pub fn outcome_for(&self, source: &str) -> Option<&FeedOutcome> {
        self.feeds
            .iter()
            .find(|feed| feed.source == source)
            .map(|feed| &feed.outcome)
    }
}
