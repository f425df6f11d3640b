use crate::discord::client::DeliveryError;
use crate::models::last_posts::StateError;
use crate::tasks::feed_monitor::fetcher::FetchError;

/// Everything that can go wrong while checking one feed or finishing a run.
///
/// None of these abort the process: the monitor records them as the outcome
/// of the feed they belong to and moves on.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("DISCORD_WEBHOOK is not configured - delivery skipped")]
    ConfigMissing,

    #[error("unable to fetch feed: {0}")]
    Fetch(#[from] FetchError),

    #[error("feed has no entries")]
    EmptyFeed,

    #[error("unable to deliver notification: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("unable to persist last posts: {0}")]
    Persist(#[from] StateError),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Short machine-friendly code, used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ConfigMissing => "CONFIG_MISSING",
            AppError::Fetch(_) => "FETCH_FAILURE",
            AppError::EmptyFeed => "EMPTY_FEED",
            AppError::Delivery(_) => "DELIVERY_FAILURE",
            AppError::Persist(_) => "PERSIST_FAILURE",
        }
    }

    /// Whether the error happened after a new entry was found, i.e. the
    /// entry will be offered again on the next run.
    pub fn is_delivery_failure(&self) -> bool {
        matches!(self, AppError::ConfigMissing | AppError::Delivery(_))
    }
}
