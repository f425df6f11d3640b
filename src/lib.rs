pub mod config;
pub mod discord;
pub mod errors;
pub mod http;
pub mod models;
pub mod observability;
pub mod tasks;
#[cfg(test)]
pub mod test_helpers;

pub use config::AppConfig;
pub use tasks::feed_monitor::runner::FeedMonitor;
pub use tasks::types::{FeedOutcome, RunReport};
