use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dotenvy::dotenv;
use hookfeed::{http, observability, AppConfig, FeedMonitor};

/// Relay new Dota 2 news from Steam's feeds to a Discord webhook.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Where the last announced link per feed is kept
    #[clap(long, value_name = "PATH")]
    state_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();
    let args = Args::parse();

    observability::init_logging();

    let mut config = AppConfig::from_env();
    if let Some(path) = args.state_file {
        tracing::info!("Using state file from --state-file: {}", path.display());
        config.state_path = path;
    }

    let client = match http::build_client(config.http_timeout) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        webhook_configured = config.webhook_url.is_some(),
        feeds = config.feeds.len(),
        "Checking Dota 2 news"
    );

    let report = FeedMonitor::from_config(&config, client).run_once().await;
    for feed in &report.feeds {
        tracing::debug!(source = %feed.source, outcome = ?feed.outcome, "Feed result");
    }

    ExitCode::SUCCESS
}
