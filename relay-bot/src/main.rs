//! relay-bot: run the Telegram relay, or try the video search helper from the command line.

use anyhow::Result;
use clap::Parser;
use relay_bot::{run_bot, BotConfig, Cli, Commands};
use video_search::VideoSearchClient;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = BotConfig::load(token)?;
            run_bot(config).await
        }
        Commands::Search { keyword } => handle_search(&keyword.join(" ")).await,
    }
}

/// Prints the top search hits, one title/url pair per result.
async fn handle_search(keyword: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .with_target(false)
        .init();

    let hits = VideoSearchClient::new()?.search(keyword).await?;
    if hits.is_empty() {
        println!("No results for {:?}.", keyword);
        return Ok(());
    }
    for hit in hits {
        println!("{}\n  {}", hit.title, hit.url);
    }
    Ok(())
}
