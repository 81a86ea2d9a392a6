//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "relay-bot")]
#[command(about = "Telegram completion relay bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Search Bilibili for videos and print the top three results.
    Search {
        /// Search keyword (multiple words are joined with spaces).
        #[arg(required = true)]
        keyword: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_token() {
        let cli = Cli::try_parse_from(["relay-bot", "run", "--token", "abc"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Run {
                token: Some("abc".to_string())
            }
        );
    }

    #[test]
    fn test_parse_search_keyword_words() {
        let cli = Cli::try_parse_from(["relay-bot", "search", "rust", "tutorial"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Search {
                keyword: vec!["rust".to_string(), "tutorial".to_string()]
            }
        );
    }

    #[test]
    fn test_search_requires_keyword() {
        assert!(Cli::try_parse_from(["relay-bot", "search"]).is_err());
    }
}
