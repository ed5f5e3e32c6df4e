//! Command-line interface definitions for newscheck.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! API keys can be provided via command-line flags or environment variables.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Command-line arguments for the newscheck application.
///
/// # Examples
///
/// ```sh
/// # One refresh pass over every configured feed
/// newscheck refresh --guardian-api-key YOUR_KEY
///
/// # Keep refreshing every five minutes
/// newscheck watch --interval 300
///
/// # Print the thirty newest annotated articles
/// newscheck list --limit 30
///
/// # Verify a claim against live news evidence
/// newscheck check --meta "Government bans all cash transactions"
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the article store JSON file
    #[arg(short, long, default_value = "./data/articles.json")]
    pub store_path: PathBuf,

    /// Optional path to a settings YAML file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Feed selection shared by `refresh` and `watch`.
#[derive(Args, Debug)]
pub struct FeedOpts {
    /// Guardian Content API key; the Guardian feed is skipped without one
    #[arg(long, env = "GUARDIAN_API_KEY")]
    pub guardian_api_key: Option<String>,

    /// Restrict Google News to a search topic instead of top stories
    #[arg(long)]
    pub topic: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch the latest articles from every source and annotate them
    Refresh {
        #[command(flatten)]
        feeds: FeedOpts,
    },

    /// Refresh periodically until interrupted
    Watch {
        #[command(flatten)]
        feeds: FeedOpts,

        /// Seconds between refresh passes
        #[arg(long, default_value_t = 300)]
        interval: u64,
    },

    /// Print recent annotated articles as JSON
    List {
        /// Only articles in this category
        #[arg(long)]
        category: Option<String>,

        /// Maximum number of articles to print
        #[arg(long, default_value_t = 30)]
        limit: usize,
    },

    /// Verify a claim headline, optionally against live news evidence
    Check {
        /// The claim or headline to verify
        claim: String,

        /// Use the search-backed analyzer (needs SERPAPI_KEY and GROQ_API_KEY)
        #[arg(long)]
        meta: bool,

        /// SerpAPI key for evidence search
        #[arg(long, env = "SERPAPI_KEY")]
        serpapi_key: Option<String>,

        /// API key for the chat-completions endpoint
        #[arg(long, env = "GROQ_API_KEY")]
        groq_api_key: Option<String>,
    },
}
