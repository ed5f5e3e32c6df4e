//! # Newscheck
//!
//! A news-verification pipeline that ingests articles from public feeds,
//! classifies each headline, annotates every record with source-credibility
//! signals, and reconciles it all into a final trust verdict. A
//! search-backed analyzer verifies ad-hoc claims against live news evidence.
//!
//! ## Features
//!
//! - Ingests articles from the Guardian Content API, Google News RSS, and
//!   Times of India RSS
//! - Scores publishing sources against curated credibility tables and
//!   detects fact-check pieces
//! - Reconciles classifier output with credibility signals into the verdict
//!   readers see
//! - Persists annotated records in a URL-keyed JSON store
//! - Verifies one-off claims by searching live news and asking an
//!   OpenAI-compatible model for an evidence-grounded verdict
//!
//! ## Usage
//!
//! ```sh
//! newscheck refresh --guardian-api-key YOUR_KEY
//! newscheck watch --interval 300
//! newscheck list --category Sport
//! newscheck check --meta "Government bans all cash transactions"
//! ```
//!
//! ## Architecture
//!
//! The refresh path follows a pipeline architecture:
//! 1. **Indexing**: Discover candidate items from each feed
//! 2. **Fetching**: Resolve items into complete records, image included
//! 3. **Annotation**: Headline classifier plus credibility tables plus the
//!    verdict reconciler
//! 4. **Persistence**: One JSON document, rewritten per pass
//!
//! The check path skips the store entirely: search, annotate the evidence,
//! generate, parse, report.

use clap::Parser;
use itertools::Itertools;
use std::error::Error;
use std::path::Path;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod classifier;
mod cli;
mod config;
mod credibility;
mod feeds;
mod models;
mod store;
mod utils;
mod verify;

use classifier::{LexiconClassifier, TitleClassifier};
use cli::{Cli, Command, FeedOpts};
use config::Settings;
use credibility::SourceTables;
use models::RawArticle;
use store::{ArticleStore, UpsertOutcome};
use utils::{ensure_writable_dir, truncate_for_log};
use verify::{ChatCompletionsClient, ClaimVerifier, RetryAsk, SerpApiClient};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("newscheck starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(store_path = %args.store_path.display(), "Parsed CLI arguments");

    let settings = Settings::load(args.config.as_deref()).await?;

    // One client for every outbound call: feeds, search, generation
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.http_timeout_secs))
        .user_agent(concat!("newscheck/", env!("CARGO_PKG_VERSION")))
        .build()?;

    match args.command {
        Command::Refresh { feeds } => {
            prepare_store_dir(&args.store_path).await?;
            run_refresh(&http, &args.store_path, &feeds).await?;
        }
        Command::Watch {
            feeds,
            interval: interval_secs,
        } => {
            prepare_store_dir(&args.store_path).await?;
            watch(&http, &args.store_path, &feeds, interval_secs).await?;
        }
        Command::List { category, limit } => {
            let store = ArticleStore::load(&args.store_path).await?;
            let selection = match category.as_deref() {
                Some(category) => store.by_category(category, limit),
                None => store.recent(limit),
            };
            info!(count = selection.len(), "Listing annotated articles");
            println!("{}", serde_json::to_string_pretty(&selection)?);
        }
        Command::Check {
            claim,
            meta,
            serpapi_key,
            groq_api_key,
        } => {
            run_check(&http, &settings, &claim, meta, serpapi_key, groq_api_key).await?;
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

/// Fail fast when the store's directory cannot be written.
async fn prepare_store_dir(store_path: &Path) -> Result<(), Box<dyn Error>> {
    let Some(parent) = store_path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    if let Err(e) = ensure_writable_dir(parent).await {
        error!(
            path = %parent.display(),
            error = %e,
            "Store directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }
    Ok(())
}

/// One full refresh pass: index and fetch every feed, annotate what is new
/// or retitled, persist the store.
#[instrument(level = "info", skip_all)]
async fn run_refresh(
    http: &reqwest::Client,
    store_path: &Path,
    opts: &FeedOpts,
) -> Result<(), Box<dyn Error>> {
    // ---- Index and fetch articles ----
    // A feed that errors contributes nothing; the pass carries on.
    let guardian_articles = match opts.guardian_api_key.as_deref() {
        Some(api_key) => match feeds::guardian::index_articles(http, api_key).await {
            Ok(items) => feeds::guardian::fetch_articles(http, items).await,
            Err(e) => {
                warn!(error = %e, "Guardian indexing failed; continuing without it");
                Vec::new()
            }
        },
        None => {
            info!("No Guardian API key; skipping Guardian feed");
            Vec::new()
        }
    };

    let google_news_articles =
        match feeds::google_news::index_articles(http, opts.topic.as_deref()).await {
            Ok(items) => feeds::google_news::fetch_articles(http, items).await,
            Err(e) => {
                warn!(error = %e, "Google News indexing failed; continuing without it");
                Vec::new()
            }
        };

    let toi_articles = match feeds::times_of_india::index_articles(http).await {
        Ok(items) => feeds::times_of_india::fetch_articles(http, items).await,
        Err(e) => {
            warn!(error = %e, "Times of India indexing failed; continuing without it");
            Vec::new()
        }
    };

    // Capture per-source counts before flattening
    let guardian_fetched = guardian_articles.len();
    let google_news_fetched = google_news_articles.len();
    let toi_fetched = toi_articles.len();

    let articles = vec![guardian_articles, google_news_articles, toi_articles]
        .into_iter()
        .flatten()
        .unique_by(|article| article.web_url.clone())
        .collect::<Vec<RawArticle>>();

    info!(
        total = articles.len(),
        guardian_count = guardian_fetched,
        google_news_count = google_news_fetched,
        times_of_india_count = toi_fetched,
        "Article fetching completed"
    );

    // ---- Annotate and persist ----
    let mut store = ArticleStore::load(store_path).await?;
    let tables = SourceTables::builtin();
    let classifier = LexiconClassifier::new();

    let mut inserted = 0usize;
    let mut updated = 0usize;
    let mut skipped = 0usize;
    for raw in &articles {
        // known URL with the same title: no classification, no rewrite
        if store.is_current(raw) {
            skipped += 1;
            continue;
        }
        let raw_prediction = classifier.predict(&raw.title);
        match store.upsert(raw, raw_prediction, &tables) {
            UpsertOutcome::Inserted => {
                inserted += 1;
                debug!(
                    title = %truncate_for_log(&raw.title, 80),
                    raw_prediction,
                    "Stored new article"
                );
            }
            UpsertOutcome::Updated => {
                updated += 1;
                debug!(
                    title = %truncate_for_log(&raw.title, 80),
                    "Re-annotated retitled article"
                );
            }
            UpsertOutcome::Unchanged => skipped += 1,
        }
    }

    store.save(store_path).await?;
    info!(
        fetched = articles.len(),
        inserted,
        updated,
        skipped,
        stored = store.len(),
        "Refresh pass completed"
    );
    Ok(())
}

/// Refresh on a fixed cadence until the process is killed.
async fn watch(
    http: &reqwest::Client,
    store_path: &Path,
    opts: &FeedOpts,
    interval_secs: u64,
) -> Result<(), Box<dyn Error>> {
    let mut ticker = interval(Duration::from_secs(interval_secs.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(interval_secs = interval_secs.max(1), "Watching feeds; stop with Ctrl-C");

    loop {
        ticker.tick().await;
        if let Err(e) = run_refresh(http, store_path, opts).await {
            error!(error = %e, "Refresh pass failed; will try again next tick");
        }
    }
}

/// Verify one claim and print the report as JSON.
///
/// Without `--meta` this is a classifier-only call: local, instant, no
/// keys. With it, the claim goes through the full search-and-generate
/// analysis.
async fn run_check(
    http: &reqwest::Client,
    settings: &Settings,
    claim: &str,
    meta: bool,
    serpapi_key: Option<String>,
    groq_api_key: Option<String>,
) -> Result<(), Box<dyn Error>> {
    if !meta {
        let classifier = LexiconClassifier::new();
        let prediction = classifier.predict(claim);
        info!(prediction, "Classifier-only check");
        let output = serde_json::json!({
            "claim": claim,
            "prediction": prediction,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let serpapi_key = serpapi_key.ok_or("SERPAPI_KEY (or --serpapi-key) is required with --meta")?;
    let groq_api_key = groq_api_key.ok_or("GROQ_API_KEY (or --groq-api-key) is required with --meta")?;

    let search = SerpApiClient::new(http.clone(), settings.search_endpoint.as_str(), serpapi_key);
    let chat = ChatCompletionsClient::new(
        http.clone(),
        settings.chat_base_url.as_str(),
        groq_api_key,
        settings.chat_model.as_str(),
        settings.chat_temperature,
        settings.chat_max_tokens,
    );
    let generator = RetryAsk::new(chat, settings.generation_retries, Duration::from_secs(1));
    let verifier = ClaimVerifier::new(search, generator, SourceTables::builtin());

    let report = verifier.verify(claim).await;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
