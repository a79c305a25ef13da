//! # NetEase News Digest
//!
//! A news summarization pipeline that collects the hot stories on the
//! NetEase (163.com) front page, summarizes each one with a locally hosted
//! LLM, and writes the results to a dated plain-text digest.
//!
//! ## Features
//!
//! - Scrapes up to ten `dy/article` hot links from the front page,
//!   deduplicated by normalized URL
//! - Extracts article title and body text with layout-drift fallbacks
//! - Summarizes each article through an Ollama-style `/api/chat` endpoint
//! - Writes one `<date>网易新闻要点.txt` digest file per run
//!
//! ## Usage
//!
//! ```sh
//! netease_news_digest
//! netease_news_digest -o /srv/digests --model qwen2:7b
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Indexing**: discover hot-story URLs on the front page
//! 2. **Fetching**: download each article and extract title and body
//! 3. **Processing**: send each body to the LLM for summarization
//!    (strictly sequential, one article at a time)
//! 4. **Output**: write the dated digest file
//!
//! A failed article is logged and skipped, never retried; the digest holds
//! whatever succeeded, in discovery order.

use clap::Parser;
use std::error::Error;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod api;
mod cli;
mod config;
mod models;
mod report;
mod scrapers;
mod utils;

use api::OllamaClient;
use cli::Cli;
use config::DigestConfig;
use models::SummaryResult;
use scrapers::netease::{self, NO_TITLE_PLACEHOLDER};
use utils::{clip_content, ensure_writable_dir, truncate_for_log};

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
    info!("netease_news_digest starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");
    let config = DigestConfig::from(args);

    // Early check: ensure the digest directory is writable
    if let Err(e) = ensure_writable_dir(&config.output_dir).await {
        error!(
            path = %config.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Index hot links ----
    let page_client = scrapers::build_client(config.fetch_timeout)?;
    let hot_links = netease::index_hot_links(&page_client, config.link_limit).await?;
    if hot_links.is_empty() {
        warn!("No hot links found on the front page (layout change or blocked request?); nothing to do");
        return Ok(());
    }
    for (i, link) in hot_links.iter().enumerate() {
        info!(index = i + 1, text = %link.text, url = %link.url, "Hot link");
    }

    // ---- Fetch and summarize, one article at a time ----
    let llm = OllamaClient::new(&config)?;
    let total = hot_links.len();
    let mut results: Vec<SummaryResult> = Vec::new();

    for (i, link) in hot_links.iter().enumerate() {
        let position = i + 1;
        info!(position, total, url = %link.url, "Fetching article");

        let article = match netease::fetch_article(&page_client, &link.url).await {
            Ok(article) => article,
            Err(e) => {
                error!(position, url = %link.url, error = %e, "Article fetch failed; skipping");
                continue;
            }
        };

        // The front-page anchor text stands in when the article page has no
        // usable heading
        let title = if article.title.is_empty() || article.title == NO_TITLE_PLACEHOLDER {
            link.text.clone()
        } else {
            article.title.clone()
        };

        let content = clip_content(&article.content);
        info!(
            position,
            title = %title,
            content_chars = article.content.chars().count(),
            "Summarizing article"
        );

        let summary = match llm.summarize(&title, &content).await {
            Ok(summary) => summary,
            Err(e) => {
                error!(position, url = %link.url, error = %e, "Summarization failed; skipping");
                continue;
            }
        };
        debug!(position, summary = %truncate_for_log(&summary, 200), "Summary received");

        results.push(SummaryResult {
            title,
            url: article.url.clone(),
            summary,
        });

        sleep(config.article_delay).await;
    }

    let successful_count = results.len();
    let failed_count = total - successful_count;
    info!(
        total,
        successful = successful_count,
        failed = failed_count,
        "Completed article processing"
    );

    // ---- Write the digest ----
    if results.is_empty() {
        warn!("No article was successfully summarized; no digest written");
    } else {
        let path = report::write_report(&results, &config.output_dir).await?;
        info!(path = %path.display(), count = successful_count, "Digest complete");
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
