//! Run-time configuration for the digest pipeline.
//!
//! Every tunable the pipeline consults lives in [`DigestConfig`], so the
//! components receive explicit values instead of reaching for globals.
//! `Default` carries the stock values; the CLI layer overrides them per
//! run via the `From<Cli>` conversion.

use std::time::Duration;

use crate::cli::Cli;

/// Default number of front-page hot links processed per run.
pub const DEFAULT_LINK_LIMIT: usize = 10;
/// Default timeout in seconds for portal and article page fetches.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
/// Default timeout in seconds for one summarization call. Model inference
/// on small hardware routinely takes this long.
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;
/// Default base URL of the local inference server.
pub const DEFAULT_LLM_ENDPOINT: &str = "http://localhost:11434";
/// Default model identifier sent with each chat request.
pub const DEFAULT_LLM_MODEL: &str = "deepseek-r1:1.5b";
/// Default directory the digest file is written to.
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Pause inserted after each successfully summarized article, keeping the
/// request rate against the source site polite.
const ARTICLE_DELAY_MS: u64 = 500;

/// Knobs shared by every pipeline component.
#[derive(Debug, Clone)]
pub struct DigestConfig {
    /// Maximum number of hot links to collect and process.
    pub link_limit: usize,
    /// Timeout applied to every page fetch.
    pub fetch_timeout: Duration,
    /// Base URL of the chat endpoint, without the `/api/chat` suffix.
    pub llm_endpoint: String,
    /// Model identifier sent with each chat request.
    pub llm_model: String,
    /// Timeout applied to every summarization call.
    pub llm_timeout: Duration,
    /// Directory the dated digest file is written to.
    pub output_dir: String,
    /// Pause after each successfully summarized article.
    pub article_delay: Duration,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            link_limit: DEFAULT_LINK_LIMIT,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            llm_endpoint: DEFAULT_LLM_ENDPOINT.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            llm_timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            article_delay: Duration::from_millis(ARTICLE_DELAY_MS),
        }
    }
}

impl From<Cli> for DigestConfig {
    fn from(cli: Cli) -> Self {
        Self {
            link_limit: cli.limit,
            fetch_timeout: Duration::from_secs(cli.fetch_timeout_secs),
            llm_endpoint: cli.endpoint,
            llm_model: cli.model,
            llm_timeout: Duration::from_secs(cli.llm_timeout_secs),
            output_dir: cli.output_dir,
            article_delay: Duration::from_millis(ARTICLE_DELAY_MS),
        }
    }
}
