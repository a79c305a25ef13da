//! Command-line interface definitions for the NetEase news digest.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every option carries a default, so a bare invocation runs the stock
//! pipeline; the endpoint and model can also come from environment
//! variables.

use clap::Parser;

use crate::config::{
    DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_LINK_LIMIT, DEFAULT_LLM_ENDPOINT, DEFAULT_LLM_MODEL,
    DEFAULT_LLM_TIMEOUT_SECS, DEFAULT_OUTPUT_DIR,
};

/// Command-line arguments for the NetEase news digest run.
///
/// # Examples
///
/// ```sh
/// # Stock run: ten front-page stories, digest written to the current dir
/// netease_news_digest
///
/// # Different model and output location
/// netease_news_digest -o /srv/digests --model qwen2:7b
///
/// # Remote Ollama host
/// netease_news_digest --endpoint http://llm-box:11434
/// ```
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Directory the dated digest file is written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: String,

    /// Base URL of the Ollama-style chat endpoint
    #[arg(long, env = "OLLAMA_BASE_URL", default_value = DEFAULT_LLM_ENDPOINT)]
    pub endpoint: String,

    /// Model identifier sent with each chat request
    #[arg(long, env = "OLLAMA_MODEL", default_value = DEFAULT_LLM_MODEL)]
    pub model: String,

    /// Maximum number of front-page hot links to process
    #[arg(long, default_value_t = DEFAULT_LINK_LIMIT)]
    pub limit: usize,

    /// Timeout in seconds for portal and article page fetches
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    pub fetch_timeout_secs: u64,

    /// Timeout in seconds for one summarization call
    #[arg(long, default_value_t = DEFAULT_LLM_TIMEOUT_SECS)]
    pub llm_timeout_secs: u64,
}
