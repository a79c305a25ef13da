//! Summarization over the Ollama-style chat API.
//!
//! This module sends one single-turn, non-streaming chat request per
//! article to a locally hosted model and returns the cleaned summary text.
//!
//! # Request shape
//!
//! `POST {base_url}/api/chat` with a JSON body carrying the model name,
//! one user message (a fixed Chinese instruction prompt with the article
//! body embedded), and `stream: false`.
//!
//! # Response handling
//!
//! The response is parsed leniently: a JSON body without the expected
//! `message.content` field yields an empty summary rather than an error,
//! while a non-JSON body or a non-2xx status propagates as a failure.
//! Reasoning blocks some local models prepend (`<think>...</think>`) are
//! stripped before the summary is returned.

use std::error::Error;
use std::time::Instant;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::config::DigestConfig;

/// Chain-of-thought block emitted by DeepSeek-R1 style models; never part
/// of the intended summary.
static REASONING_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<think>.*?</think>").unwrap());

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

/// Client for the local chat endpoint.
///
/// Carries its own [`reqwest::Client`] so the summarization timeout stays
/// independent of the page-fetch timeout.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    /// Build a client from the run configuration.
    pub fn new(config: &DigestConfig) -> Result<Self, Box<dyn Error>> {
        let http = reqwest::Client::builder()
            .timeout(config.llm_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.llm_endpoint.trim_end_matches('/').to_string(),
            model: config.llm_model.clone(),
        })
    }

    /// Summarize one article body into numbered key points.
    ///
    /// `title` is log context only; the prompt embeds the body text alone.
    ///
    /// # Errors
    ///
    /// Transport failures, timeouts, non-2xx statuses, and non-JSON bodies
    /// propagate. A JSON body of an unexpected shape degrades to an empty
    /// summary instead.
    #[instrument(level = "info", skip_all, fields(model = %self.model, title = %title))]
    pub async fn summarize(&self, title: &str, content: &str) -> Result<String, Box<dyn Error>> {
        let prompt = build_prompt(content);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            stream: false,
        };

        let t0 = Instant::now();
        let response = self
            .http
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        let parsed: ChatResponse = response.json().await?;
        info!(
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Chat completion received"
        );

        let raw = parsed
            .message
            .map(|message| message.content)
            .unwrap_or_default();
        Ok(strip_reasoning(&raw))
    }
}

/// The fixed instruction prompt: numbered key points only, at most 200
/// characters, no markdown, no blank lines, no repeated fields.
fn build_prompt(content: &str) -> String {
    format!(
        "你是新闻摘要助手。请只输出【要点总结】内容，不要输出标题，不要输出链接，不要输出任何【】标签，不要输出多余说明。\n\
         要求：\n\
         1）输出若干条要点，每条以“1.”“2.”编号开头\n\
         2）总字数<=200，客观精炼，包含关键数据\n\
         3）不要出现空行，不要出现Markdown，不要重复任何字段\n\
         正文：\n\
         {content}"
    )
}

/// Remove every `<think>...</think>` block and trim the remainder.
///
/// Text without markers comes back unchanged apart from surrounding
/// whitespace. An unterminated opening marker is left in place.
pub fn strip_reasoning(text: &str) -> String {
    REASONING_BLOCK_RE.replace_all(text, "").trim().to_string()
}
