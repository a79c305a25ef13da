//! NetEase (163.com) front-page indexing and article extraction.
//!
//! # URL pattern
//!
//! Hot stories on the front page link to
//! `https://www.163.com/dy/article/<id>.html`, frequently with tracking
//! query strings or fragments appended. Matching is a prefix test so those
//! variants still qualify, and the query and fragment are dropped before
//! deduplication. Scheme, host, and path are the identity of an article.
//!
//! # Extraction strategy
//!
//! Article markup drifts over time, so both title and body go through
//! ordered fallback chains that end in fixed placeholder text rather than
//! an error:
//!
//! - title: first `<h1>`, else the document `<title>`, else a placeholder
//! - body: first match among the known container selectors, else the whole
//!   document; within it, `<p>` text of at least five characters, joined
//!   by newlines, else a placeholder
//!
//! Script, style, and noscript subtrees never contribute text.

use std::collections::HashSet;
use std::error::Error;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument};
use url::Url;

use crate::models::{ArticleRecord, HotLink};
use crate::scrapers::fetch_html;

/// The portal front page scanned for hot links.
pub const HOME_URL: &str = "https://www.163.com";

/// Title used when neither an `h1` nor a document title yields text.
pub const NO_TITLE_PLACEHOLDER: &str = "（未找到标题）";
/// Body used when no paragraph survives filtering.
pub const NO_CONTENT_PLACEHOLDER: &str = "（未提取到正文：可能页面结构变化/异步加载/反爬限制）";

/// Paragraphs shorter than this many characters are treated as noise,
/// like timestamps and photo credits.
const MIN_PARAGRAPH_CHARS: usize = 5;

/// Candidate article-body containers, most specific first.
const CONTAINER_SELECTORS: [&str; 5] = [
    "#content",
    "#endText",
    ".post_body",
    ".article-body",
    "article",
];

/// Tags whose text is never article body.
const STRIPPED_TAGS: [&str; 3] = ["script", "style", "noscript"];

/// Prefix pattern for qualifying article hrefs; tracking suffixes after
/// `.html` are allowed through and removed during normalization.
static ARTICLE_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://(?:www\.)?163\.com/dy/article/.*\.html").unwrap());

/// Fetch the front page and collect up to `limit` hot links.
#[instrument(level = "info", skip(client))]
pub async fn index_hot_links(
    client: &Client,
    limit: usize,
) -> Result<Vec<HotLink>, Box<dyn Error>> {
    let html = fetch_html(client, HOME_URL).await?;
    let links = collect_hot_links(&html, limit);
    info!(count = links.len(), source = HOME_URL, "Indexed hot links");
    Ok(links)
}

/// Collect qualifying article links from front-page HTML, in document
/// order.
///
/// An anchor qualifies when its trimmed `href` matches the article URL
/// pattern and its display text is non-empty. URLs are normalized before
/// the duplicate check, so tracking-parameter variants of one article
/// collapse into a single entry. Collection stops as soon as `limit`
/// links are gathered.
pub fn collect_hot_links(html: &str, limit: usize) -> Vec<HotLink> {
    let document = Html::parse_document(html);
    let anchor_selector = Selector::parse("a[href]").unwrap();

    let mut links = Vec::new();
    let mut seen = HashSet::new();

    for anchor in document.select(&anchor_selector) {
        if links.len() >= limit {
            break;
        }
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if href.is_empty() || !ARTICLE_LINK_RE.is_match(href) {
            continue;
        }
        let Some(url) = normalize_url(href) else {
            continue;
        };
        if seen.contains(&url) {
            continue;
        }
        let text = element_text(anchor);
        if text.is_empty() {
            continue;
        }
        seen.insert(url.clone());
        links.push(HotLink { url, text });
    }

    links
}

/// Fetch one article page and extract its title and body.
///
/// Transport failures propagate; missing page structure never fails, it
/// degrades to placeholder text instead.
#[instrument(level = "info", skip(client), fields(url = %url))]
pub async fn fetch_article(client: &Client, url: &str) -> Result<ArticleRecord, Box<dyn Error>> {
    let html = fetch_html(client, url).await?;
    let record = extract_article(&html, url);
    debug!(
        title = %record.title,
        content_chars = record.content.chars().count(),
        "Parsed article"
    );
    Ok(record)
}

/// Extract a best-effort title and body from article HTML.
pub fn extract_article(html: &str, url: &str) -> ArticleRecord {
    let document = Html::parse_document(html);
    ArticleRecord {
        url: url.to_string(),
        title: resolve_title(&document),
        content: resolve_content(&document),
    }
}

/// First `h1` text, else the document title, else the placeholder.
fn resolve_title(document: &Html) -> String {
    let h1_selector = Selector::parse("h1").unwrap();
    if let Some(h1) = document.select(&h1_selector).next() {
        let text = element_text(h1);
        if !text.is_empty() {
            return text;
        }
    }
    let title_selector = Selector::parse("title").unwrap();
    if let Some(title) = document.select(&title_selector).next() {
        let text = element_text(title);
        if !text.is_empty() {
            return text;
        }
    }
    NO_TITLE_PLACEHOLDER.to_string()
}

/// Locate the body container, then join its qualifying paragraphs.
fn resolve_content(document: &Html) -> String {
    let container = select_container(document);
    let paragraph_selector = Selector::parse("p").unwrap();

    let mut lines = Vec::new();
    for paragraph in container.select(&paragraph_selector) {
        if has_stripped_ancestor(paragraph) {
            continue;
        }
        let text = text_without_stripped_tags(paragraph);
        if text.chars().count() < MIN_PARAGRAPH_CHARS {
            continue;
        }
        lines.push(text);
    }

    let content = lines.join("\n").trim().to_string();
    if content.is_empty() {
        NO_CONTENT_PLACEHOLDER.to_string()
    } else {
        content
    }
}

/// First match in the candidate chain, else the whole document.
fn select_container(document: &Html) -> ElementRef<'_> {
    for css in CONTAINER_SELECTORS {
        let selector = Selector::parse(css).unwrap();
        if let Some(element) = document.select(&selector).next() {
            return element;
        }
    }
    document.root_element()
}

/// Reduce a URL to scheme, host, and path.
fn normalize_url(raw: &str) -> Option<String> {
    let mut url = Url::parse(raw).ok()?;
    url.set_query(None);
    url.set_fragment(None);
    Some(url.into())
}

/// Concatenated per-node-trimmed text of an element.
fn element_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

/// True when the element sits inside a script, style, or noscript subtree.
fn has_stripped_ancestor(element: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| STRIPPED_TAGS.contains(&ancestor.value().name()))
}

/// Per-node-trimmed text of an element, skipping script, style, and
/// noscript subtrees entirely.
fn text_without_stripped_tags(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_text(element, &mut out);
    out
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text.trim());
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !STRIPPED_TAGS.contains(&child_element.value().name()) {
                collect_text(child_element, out);
            }
        }
    }
}
