//! Portal scraping: shared fetch plumbing plus the NetEase source module.
//!
//! The one supported source lives in [`netease`]. It follows a two-phase
//! pattern:
//!
//! 1. **Indexing**: discover hot-story URLs on the portal front page
//! 2. **Fetching**: download each article page and extract title and body
//!
//! The helpers here are the pieces any source needs:
//! - [`build_client`]: a [`reqwest::Client`] pre-configured with a
//!   browser-like User-Agent and a bounded timeout
//! - [`fetch_html`]: download a page and decode the body from its declared
//!   character encoding (NetEase pages are frequently GBK/GB2312 and read
//!   as mojibake when treated as UTF-8)
//!
//! Character-encoding resolution order: `charset=` in the Content-Type
//! header, else a `charset=` token within the first kilobyte of the body
//! (the meta tag), else UTF-8. Decoding is lossy; malformed sequences
//! become replacement characters rather than errors.

use std::error::Error;
use std::time::Duration;

use encoding_rs::{Encoding, UTF_8};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use tracing::debug;

pub mod netease;

/// User-Agent presented on every page fetch. Portal pages serve a reduced
/// shell to clients that don't look like a browser.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// How far into the body the meta-charset sniff looks.
const CHARSET_SNIFF_BYTES: usize = 1024;

static CHARSET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([a-zA-Z0-9_\-]+)"#).unwrap());

/// Build the shared page-fetch client.
pub fn build_client(timeout: Duration) -> Result<Client, Box<dyn Error>> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    let client = Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .build()?;
    Ok(client)
}

/// Download a page and return its body as decoded text.
///
/// Non-2xx statuses and transport failures are hard errors; callers decide
/// whether that sinks the run or just skips the page.
pub async fn fetch_html(client: &Client, url: &str) -> Result<String, Box<dyn Error>> {
    let response = client.get(url).send().await?.error_for_status()?;
    let header_charset = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(charset_label);
    let bytes = response.bytes().await?;
    debug!(%url, bytes = bytes.len(), "Fetched page");
    Ok(decode_html(&bytes, header_charset.as_deref()))
}

/// Pull the charset token out of a header value or markup fragment.
fn charset_label(text: &str) -> Option<String> {
    CHARSET_RE
        .captures(text)
        .map(|captures| captures[1].to_string())
}

/// Look for a `charset=` declaration near the top of the raw body.
fn sniff_charset(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(CHARSET_SNIFF_BYTES)];
    charset_label(&String::from_utf8_lossy(head))
}

/// Decode raw page bytes using the declared encoding, defaulting to UTF-8.
fn decode_html(bytes: &[u8], header_charset: Option<&str>) -> String {
    let label = header_charset
        .map(str::to_string)
        .or_else(|| sniff_charset(bytes));
    let encoding = label
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charset_label_from_header() {
        assert_eq!(
            charset_label("text/html; charset=GBK").as_deref(),
            Some("GBK")
        );
        assert_eq!(
            charset_label("text/html; charset=\"utf-8\"").as_deref(),
            Some("utf-8")
        );
        assert_eq!(charset_label("text/html"), None);
    }

    #[test]
    fn test_decode_html_header_charset_wins() {
        // GBK bytes for 你好 behind a meta tag claiming UTF-8; the header
        // declaration takes precedence over the sniffed one.
        let bytes =
            b"<html><head><meta charset=\"utf-8\"></head><body>\xc4\xe3\xba\xc3</body></html>";
        let text = decode_html(bytes, Some("gbk"));
        assert!(text.contains("你好"));
    }

    #[test]
    fn test_decode_html_sniffs_meta_charset() {
        let bytes =
            b"<html><head><meta charset=\"gb2312\"></head><body>\xc4\xe3\xba\xc3</body></html>";
        let text = decode_html(bytes, None);
        assert!(text.contains("你好"));
    }

    #[test]
    fn test_decode_html_defaults_to_utf8() {
        assert_eq!(decode_html("早安".as_bytes(), None), "早安");
    }

    #[test]
    fn test_decode_html_unknown_label_falls_back_to_utf8() {
        assert_eq!(decode_html("ok".as_bytes(), Some("martian")), "ok");
    }
}
