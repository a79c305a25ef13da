//! Utility functions for content clipping, log-safe previews, and file
//! system validation.
//!
//! This module provides helpers used throughout the application:
//! - Character-based clipping of over-long article bodies before they are
//!   sent to the model
//! - String truncation for logging
//! - File system validation for the output directory
//!
//! Everything here counts characters rather than bytes. The pipeline
//! handles Chinese text end to end, and byte slicing would split
//! multi-byte codepoints.

use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{debug, info, instrument};

/// Article content longer than this many characters gets clipped before
/// summarization.
pub const CLIP_THRESHOLD_CHARS: usize = 8000;
/// Characters kept from the start of over-long content.
const CLIP_HEAD_CHARS: usize = 6000;
/// Characters kept from the end of over-long content.
const CLIP_TAIL_CHARS: usize = 1500;
/// Marker joining the kept head and tail.
const CLIP_MARKER: &str = "\n...\n";

/// Bound over-long article content before it is sent to the model.
///
/// Content of at most 8000 characters passes through unchanged. Anything
/// longer is reduced to its first 6000 characters plus its last 1500,
/// joined by an elision marker, so closing paragraphs still reach the
/// model without the full body.
///
/// # Arguments
///
/// * `content` - The article body to bound
///
/// # Returns
///
/// The content itself, or the clipped head-and-tail form.
pub fn clip_content(content: &str) -> String {
    let total = content.chars().count();
    if total <= CLIP_THRESHOLD_CHARS {
        return content.to_string();
    }
    let head: String = content.chars().take(CLIP_HEAD_CHARS).collect();
    let tail: String = content.chars().skip(total - CLIP_TAIL_CHARS).collect();
    debug!(total, "Clipped over-long content");
    format!("{head}{CLIP_MARKER}{tail}")
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and a count
/// of the dropped characters appended. Counting characters keeps the cut
/// from landing inside a multi-byte codepoint.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 chars)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let total = s.chars().count();
    if total <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max).collect();
        format!("{}…(+{} chars)", kept, total - max)
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test
/// by creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable
/// (permission denied, read-only filesystem, etc.).
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    // Small sync write using std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_content_short_passes_through() {
        let content = "短文无需截断";
        assert_eq!(clip_content(content), content);
    }

    #[test]
    fn test_clip_content_at_threshold_unchanged() {
        let content: String = std::iter::repeat('字').take(8000).collect();
        assert_eq!(clip_content(&content), content);
    }

    #[test]
    fn test_clip_content_just_over_threshold() {
        let content: String = std::iter::repeat('字').take(8001).collect();
        let clipped = clip_content(&content);
        assert_ne!(clipped, content);
        assert_eq!(clipped.chars().count(), 6000 + 5 + 1500);
    }

    #[test]
    fn test_clip_content_keeps_head_and_tail() {
        // Varied CJK characters so head and tail are distinguishable
        let content: String = (0..9000u32)
            .map(|i| char::from_u32(0x4e00 + (i % 512)).unwrap())
            .collect();
        let head: String = content.chars().take(6000).collect();
        let tail: String = content.chars().skip(9000 - 1500).collect();
        assert_eq!(clip_content(&content), format!("{head}\n...\n{tail}"));
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 chars)"));
    }

    #[test]
    fn test_truncate_for_log_counts_characters_not_bytes() {
        // Four CJK characters are twelve bytes; a max of four characters
        // must keep all of them
        let s = "新闻摘要";
        assert_eq!(truncate_for_log(s, 4), "新闻摘要");
        let cut = truncate_for_log("新闻摘要助手", 4);
        assert!(cut.starts_with("新闻摘要"));
        assert!(cut.contains("(+2 chars)"));
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_missing() {
        let dir = std::env::temp_dir().join(format!("digest_probe_{}", std::process::id()));
        let path = dir.to_string_lossy().to_string();
        assert!(ensure_writable_dir(&path).await.is_ok());
        assert!(dir.is_dir());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
