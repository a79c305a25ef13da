//! Data records flowing through the digest pipeline.
//!
//! This module defines the transient records the pipeline stages hand to
//! each other:
//! - [`HotLink`]: a candidate article discovered on the portal front page
//! - [`ArticleRecord`]: the title and body text extracted from one article
//! - [`SummaryResult`]: a summarized article destined for the digest file
//!
//! All records live only for the duration of a single run. Nothing is
//! persisted between runs; an article that fails at any stage simply never
//! becomes a [`SummaryResult`].

/// A candidate article link discovered on the portal front page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotLink {
    /// Absolute article URL, normalized to scheme, host, and path.
    pub url: String,
    /// The anchor's visible display text.
    pub text: String,
}

/// Title and body text extracted from one article page.
///
/// Extraction never fails on missing page structure: a page without a
/// usable heading or body yields fixed placeholder text instead (see the
/// NetEase scraper module).
#[derive(Debug, Clone)]
pub struct ArticleRecord {
    /// The URL the record was extracted from.
    pub url: String,
    /// Heading text, or the no-title placeholder.
    pub title: String,
    /// Filtered paragraph text joined by newlines, or the no-content
    /// placeholder.
    pub content: String,
}

/// One successfully summarized article, kept in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    /// Title after the front-page anchor-text fallback was applied.
    pub title: String,
    /// The article URL exactly as discovered (not clipped or rewritten).
    pub url: String,
    /// Cleaned summary text returned by the model.
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hot_link_equality_is_by_value() {
        let a = HotLink {
            url: "https://www.163.com/dy/article/ABC.html".to_string(),
            text: "标题".to_string(),
        };
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn test_article_record_holds_placeholders_verbatim() {
        let record = ArticleRecord {
            url: "https://www.163.com/dy/article/ABC.html".to_string(),
            title: "（未找到标题）".to_string(),
            content: "正文第一段\n正文第二段".to_string(),
        };
        assert_eq!(record.title, "（未找到标题）");
        assert_eq!(record.content.lines().count(), 2);
    }
}
