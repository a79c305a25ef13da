//! Dated plain-text digest output.
//!
//! One file per run, named `<year>年<month>月<day>日网易新闻要点.txt` and
//! overwritten when a run repeats on the same day. The entry format is
//! fixed:
//!
//! ```text
//! 一、<title>
//! <url>
//! 【要点总结】
//! <summary>
//!
//! 二、<title>
//! ...
//! ```
//!
//! Entries are numbered with Chinese numerals through ten and decimal
//! numerals beyond. A blank line separates entries but does not trail the
//! last one.

use std::error::Error;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Local, NaiveDate};
use tracing::{info, instrument};

use crate::models::SummaryResult;

/// Label line preceding each entry's summary text.
const SUMMARY_LABEL: &str = "【要点总结】";
/// Fixed descriptive part of the output filename.
const FILENAME_STEM: &str = "网易新闻要点";
/// Ordinals for entries one through ten.
const CHINESE_NUMERALS: [&str; 10] = ["一", "二", "三", "四", "五", "六", "七", "八", "九", "十"];

/// Write the digest for today's date into `output_dir`, returning the
/// path of the written file. Same-day output is overwritten.
#[instrument(level = "info", skip(results), fields(count = results.len(), output_dir = %output_dir))]
pub async fn write_report(
    results: &[SummaryResult],
    output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let path = Path::new(output_dir).join(report_filename(Local::now().date_naive()));
    tokio::fs::write(&path, render_report(results)).await?;
    info!(path = %path.display(), "Wrote digest file");
    Ok(path)
}

/// The digest filename for a date; month and day are unpadded.
pub fn report_filename(date: NaiveDate) -> String {
    format!(
        "{}年{}月{}日{}.txt",
        date.year(),
        date.month(),
        date.day(),
        FILENAME_STEM
    )
}

/// Render the digest body.
///
/// Titles and URLs are forced onto single lines; summaries keep their
/// internal line breaks but lose surrounding whitespace.
pub fn render_report(results: &[SummaryResult]) -> String {
    let mut out = String::new();
    for (index, result) in results.iter().enumerate() {
        let ordinal = index + 1;
        out.push_str(&chinese_ordinal(ordinal));
        out.push('、');
        out.push_str(&single_line(&result.title));
        out.push('\n');
        out.push_str(&single_line(&result.url));
        out.push('\n');
        out.push_str(SUMMARY_LABEL);
        out.push('\n');
        out.push_str(result.summary.trim());
        out.push('\n');
        if ordinal != results.len() {
            out.push('\n');
        }
    }
    out
}

/// 1 through 10 become 一 through 十; larger values fall back to decimal.
fn chinese_ordinal(n: usize) -> String {
    match n {
        1..=10 => CHINESE_NUMERALS[n - 1].to_string(),
        _ => n.to_string(),
    }
}

/// Collapse newlines so titles and URLs stay on one line.
fn single_line(s: &str) -> String {
    s.replace('\n', " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(title: &str, url: &str, summary: &str) -> SummaryResult {
        SummaryResult {
            title: title.to_string(),
            url: url.to_string(),
            summary: summary.to_string(),
        }
    }

    #[test]
    fn test_chinese_ordinal_mapping() {
        assert_eq!(chinese_ordinal(1), "一");
        assert_eq!(chinese_ordinal(2), "二");
        assert_eq!(chinese_ordinal(10), "十");
        assert_eq!(chinese_ordinal(11), "11");
    }

    #[test]
    fn test_report_filename_unpadded() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        assert_eq!(report_filename(date), "2026年8月5日网易新闻要点.txt");
    }

    #[test]
    fn test_report_filename_double_digit_date() {
        let date = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        assert_eq!(report_filename(date), "2026年12月31日网易新闻要点.txt");
    }

    #[test]
    fn test_render_report_two_entries() {
        let results = [
            sample(
                "价格新政落地",
                "https://www.163.com/dy/article/A.html",
                "1. 要点一\n2. 要点二",
            ),
            sample(
                "台风逼近沿海",
                "https://www.163.com/dy/article/B.html",
                "1. 风力十二级",
            ),
        ];
        let expected = "一、价格新政落地\n\
                        https://www.163.com/dy/article/A.html\n\
                        【要点总结】\n\
                        1. 要点一\n2. 要点二\n\
                        \n\
                        二、台风逼近沿海\n\
                        https://www.163.com/dy/article/B.html\n\
                        【要点总结】\n\
                        1. 风力十二级\n";
        assert_eq!(render_report(&results), expected);
    }

    #[test]
    fn test_render_report_single_entry_has_no_trailing_blank_line() {
        let results = [sample("标题", "https://u", "1. 要点")];
        let rendered = render_report(&results);
        assert!(rendered.ends_with("1. 要点\n"));
        assert!(!rendered.ends_with("\n\n"));
    }

    #[test]
    fn test_render_report_flattens_title_and_trims_summary() {
        let results = [sample(
            "多行\n标题",
            "https://u",
            "\n  1. 要点一\n2. 要点二  \n",
        )];
        let rendered = render_report(&results);
        assert!(rendered.starts_with("一、多行 标题\n"));
        assert!(rendered.contains("【要点总结】\n1. 要点一\n2. 要点二\n"));
    }

    #[test]
    fn test_render_report_empty_input() {
        assert_eq!(render_report(&[]), "");
    }

    #[test]
    fn test_render_report_eleventh_entry_decimal() {
        let results: Vec<SummaryResult> = (1..=11)
            .map(|i| sample(&format!("标题{i}"), "https://u", "1. 要点"))
            .collect();
        let rendered = render_report(&results);
        assert!(rendered.contains("十、标题10\n"));
        assert!(rendered.contains("11、标题11\n"));
    }

    #[tokio::test]
    async fn test_write_report_overwrites_same_day_file() {
        let dir = std::env::temp_dir().join(format!("digest_report_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let dir_str = dir.to_string_lossy().to_string();

        let first = [
            sample("旧标题一", "https://u1", "1. 旧要点"),
            sample("旧标题二", "https://u2", "1. 旧要点"),
        ];
        let second = [sample("新标题", "https://u3", "1. 新要点")];

        let path_a = write_report(&first, &dir_str).await.unwrap();
        let path_b = write_report(&second, &dir_str).await.unwrap();
        assert_eq!(path_a, path_b);
        assert_eq!(
            path_a.file_name().unwrap().to_string_lossy(),
            report_filename(Local::now().date_naive())
        );

        let written = std::fs::read_to_string(&path_b).unwrap();
        assert_eq!(written, render_report(&second));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
