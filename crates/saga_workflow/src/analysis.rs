//! Parsing of phase-1 analysis responses.
//!
//! The analysis prompt asks the model to wrap its long-form notes in
//! `<analysis_detail>` and a short digest in `<executive_summary>`. Models
//! do not always comply, so untagged output is accepted as detail.

use serde::Serialize;
use std::sync::LazyLock;

static DETAIL_PATTERN: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?is)<analysis_detail>(.*?)</analysis_detail>")
        .expect("detail pattern is valid")
});

static SUMMARY_PATTERN: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?is)<executive_summary>(.*?)</executive_summary>")
        .expect("summary pattern is valid")
});

/// Analysis response split into its two regions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisOutput {
    /// Human-facing detailed analysis.
    pub detail: String,
    /// Short digest fed to later phases; empty when not tagged.
    pub executive_summary: String,
    /// Whether at least one tagged region was found.
    pub tagged: bool,
}

/// Split a raw analysis response into detail and executive summary.
///
/// # Examples
///
/// ```
/// use saga_workflow::parse_analysis_output;
///
/// let raw = "<ANALYSIS_DETAIL>\nLong notes\n</ANALYSIS_DETAIL>\n<executive_summary>Short</executive_summary>";
/// let parsed = parse_analysis_output(raw);
/// assert!(parsed.tagged);
/// assert_eq!(parsed.detail, "Long notes");
/// assert_eq!(parsed.executive_summary, "Short");
///
/// let untagged = parse_analysis_output("  just notes  ");
/// assert!(!untagged.tagged);
/// assert_eq!(untagged.detail, "just notes");
/// ```
pub fn parse_analysis_output(raw: &str) -> AnalysisOutput {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return AnalysisOutput::default();
    }

    let detail = capture_region(&DETAIL_PATTERN, trimmed);
    let summary = capture_region(&SUMMARY_PATTERN, trimmed);

    if detail.is_none() && summary.is_none() {
        return AnalysisOutput {
            detail: trimmed.to_string(),
            executive_summary: String::new(),
            tagged: false,
        };
    }

    AnalysisOutput {
        detail: detail.unwrap_or_else(|| trimmed.to_string()),
        executive_summary: summary.unwrap_or_default(),
        tagged: true,
    }
}

fn capture_region(pattern: &regex::Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|region| region.as_str().trim().to_string())
}
