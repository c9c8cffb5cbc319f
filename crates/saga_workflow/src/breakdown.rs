//! Chapter breakdown chunk planning and document composition.
//!
//! A breakdown document always carries three headings in a fixed order:
//! overview, chapter table, writing rules. The chapter table is generated
//! in chunks of a few chapters each and concatenated afterwards, because a
//! single call degrades badly for large chapter counts.

use crate::sections::HEADING_PATTERN;
use saga_core::{BreakdownRange, normalize_label};
use std::ops::Range;

/// Label of the overview heading.
pub const BREAKDOWN_OVERVIEW_LABEL: &str = "Breakdown Overview";
/// Label of the chapter table heading.
pub const BREAKDOWN_TABLE_LABEL: &str = "Chapter Table";
/// Label of the writing rules heading.
pub const BREAKDOWN_RULES_LABEL: &str = "Writing Rules";

/// Overview heading as it appears in documents.
pub const BREAKDOWN_OVERVIEW_HEADING: &str = "【Breakdown Overview】";
/// Chapter table heading as it appears in documents.
pub const BREAKDOWN_TABLE_HEADING: &str = "【Chapter Table】";
/// Writing rules heading as it appears in documents.
pub const BREAKDOWN_RULES_HEADING: &str = "【Writing Rules】";

/// Placeholder substituted for an empty section when composing.
pub const BREAKDOWN_PLACEHOLDER: &str = "(not provided)";

/// Chapters per generation chunk unless configured otherwise.
pub const DEFAULT_BREAKDOWN_CHUNK_SIZE: u32 = 5;

/// Overview and rules extracted from a breakdown meta response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreakdownMeta {
    /// Text under the overview heading, trimmed.
    pub overview: String,
    /// Text under the rules heading, trimmed.
    pub rules: String,
}

/// The three parts of a breakdown document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BreakdownParts<'a> {
    /// Overview body.
    pub overview: &'a str,
    /// Chapter table body.
    pub chapter_table: &'a str,
    /// Writing rules body.
    pub rules: &'a str,
}

/// Partition `chapter_count` chapters into consecutive windows of `chunk_size`.
///
/// Both inputs are clamped to at least 1. The last window is truncated at
/// `chapter_count`.
///
/// # Examples
///
/// ```
/// use saga_core::BreakdownRange;
/// use saga_workflow::build_breakdown_ranges;
///
/// assert_eq!(
///     build_breakdown_ranges(12, 5),
///     vec![
///         BreakdownRange::new(1, 5),
///         BreakdownRange::new(6, 10),
///         BreakdownRange::new(11, 12),
///     ]
/// );
/// ```
pub fn build_breakdown_ranges(chapter_count: u32, chunk_size: u32) -> Vec<BreakdownRange> {
    let chapter_count = chapter_count.max(1);
    let chunk_size = chunk_size.max(1);

    (1..=chapter_count)
        .step_by(chunk_size as usize)
        .map(|start| {
            let end = start.saturating_add(chunk_size - 1).min(chapter_count);
            BreakdownRange::new(start, end)
        })
        .collect()
}

/// Pull the overview and rules sections out of a meta response.
///
/// The overview runs from its heading to the earliest later table or rules
/// heading; the rules run from their heading to the next table heading. A
/// missing heading yields an empty string. Headings are matched the way the
/// section validator matches them, ignoring case and inner whitespace.
///
/// # Examples
///
/// ```
/// use saga_workflow::extract_breakdown_meta_sections;
///
/// let meta = "【breakdown  overview】\nThree acts.\n【WRITING RULES】\nPresent tense.";
/// let sections = extract_breakdown_meta_sections(meta);
/// assert_eq!(sections.overview, "Three acts.");
/// assert_eq!(sections.rules, "Present tense.");
/// ```
pub fn extract_breakdown_meta_sections(meta_text: &str) -> BreakdownMeta {
    let overview = section_after(
        meta_text,
        BREAKDOWN_OVERVIEW_LABEL,
        &[BREAKDOWN_TABLE_LABEL, BREAKDOWN_RULES_LABEL],
    );
    let rules = section_after(meta_text, BREAKDOWN_RULES_LABEL, &[BREAKDOWN_TABLE_LABEL]);

    BreakdownMeta { overview, rules }
}

/// Byte spans of every heading in `text` with its normalized label.
fn heading_spans(text: &str) -> impl Iterator<Item = (Range<usize>, String)> + '_ {
    HEADING_PATTERN.captures_iter(text).filter_map(|captures| {
        let span = captures.get(0)?.range();
        Some((span, normalize_label(&captures[1])))
    })
}

fn section_after(text: &str, label: &str, terminators: &[&str]) -> String {
    let wanted = normalize_label(label);
    let Some((heading, _)) = heading_spans(text).find(|(_, found)| *found == wanted) else {
        return String::new();
    };

    let stops: Vec<String> = terminators.iter().map(|t| normalize_label(t)).collect();
    let end = heading_spans(text)
        .find(|(span, found)| span.start >= heading.end && stops.contains(found))
        .map_or(text.len(), |(span, _)| span.start);

    text[heading.end..end].trim().to_string()
}

/// Strip a table heading echoed at the start of a chunk's output.
///
/// Only a leading occurrence is removed, in any case or spacing; the result
/// is trimmed.
///
/// # Examples
///
/// ```
/// use saga_workflow::normalize_breakdown_chunk_content;
///
/// let chunk = "\n【Chapter Table】\n| 6 | The Ferry |";
/// assert_eq!(normalize_breakdown_chunk_content(chunk), "| 6 | The Ferry |");
/// ```
pub fn normalize_breakdown_chunk_content(chunk_text: &str) -> String {
    let trimmed = chunk_text.trim();
    let table = normalize_label(BREAKDOWN_TABLE_LABEL);

    match heading_spans(trimmed).next() {
        Some((span, found)) if span.start == 0 && found == table => {
            trimmed[span.end..].trim().to_string()
        }
        _ => trimmed.to_string(),
    }
}

/// Normalize chunk outputs and join them into one chapter table body.
///
/// Chunks that are empty after normalization are dropped.
pub fn join_breakdown_chunks<S: AsRef<str>>(chunks: &[S]) -> String {
    chunks
        .iter()
        .map(|chunk| normalize_breakdown_chunk_content(chunk.as_ref()))
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assemble the canonical breakdown document.
///
/// All three headings are always emitted in order; empty parts become
/// [`BREAKDOWN_PLACEHOLDER`].
///
/// # Examples
///
/// ```
/// use saga_workflow::{BreakdownParts, compose_breakdown_content};
///
/// let doc = compose_breakdown_content(BreakdownParts::default());
/// assert!(doc.contains("【Breakdown Overview】\n(not provided)"));
/// assert!(doc.contains("【Chapter Table】\n(not provided)"));
/// assert!(doc.contains("【Writing Rules】\n(not provided)"));
/// ```
pub fn compose_breakdown_content(parts: BreakdownParts<'_>) -> String {
    format!(
        "{}\n{}\n\n{}\n{}\n\n{}\n{}",
        BREAKDOWN_OVERVIEW_HEADING,
        or_placeholder(parts.overview),
        BREAKDOWN_TABLE_HEADING,
        or_placeholder(parts.chapter_table),
        BREAKDOWN_RULES_HEADING,
        or_placeholder(parts.rules),
    )
}

fn or_placeholder(section: &str) -> &str {
    let trimmed = section.trim();
    if trimmed.is_empty() {
        BREAKDOWN_PLACEHOLDER
    } else {
        trimmed
    }
}

/// Steering text appended to the breakdown prompt for one chunk.
pub fn breakdown_chunk_instruction(range: BreakdownRange, chapter_count: u32) -> String {
    format!(
        "Produce only the chapter table rows for chapters {} to {} (of {} in total), \
         one row per chapter, in order. Do not write the overview, the writing rules, \
         or the {} heading, and do not cover any chapter outside this range.",
        range.start,
        range.end,
        chapter_count.max(range.end),
        BREAKDOWN_TABLE_HEADING
    )
}
