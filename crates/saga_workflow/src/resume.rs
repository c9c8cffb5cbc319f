//! Resume directive handling for truncated generations.
//!
//! Output cut short by a length limit is stored with a sentinel token so that a
//! later session knows to continue it rather than regenerate it.

use std::sync::LazyLock;

/// Sentinel marking stored output as truncated.
pub const RESUME_DIRECTIVE: &str = "[[RESUME_GENERATION]]";

static RESUME_PATTERN: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?i)\[\[\s*resume_generation\s*\]\]").expect("resume pattern is valid")
});

/// Whether `text` carries the resume directive (case-insensitive).
///
/// # Examples
///
/// ```
/// use saga_workflow::has_resume_directive;
///
/// assert!(has_resume_directive("chapter text\n[[resume_generation]]"));
/// assert!(!has_resume_directive(""));
/// ```
pub fn has_resume_directive(text: &str) -> bool {
    !text.is_empty() && RESUME_PATTERN.is_match(text)
}

/// Remove every directive occurrence and trim.
///
/// Returns `None` when nothing but whitespace remains.
///
/// # Examples
///
/// ```
/// use saga_workflow::strip_resume_directive;
///
/// assert_eq!(
///     strip_resume_directive("Chapter one.\n[[RESUME_GENERATION]]").as_deref(),
///     Some("Chapter one.")
/// );
/// assert_eq!(strip_resume_directive("  [[RESUME_GENERATION]] "), None);
/// ```
pub fn strip_resume_directive(text: &str) -> Option<String> {
    let cleaned = RESUME_PATTERN.replace_all(text, "");
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Append exactly one directive on its own line.
///
/// Idempotent: existing occurrences are stripped first.
///
/// # Examples
///
/// ```
/// use saga_workflow::{RESUME_DIRECTIVE, append_resume_directive};
///
/// let once = append_resume_directive("Partial chapter");
/// let twice = append_resume_directive(&once);
/// assert_eq!(once, twice);
/// assert_eq!(twice.matches(RESUME_DIRECTIVE).count(), 1);
/// ```
pub fn append_resume_directive(text: &str) -> String {
    match strip_resume_directive(text) {
        Some(body) => format!("{}\n{}", body, RESUME_DIRECTIVE),
        None => RESUME_DIRECTIVE.to_string(),
    }
}

/// Build the prompt that continues `existing_output` without repeating it.
///
/// `original_task` and `existing_output` are embedded verbatim.
pub fn build_resume_prompt(original_task: &str, existing_output: &str) -> String {
    format!(
        "The previous response was cut off before it was finished. Continue it.\n\
         Rules:\n\
         1. Output only the new content that comes after the existing output.\n\
         2. Never repeat, rewrite, summarize or reorder any of the existing output.\n\
         3. Continue seamlessly from where the existing output ends, keeping its voice, \
         tense and formatting.\n\
         4. Do not add any preamble, explanation or closing remarks.\n\
         \n\
         ===== ORIGINAL TASK =====\n\
         {}\n\
         ===== END ORIGINAL TASK =====\n\
         \n\
         ===== ALREADY OUTPUT (DO NOT REPEAT) =====\n\
         {}\n\
         ===== END ALREADY OUTPUT =====",
        original_task, existing_output
    )
}
