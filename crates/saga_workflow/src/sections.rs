//! Section contract validation.
//!
//! Generated text marks its structure with bracketed headings such as
//! `【Plot Summary】`. A phase's contract is a list of [`SectionRequirement`]s,
//! each satisfied when its name or one of its aliases appears as a heading.

use saga_core::{Heading, SectionRequirement};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;

pub(crate) static HEADING_PATTERN: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"【([^【】\r\n]+)】").expect("heading pattern is valid")
});

/// Outcome of checking text against a list of requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionValidation {
    /// True when every requirement is satisfied.
    pub ok: bool,
    /// Literal names of unsatisfied requirements, in requirement order.
    pub missing: Vec<Heading>,
    /// Every heading extracted from the text.
    pub found: Vec<Heading>,
}

/// Extract every bracketed heading from `text`.
///
/// Headings are returned in order of first appearance, deduplicated by
/// normalized identity; the first literal spelling wins. Labels are trimmed
/// and blank labels are ignored.
///
/// # Examples
///
/// ```
/// use saga_workflow::extract_headings;
///
/// let text = "【Plot Summary】\n...\n【Characters】\n...\n【plot  summary】";
/// let headings = extract_headings(text);
/// let labels: Vec<&str> = headings.iter().map(|h| h.label()).collect();
/// assert_eq!(labels, ["Plot Summary", "Characters"]);
/// ```
pub fn extract_headings(text: &str) -> Vec<Heading> {
    let mut seen = HashSet::new();
    let mut headings = Vec::new();

    for captures in HEADING_PATTERN.captures_iter(text) {
        let label = captures[1].trim();
        if label.is_empty() {
            continue;
        }
        let heading = Heading::from(label);
        if seen.insert(heading.normalized()) {
            headings.push(heading);
        }
    }

    headings
}

/// Check `text` against `requirements`.
///
/// Heading order in the text is irrelevant. With no requirements the result
/// is always `ok`.
///
/// # Examples
///
/// ```
/// use saga_core::SectionRequirement;
/// use saga_workflow::validate_required_sections;
///
/// let requirements = vec![
///     SectionRequirement::new("Characters").with_alias("Cast"),
///     SectionRequirement::new("Open Threads"),
/// ];
///
/// let result = validate_required_sections("【Cast】 Ada, Brin", &requirements);
/// assert!(!result.ok);
/// assert_eq!(result.missing.len(), 1);
/// assert_eq!(result.missing[0].label(), "Open Threads");
/// ```
pub fn validate_required_sections(
    text: &str,
    requirements: &[SectionRequirement],
) -> SectionValidation {
    let found = extract_headings(text);
    if requirements.is_empty() {
        return SectionValidation {
            ok: true,
            missing: Vec::new(),
            found,
        };
    }

    let normalized: HashSet<String> = found.iter().map(Heading::normalized).collect();
    let missing: Vec<Heading> = requirements
        .iter()
        .filter(|requirement| !requirement.is_satisfied_by(&normalized))
        .map(|requirement| requirement.name().clone())
        .collect();

    SectionValidation {
        ok: missing.is_empty(),
        missing,
        found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requirements() -> Vec<SectionRequirement> {
        vec![
            SectionRequirement::new("Plot Summary"),
            SectionRequirement::new("Characters").with_alias("Cast"),
            SectionRequirement::new("Open Threads"),
        ]
    }

    #[test]
    fn test_all_present_in_any_order() {
        let text = "【Open Threads】\nx\n【Characters】\ny\n【Plot Summary】\nz";
        let result = validate_required_sections(text, &requirements());
        assert!(result.ok);
        assert!(result.missing.is_empty());
        assert_eq!(result.found.len(), 3);
    }

    #[test]
    fn test_missing_reported_in_requirement_order() {
        let result = validate_required_sections("【Cast】 only", &requirements());
        assert!(!result.ok);
        let missing: Vec<&str> = result.missing.iter().map(|h| h.label()).collect();
        assert_eq!(missing, ["Plot Summary", "Open Threads"]);
    }

    #[test]
    fn test_heading_free_text_misses_everything() {
        let result = validate_required_sections("plain prose, no structure", &requirements());
        assert_eq!(result.missing.len(), 3);
        assert!(result.found.is_empty());
    }

    #[test]
    fn test_empty_requirements_always_ok() {
        let result = validate_required_sections("【Anything】", &[]);
        assert!(result.ok);
        assert_eq!(result.found, vec![Heading::from("Anything")]);
    }

    #[test]
    fn test_normalization_ignores_case_and_spacing() {
        let result = validate_required_sections(
            "【 PLOT   summary 】【characters】【open threads】",
            &requirements(),
        );
        assert!(result.ok);
    }

    #[test]
    fn test_blank_and_multiline_labels_are_not_headings() {
        let headings = extract_headings("【 】 and 【broken\nlabel】 and 【Real】");
        assert_eq!(headings, vec![Heading::from("Real")]);
    }

    #[test]
    fn test_first_spelling_wins() {
        let headings = extract_headings("【Open Threads】【OPEN THREADS】");
        assert_eq!(headings, vec![Heading::from("Open Threads")]);
    }
}
