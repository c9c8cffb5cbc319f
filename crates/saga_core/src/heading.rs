//! Bracket-delimited structural headings.

use serde::{Deserialize, Serialize};

/// Opening glyph of every structural heading.
pub const HEADING_OPEN: char = '【';

/// Closing glyph of every structural heading.
pub const HEADING_CLOSE: char = '】';

/// A structural label such as `【Plot Summary】`, stored without its brackets.
///
/// Two headings denote the same section when their [`normalized`](Heading::normalized)
/// forms are equal. Derived equality compares the literal spelling.
///
/// # Examples
///
/// ```
/// use saga_core::Heading;
///
/// let heading = Heading::from("  Plot   Summary ");
/// assert_eq!(heading.normalized(), "plot summary");
/// assert_eq!(heading.bracketed(), "【  Plot   Summary 】");
/// assert!(heading.same_section(&Heading::from("PLOT SUMMARY")));
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct Heading(String);

impl Heading {
    /// Create a heading from its label text.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The literal label, without brackets.
    pub fn label(&self) -> &str {
        &self.0
    }

    /// Identity key: whitespace collapsed, lowercased.
    pub fn normalized(&self) -> String {
        normalize_label(&self.0)
    }

    /// The label wrapped in heading glyphs.
    pub fn bracketed(&self) -> String {
        format!("{}{}{}", HEADING_OPEN, self.0, HEADING_CLOSE)
    }

    /// Whether both headings name the same section.
    pub fn same_section(&self, other: &Heading) -> bool {
        self.normalized() == other.normalized()
    }
}

impl From<&str> for Heading {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

impl AsRef<str> for Heading {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Collapse runs of whitespace to a single space, trim, and lowercase.
pub fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
