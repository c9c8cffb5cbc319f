//! Generation phase identifiers.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Opaque identifier of a generation phase (e.g. `analysisRaw`).
///
/// Well-known phases are exposed as associated constants; any other string is
/// a valid key that simply carries no section contract.
///
/// # Examples
///
/// ```
/// use saga_core::PromptPhaseKey;
///
/// let key = PromptPhaseKey::from("analysisRaw");
/// assert_eq!(key, PromptPhaseKey::ANALYSIS_RAW);
/// assert_eq!(key.to_string(), "analysisRaw");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct PromptPhaseKey(Cow<'static, str>);

impl PromptPhaseKey {
    /// Compress prior chapters into working context.
    pub const CONTEXT_COMPRESSION: Self = Self::from_static("contextCompression");
    /// Phase-1 analysis, full output.
    pub const ANALYSIS_RAW: Self = Self::from_static("analysisRaw");
    /// Phase-1 analysis, compressed for downstream prompts.
    pub const ANALYSIS_COMPRESSED: Self = Self::from_static("analysisCompressed");
    /// First half of the outline, full output.
    pub const CHAPTER1_RAW: Self = Self::from_static("chapter1Raw");
    /// First half of the outline, compressed.
    pub const CHAPTER1_COMPRESSED: Self = Self::from_static("chapter1Compressed");
    /// Second half of the outline, full output.
    pub const CHAPTER2_RAW: Self = Self::from_static("chapter2Raw");
    /// Second half of the outline, compressed.
    pub const CHAPTER2_COMPRESSED: Self = Self::from_static("chapter2Compressed");
    /// Breakdown overview and writing rules.
    pub const BREAKDOWN_META: Self = Self::from_static("breakdownMeta");
    /// One chunk of the chapter table.
    pub const BREAKDOWN_CHUNK: Self = Self::from_static("breakdownChunk");
    /// Chapter prose.
    pub const CHAPTER_GENERATION: Self = Self::from_static("chapterGeneration");

    /// Every well-known phase.
    pub const WELL_KNOWN: [Self; 10] = [
        Self::CONTEXT_COMPRESSION,
        Self::ANALYSIS_RAW,
        Self::ANALYSIS_COMPRESSED,
        Self::CHAPTER1_RAW,
        Self::CHAPTER1_COMPRESSED,
        Self::CHAPTER2_RAW,
        Self::CHAPTER2_COMPRESSED,
        Self::BREAKDOWN_META,
        Self::BREAKDOWN_CHUNK,
        Self::CHAPTER_GENERATION,
    ];

    /// Key for `key`, folding ASCII case onto a well-known phase when one matches.
    ///
    /// Configuration layers may lowercase table keys, so `analysisraw` resolves
    /// to [`PromptPhaseKey::ANALYSIS_RAW`].
    ///
    /// ```
    /// use saga_core::PromptPhaseKey;
    ///
    /// assert_eq!(PromptPhaseKey::canonical("analysisraw"), PromptPhaseKey::ANALYSIS_RAW);
    /// assert_eq!(PromptPhaseKey::canonical("custom").as_str(), "custom");
    /// ```
    pub fn canonical(key: &str) -> Self {
        Self::WELL_KNOWN
            .iter()
            .find(|known| known.as_str().eq_ignore_ascii_case(key))
            .cloned()
            .unwrap_or_else(|| Self::from(key))
    }

    /// Key backed by a static string.
    pub const fn from_static(key: &'static str) -> Self {
        Self(Cow::Borrowed(key))
    }

    /// The key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PromptPhaseKey {
    fn from(key: &str) -> Self {
        Self(Cow::Owned(key.to_string()))
    }
}

impl From<String> for PromptPhaseKey {
    fn from(key: String) -> Self {
        Self(Cow::Owned(key))
    }
}

impl AsRef<str> for PromptPhaseKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
