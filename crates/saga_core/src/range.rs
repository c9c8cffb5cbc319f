//! Chapter index windows for chunked breakdown generation.

use serde::{Deserialize, Serialize};

/// Inclusive, contiguous window of 1-based chapter indices.
///
/// # Examples
///
/// ```
/// use saga_core::BreakdownRange;
///
/// let range = BreakdownRange::new(6, 10);
/// assert_eq!(range.len(), 5);
/// assert!(range.contains(8));
/// assert_eq!(range.to_string(), "6-10");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[display("{}-{}", start, end)]
pub struct BreakdownRange {
    /// First chapter in the window (>= 1)
    pub start: u32,
    /// Last chapter in the window (>= start)
    pub end: u32,
}

impl BreakdownRange {
    /// Create a range, clamping `start` to at least 1 and `end` to at least `start`.
    pub fn new(start: u32, end: u32) -> Self {
        let start = start.max(1);
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Number of chapters covered.
    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    /// Always false; a range covers at least one chapter.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `chapter` falls inside the window.
    pub fn contains(&self, chapter: u32) -> bool {
        (self.start..=self.end).contains(&chapter)
    }
}
