//! Static mapping from generation phases to their section contracts.

use crate::breakdown::{BREAKDOWN_OVERVIEW_LABEL, BREAKDOWN_RULES_LABEL};
use saga_core::{PromptPhaseKey, SectionRequirement};
use std::collections::HashMap;
use tracing::debug;

/// Section contracts keyed by phase.
///
/// Phases without an entry are exempt from validation and retry.
///
/// # Examples
///
/// ```
/// use saga_core::PromptPhaseKey;
/// use saga_workflow::RequirementCatalog;
///
/// let catalog = RequirementCatalog::builtin();
/// assert!(catalog.is_enforced(&PromptPhaseKey::ANALYSIS_RAW));
/// assert!(!catalog.is_enforced(&PromptPhaseKey::CHAPTER_GENERATION));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequirementCatalog {
    entries: HashMap<PromptPhaseKey, Vec<SectionRequirement>>,
}

impl RequirementCatalog {
    /// A catalog with no enforced phases.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The contracts shipped with the workflow.
    pub fn builtin() -> Self {
        let analysis_full = vec![
            SectionRequirement::new("Plot Summary").with_alias("Story So Far"),
            SectionRequirement::new("Characters").with_alias("Cast"),
            SectionRequirement::new("Worldbuilding").with_alias("Setting"),
            SectionRequirement::new("Writing Style").with_alias("Style"),
            SectionRequirement::new("Open Threads").with_alias("Foreshadowing"),
        ];
        let analysis_compressed = vec![
            SectionRequirement::new("Plot Summary").with_alias("Story So Far"),
            SectionRequirement::new("Characters").with_alias("Cast"),
            SectionRequirement::new("Open Threads").with_alias("Foreshadowing"),
        ];
        let outline_first = vec![
            SectionRequirement::new("Arc Overview"),
            SectionRequirement::new("Key Events").with_alias("Major Events"),
            SectionRequirement::new("Character Development").with_alias("Character Arcs"),
        ];
        let outline_second = vec![
            SectionRequirement::new("Climax"),
            SectionRequirement::new("Resolution").with_alias("Ending"),
            SectionRequirement::new("Foreshadowing Payoffs").with_alias("Payoffs"),
        ];
        let breakdown_meta = vec![
            SectionRequirement::new(BREAKDOWN_OVERVIEW_LABEL),
            SectionRequirement::new(BREAKDOWN_RULES_LABEL),
        ];

        Self::empty()
            .with_phase(PromptPhaseKey::ANALYSIS_RAW, analysis_full)
            .with_phase(PromptPhaseKey::ANALYSIS_COMPRESSED, analysis_compressed)
            .with_phase(PromptPhaseKey::CHAPTER1_RAW, outline_first.clone())
            .with_phase(PromptPhaseKey::CHAPTER1_COMPRESSED, outline_first)
            .with_phase(PromptPhaseKey::CHAPTER2_RAW, outline_second.clone())
            .with_phase(PromptPhaseKey::CHAPTER2_COMPRESSED, outline_second)
            .with_phase(PromptPhaseKey::BREAKDOWN_META, breakdown_meta)
    }

    /// Set the contract for a phase. An empty list exempts the phase.
    pub fn with_phase(
        mut self,
        phase: PromptPhaseKey,
        requirements: Vec<SectionRequirement>,
    ) -> Self {
        if requirements.is_empty() {
            self.entries.remove(&phase);
        } else {
            self.entries.insert(phase, requirements);
        }
        self
    }

    /// Apply configured overrides on top of this catalog.
    pub fn with_overrides(
        self,
        overrides: &HashMap<String, Vec<SectionRequirement>>,
    ) -> Self {
        overrides.iter().fold(self, |catalog, (phase, requirements)| {
            debug!(
                phase = %phase,
                requirement_count = requirements.len(),
                "Applying section override"
            );
            catalog.with_phase(PromptPhaseKey::canonical(phase), requirements.clone())
        })
    }

    /// Requirements for `phase`, if it is enforced.
    pub fn requirements(&self, phase: &PromptPhaseKey) -> Option<&[SectionRequirement]> {
        self.entries.get(phase).map(Vec::as_slice)
    }

    /// Whether `phase` has a section contract.
    pub fn is_enforced(&self, phase: &PromptPhaseKey) -> bool {
        self.entries.contains_key(phase)
    }

    /// Enforced phase keys, sorted.
    pub fn phases(&self) -> Vec<&PromptPhaseKey> {
        let mut phases: Vec<_> = self.entries.keys().collect();
        phases.sort();
        phases
    }
}
