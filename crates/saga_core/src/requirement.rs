//! Section requirements for phase contracts.

use crate::Heading;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A heading a generation phase must produce, under its canonical name or an alias.
///
/// # Examples
///
/// ```
/// use saga_core::{Heading, SectionRequirementBuilder};
///
/// let requirement = SectionRequirementBuilder::default()
///     .name("Characters")
///     .aliases(vec![Heading::from("Cast")])
///     .build()
///     .unwrap();
///
/// assert_eq!(requirement.name().label(), "Characters");
/// assert_eq!(requirement.aliases().len(), 1);
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(
    setter(into),
    build_fn(validate = "Self::validate", error = "saga_error::BuilderError")
)]
pub struct SectionRequirement {
    /// Canonical heading, reported when the requirement is unsatisfied
    name: Heading,

    /// Alternative spellings that also satisfy the requirement
    #[serde(default)]
    #[builder(default)]
    aliases: Vec<Heading>,
}

impl SectionRequirement {
    /// Requirement with no aliases.
    pub fn new(name: impl Into<Heading>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
        }
    }

    /// Add an alias.
    pub fn with_alias(mut self, alias: impl Into<Heading>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// The name followed by every alias.
    pub fn candidates(&self) -> impl Iterator<Item = &Heading> {
        std::iter::once(&self.name).chain(self.aliases.iter())
    }

    /// Satisfied when the name or any alias is in the set of normalized headings.
    pub fn is_satisfied_by(&self, normalized: &HashSet<String>) -> bool {
        self.candidates()
            .any(|candidate| normalized.contains(&candidate.normalized()))
    }
}

impl SectionRequirementBuilder {
    fn validate(&self) -> Result<(), String> {
        match &self.name {
            Some(name) if name.normalized().is_empty() => {
                Err("section requirement name must not be blank".to_string())
            }
            _ => Ok(()),
        }
    }
}
