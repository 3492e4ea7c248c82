//! Ordered rule tables
//!
//! A rule pairs a platform predicate with an artifact resolver. A table is
//! evaluated top-down and the first matching rule produces the artifact.
//! Table order is part of the data: when two rules could match the same
//! descriptor, the earlier one wins.

mod matcher;

use anyhow::Result;
use log::debug;

use crate::artifact::{ArtifactDescriptor, ArtifactResolver};
use crate::platform::PlatformDescriptor;

pub use matcher::PlatformMatch;

/// One predicate/resolver pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformMatchRule {
    pub matcher: PlatformMatch,
    pub resolver: ArtifactResolver,
}

impl PlatformMatchRule {
    pub fn new(matcher: PlatformMatch, resolver: ArtifactResolver) -> Self {
        Self { matcher, resolver }
    }
}

/// An ordered, immutable rule table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlatformMatchRules {
    rules: Vec<PlatformMatchRule>,
}

impl PlatformMatchRules {
    pub fn new(rules: Vec<PlatformMatchRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[PlatformMatchRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolve the artifact of the first rule matching `descriptor`.
    ///
    /// Returns `Ok(None)` when the table has no rule for the descriptor.
    #[tracing::instrument(skip(self, descriptor), fields(descriptor = %descriptor))]
    pub fn resolve(&self, descriptor: &PlatformDescriptor) -> Result<Option<ArtifactDescriptor>> {
        let Some((index, rule)) = self
            .rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matcher.matches(descriptor))
        else {
            debug!("No rule matches");
            return Ok(None);
        };

        debug!("Rule #{} matches", index);
        rule.resolver.resolve(descriptor).map(Some)
    }
}
