//! Structured version identifier parsed from an image tag

use std::fmt;

/// A parsed version tag such as `v14.10.2-rc1.ce.3-alpine`.
///
/// The numeric core is an arbitrary-length list (`14.10.2`, `2.7.14.10.3`, ...).
/// Instances only come out of [`VersionParser`](crate::tags::parser::VersionParser),
/// so every identifier corresponds to a string that matched the grammar exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionId {
    components: Vec<u64>,
    release_candidate: Option<u64>,
    community_edition: Option<u64>,
    rest: Option<String>,
    prefix: String,
    suffix: String,
}

/// The partition within which identifiers are mutually comparable:
/// same trailing text and same community-edition presence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassKey {
    pub rest: Option<String>,
    pub has_ce: bool,
}

impl VersionId {
    pub(crate) fn new(
        components: Vec<u64>,
        release_candidate: Option<u64>,
        community_edition: Option<u64>,
        rest: Option<String>,
        prefix: &str,
        suffix: &str,
    ) -> Self {
        debug_assert!(!components.is_empty());
        Self {
            components,
            release_candidate,
            community_edition,
            rest,
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        }
    }

    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// Number of numeric components; fewer means less specific.
    pub fn specificity(&self) -> usize {
        self.components.len()
    }

    pub fn release_candidate(&self) -> Option<u64> {
        self.release_candidate
    }

    pub fn community_edition(&self) -> Option<u64> {
        self.community_edition
    }

    pub fn has_community_edition(&self) -> bool {
        self.community_edition.is_some()
    }

    pub fn rest(&self) -> Option<&str> {
        self.rest.as_deref()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn class_key(&self) -> ClassKey {
        ClassKey {
            rest: self.rest.clone(),
            has_ce: self.has_community_edition(),
        }
    }

    /// Copy of this identifier with `rest` replaced; empty text becomes `None`.
    ///
    /// Used to build grouping views once build metadata has been stripped.
    pub fn with_rest(&self, rest: Option<String>) -> Self {
        Self {
            rest: rest.filter(|r| !r.is_empty()),
            ..self.clone()
        }
    }

    /// Components joined with `.`, truncated to the first `depth` entries.
    pub(crate) fn joined_components(&self, depth: usize) -> String {
        self.components[..depth.min(self.components.len())]
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.prefix,
            self.joined_components(self.components.len())
        )?;
        match (self.release_candidate, self.community_edition) {
            (Some(rc), Some(ce)) => write!(f, "-rc{}.ce.{}", rc, ce)?,
            (Some(rc), None) => write!(f, "-rc{}", rc)?,
            (None, Some(ce)) => write!(f, "-ce.{}", ce)?,
            (None, None) => {}
        }
        write!(f, "{}{}", self.rest.as_deref().unwrap_or(""), self.suffix)
    }
}
