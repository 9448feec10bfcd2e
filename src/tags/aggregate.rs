//! Reduction of identifiers into floating tag winners

use indexmap::IndexMap;
use tracing::debug;

use crate::tags::compare::{SpecificityOrder, compare};
use crate::tags::error::VersionError;
use crate::tags::identifier::VersionId;
use crate::tags::keys::key_at;

/// A concrete tag taking part in aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Identifier used for grouping and comparison
    pub version: VersionId,
    /// Tag text a floating key resolves to when this candidate wins
    pub tag: String,
}

impl Candidate {
    pub fn new(version: VersionId) -> Self {
        let tag = version.to_string();
        Self { version, tag }
    }

    /// Candidate whose grouping view differs from its tag text
    /// (e.g. build metadata stripped from `rest`).
    pub fn with_view(tag: impl Into<String>, view: VersionId) -> Self {
        Self {
            version: view,
            tag: tag.into(),
        }
    }
}

/// Group candidates under every key they contribute.
///
/// Keys are ordered by depth first (`14`, `13`, `14.10`, ...) and then by
/// first appearance. A candidate with `n` components lands in exactly `n` groups.
pub fn group_keys(members: &[Candidate]) -> IndexMap<String, Vec<&Candidate>> {
    let max_depth = members
        .iter()
        .map(|m| m.version.specificity())
        .max()
        .unwrap_or(0);

    let mut groups: IndexMap<String, Vec<&Candidate>> = IndexMap::new();
    for depth in 1..=max_depth {
        for member in members.iter().filter(|m| m.version.specificity() >= depth) {
            groups
                .entry(key_at(&member.version, depth))
                .or_default()
                .push(member);
        }
    }
    groups
}

/// Map every key emitted by `members` to the tag of its best candidate.
///
/// All members must share one comparability class; ties keep the first candidate seen.
///
/// # Errors
/// [`VersionError::IncompatibleVersions`] if the members span several classes.
pub fn aggregate(
    members: &[Candidate],
    order: SpecificityOrder,
) -> Result<IndexMap<String, String>, VersionError> {
    let mut winners = IndexMap::new();

    for (key, group) in group_keys(members) {
        let winner = max_candidate(&group, order)?
            .ok_or_else(|| VersionError::EmptyGroup { key: key.clone() })?;
        debug!(
            "Tag key '{}' resolves to '{}' ({} candidates)",
            key,
            winner.tag,
            group.len()
        );
        winners.insert(key, winner.tag.clone());
    }

    Ok(winners)
}

fn max_candidate<'a>(
    group: &[&'a Candidate],
    order: SpecificityOrder,
) -> Result<Option<&'a Candidate>, VersionError> {
    let mut best: Option<&Candidate> = None;
    for &candidate in group {
        if compare(
            Some(&candidate.version),
            best.map(|b| &b.version),
            order,
        )?
        .is_gt()
        {
            best = Some(candidate);
        }
    }
    Ok(best)
}
