//! Aggregation keys (floating tag names) derived from an identifier

use crate::tags::identifier::VersionId;

/// Key for the first `depth` components of `version`.
///
/// `prefix + components[..depth] + ("-ce" if CE) + rest + suffix`, e.g.
/// `v14.10-alpine` for `v14.10.2-alpine` at depth 2.
pub fn key_at(version: &VersionId, depth: usize) -> String {
    format!(
        "{}{}{}{}{}",
        version.prefix(),
        version.joined_components(depth),
        if version.has_community_edition() {
            "-ce"
        } else {
            ""
        },
        version.rest().unwrap_or(""),
        version.suffix()
    )
}

/// One key per truncation depth `1..=n`, least specific first.
pub fn derive_keys(version: &VersionId) -> Vec<String> {
    (1..=version.specificity())
        .map(|depth| key_at(version, depth))
        .collect()
}
