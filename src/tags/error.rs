use thiserror::Error;

/// Reasons a raw tag is not a version.
///
/// Expected for tags like `latest` or `edge`; callers drop the tag and move on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("Empty tag")]
    Empty,

    #[error("Tag '{tag}' does not start with prefix '{prefix}'")]
    MissingPrefix { tag: String, prefix: String },

    #[error("Tag '{tag}' does not end with suffix '{suffix}'")]
    MissingSuffix { tag: String, suffix: String },

    #[error("Not a version: {0}")]
    InvalidVersion(String),

    #[error("Version number out of range in '{0}'")]
    ComponentOverflow(String),
}

/// Faults raised while ordering or aggregating identifiers.
///
/// Both variants indicate a logic bug upstream (wrong partitioning), not bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Cannot compare versions {left} and {right}")]
    IncompatibleVersions { left: String, right: String },

    #[error("No versions left for tag key '{key}'")]
    EmptyGroup { key: String },
}
