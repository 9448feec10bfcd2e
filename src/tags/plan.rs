//! Copy plan for mirroring resolved tags to a destination repository
//!
//! The plan lists concrete tags first (oldest to newest), then floating tags,
//! then `latest`. Executing it is up to the caller (e.g. `skopeo copy`).

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::tags::compare::{SpecificityOrder, release_order};
use crate::tags::identifier::VersionId;
use crate::tags::parser::VersionParser;
use crate::tags::resolve::Resolution;

/// Alias pointed at the newest accepted version when `update_latest` is set
pub const LATEST_TAG: &str = "latest";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlanOptions {
    pub order: SpecificityOrder,
    /// Skip targets already present at the destination
    pub only_new_tags: bool,
    /// Also point `latest` at the newest accepted version
    pub update_latest: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyTask {
    pub source: String,
    pub target: String,
}

impl CopyTask {
    fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// True when the source tag is copied under its own name
    pub fn is_verbatim(&self) -> bool {
        self.source == self.target
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MirrorPlan {
    pub tasks: Vec<CopyTask>,
    pub latest: Option<String>,
}

/// Accepted versions sorted oldest to newest across all classes.
pub fn sort_concrete(concrete: &[VersionId], order: SpecificityOrder) -> Vec<&VersionId> {
    let mut sorted: Vec<&VersionId> = concrete.iter().collect();
    sorted.sort_by(|a, b| release_order(Some(a), Some(b), order));
    sorted
}

/// Floating tag keys sorted by the version they spell; keys that do not
/// parse sort first.
pub fn sort_floating_keys<'a>(
    resolution: &'a Resolution,
    parser: &VersionParser,
    order: SpecificityOrder,
) -> Vec<&'a str> {
    let mut keyed: Vec<(&str, Option<VersionId>)> = resolution
        .floating
        .keys()
        .map(|key| (key.as_str(), parser.parse(key).ok()))
        .collect();
    keyed.sort_by(|(_, a), (_, b)| release_order(a.as_ref(), b.as_ref(), order));
    keyed.into_iter().map(|(key, _)| key).collect()
}

/// Newest accepted version; the last one wins among equals.
pub fn latest_version(concrete: &[VersionId], order: SpecificityOrder) -> Option<&VersionId> {
    concrete
        .iter()
        .max_by(|a, b| release_order(Some(a), Some(b), order))
}

/// Build the ordered list of copies for `resolution`.
pub fn plan_mirror(
    resolution: &Resolution,
    parser: &VersionParser,
    destination_tags: &[String],
    options: PlanOptions,
) -> MirrorPlan {
    let existing: HashSet<&str> = destination_tags.iter().map(String::as_str).collect();
    let wanted = |task: &CopyTask| {
        let keep = !options.only_new_tags || !existing.contains(task.target.as_str());
        if !keep {
            debug!("Tag '{}' already exists at destination", task.target);
        }
        keep
    };

    let concrete = sort_concrete(&resolution.concrete, options.order)
        .into_iter()
        .map(|version| {
            let tag = version.to_string();
            CopyTask::new(tag.clone(), tag)
        });
    let floating = sort_floating_keys(resolution, parser, options.order)
        .into_iter()
        .map(|key| CopyTask::new(resolution.floating[key].clone(), key));

    let latest = options
        .update_latest
        .then(|| latest_version(&resolution.concrete, options.order))
        .flatten()
        .map(ToString::to_string);
    let latest_task = latest.iter().map(|tag| CopyTask::new(tag.clone(), LATEST_TAG));

    let tasks = concrete
        .chain(floating)
        .chain(latest_task)
        .filter(|task| wanted(task))
        .collect();

    MirrorPlan { tasks, latest }
}
