//! Floating tag resolution over a raw tag list
//!
//! Parses tags, filters them, partitions them by comparability class and
//! aggregates every class into `key -> tag` entries.

use std::collections::HashSet;

use indexmap::IndexMap;
use indexmap::map::Entry;
use regex::Regex;
use tracing::{debug, info};

use crate::tags::aggregate::{Candidate, aggregate};
use crate::tags::compare::SpecificityOrder;
use crate::tags::error::VersionError;
use crate::tags::filter::{AcceptAll, TagFilter};
use crate::tags::identifier::{ClassKey, VersionId};
use crate::tags::parser::VersionParser;

/// Result of a resolution run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    /// Floating tag -> concrete tag it should point to
    pub floating: IndexMap<String, String>,
    /// Accepted concrete versions, in input order
    pub concrete: Vec<VersionId>,
}

impl Resolution {
    pub fn concrete_tags(&self) -> Vec<String> {
        self.concrete.iter().map(ToString::to_string).collect()
    }
}

pub struct TagResolver<F = AcceptAll> {
    parser: VersionParser,
    filter: F,
    order: SpecificityOrder,
    cleanup_patterns: Vec<Regex>,
}

impl TagResolver<AcceptAll> {
    pub fn new(parser: VersionParser) -> Self {
        Self {
            parser,
            filter: AcceptAll,
            order: SpecificityOrder::default(),
            cleanup_patterns: Vec::new(),
        }
    }
}

impl<F: TagFilter> TagResolver<F> {
    pub fn with_filter<G: TagFilter>(self, filter: G) -> TagResolver<G> {
        TagResolver {
            parser: self.parser,
            filter,
            order: self.order,
            cleanup_patterns: self.cleanup_patterns,
        }
    }

    pub fn with_order(mut self, order: SpecificityOrder) -> Self {
        self.order = order;
        self
    }

    /// Patterns removed from the trailing text before grouping,
    /// e.g. `-\d{14}-[0-9a-f]{7}` for timestamp + commit hash build suffixes.
    ///
    /// Builds that only differ in the removed text compare equal and the first
    /// one seen wins, so pass tags newest first to point aliases at the newest build.
    pub fn with_cleanup_patterns(mut self, patterns: Vec<Regex>) -> Self {
        self.cleanup_patterns = patterns;
        self
    }

    pub fn parser(&self) -> &VersionParser {
        &self.parser
    }

    pub fn order(&self) -> SpecificityOrder {
        self.order
    }

    /// Compute the floating tag map for `tags`.
    ///
    /// Tags that are not versions are skipped. Keys that name one of the
    /// accepted concrete tags are left out so an alias never replaces a real version.
    ///
    /// # Errors
    /// [`VersionError::IncompatibleVersions`] when two comparability classes
    /// spell the same key (e.g. `1.0-ce-x` and `1.0-ce.2-x` both give `1-ce-x`).
    /// Abort the run.
    pub fn resolve<I, S>(&self, tags: I) -> Result<Resolution, VersionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut concrete = Vec::new();
        let mut skipped = 0usize;
        for tag in tags {
            let tag = tag.as_ref();
            match self.parser.parse(tag) {
                Ok(version) if self.filter.accepts(&version.to_string()) => {
                    concrete.push(version)
                }
                Ok(_) => debug!("Tag '{}' excluded by filter", tag),
                Err(e) => {
                    debug!("Skipping tag: {}", e);
                    skipped += 1;
                }
            }
        }

        let mut classes: IndexMap<ClassKey, Vec<Candidate>> = IndexMap::new();
        for version in &concrete {
            let view = self.grouping_view(version);
            classes
                .entry(view.class_key())
                .or_default()
                .push(Candidate::with_view(version.to_string(), view));
        }

        let concrete_tags: HashSet<String> = concrete.iter().map(ToString::to_string).collect();
        let mut floating = IndexMap::new();
        for members in classes.values() {
            for (key, tag) in aggregate(members, self.order)? {
                if concrete_tags.contains(&key) {
                    continue;
                }
                match floating.entry(key) {
                    Entry::Vacant(entry) => {
                        entry.insert(tag);
                    }
                    Entry::Occupied(entry) => {
                        return Err(VersionError::IncompatibleVersions {
                            left: entry.get().clone(),
                            right: tag,
                        });
                    }
                }
            }
        }

        info!(
            "Resolved {} floating tags from {} versions in {} classes ({} tags are not versions)",
            floating.len(),
            concrete.len(),
            classes.len(),
            skipped
        );

        Ok(Resolution { floating, concrete })
    }

    /// Identifier used for grouping: `rest` with every cleanup pattern removed.
    fn grouping_view(&self, version: &VersionId) -> VersionId {
        if self.cleanup_patterns.is_empty() {
            return version.clone();
        }
        let rest = version.rest().map(|rest| {
            self.cleanup_patterns
                .iter()
                .fold(rest.to_string(), |text, re| re.replace_all(&text, "").into_owned())
        });
        version.with_rest(rest)
    }
}
