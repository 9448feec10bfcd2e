//! Inclusion filters applied to parsed tags

#[cfg(test)]
use mockall::automock;

use regex::Regex;

/// Trait deciding whether a parsed tag takes part in resolution
#[cfg_attr(test, automock)]
pub trait TagFilter: Send + Sync {
    /// `tag` is the canonical tag text (prefix and suffix included)
    fn accepts(&self, tag: &str) -> bool;
}

/// Filter that accepts every tag
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl TagFilter for AcceptAll {
    fn accepts(&self, _tag: &str) -> bool {
        true
    }
}

impl<F> TagFilter for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn accepts(&self, tag: &str) -> bool {
        self(tag)
    }
}

/// Include/exclude regex filter.
///
/// A tag is accepted when it matches `include` (if set) and does not match
/// `exclude` (if set). Both are unanchored searches. `exclude` stands in for
/// negative look-ahead, which the regex engine does not support:
/// `^((?!-rc).)*$` becomes `exclude = "-rc"`.
#[derive(Debug, Clone, Default)]
pub struct RegexFilter {
    include: Option<Regex>,
    exclude: Option<Regex>,
}

impl RegexFilter {
    pub fn new(include: Option<Regex>, exclude: Option<Regex>) -> Self {
        Self { include, exclude }
    }
}

impl TagFilter for RegexFilter {
    fn accepts(&self, tag: &str) -> bool {
        self.include.as_ref().is_none_or(|re| re.is_match(tag))
            && !self.exclude.as_ref().is_some_and(|re| re.is_match(tag))
    }
}
