//! Version tag parser
//!
//! Accepts tags of the form `<prefix><core><suffix>` where the core is:
//! - one or more dot-separated numbers without leading zeros: `14`, `14.10.2`, `2.7.14.10.3`
//! - an optional modifier: `-rc1`, `-ce.5` or `-rc1.ce.5` (never `-ce.5-rc1`)
//! - optional trailing text starting with a separator: `-alpine`, `_slim`

use regex::Regex;

use crate::tags::error::ParseFailure;
use crate::tags::identifier::VersionId;

pub struct VersionParser {
    prefix: String,
    suffix: String,
    /// Regex for the version core between prefix and suffix
    core_re: Regex,
    /// Regex for a malformed modifier right after the numbers: CE before RC, or leading zeros
    misplaced_modifier_re: Regex,
}

impl VersionParser {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
            core_re: Regex::new(
                r"^(?P<parts>(?:0|[1-9][0-9]*)(?:\.(?:0|[1-9][0-9]*))*)(?:-(?:(?:rc(?P<rc>0|[1-9][0-9]*)\.)?ce\.(?P<ce>0|[1-9][0-9]*)|rc(?P<rc_only>0|[1-9][0-9]*)))?(?P<rest>[^0-9A-Za-z.].*)?$",
            )
            .unwrap(),
            misplaced_modifier_re: Regex::new(
                r"^-(?:ce\.(?:0|[1-9][0-9]*)[-.]rc[0-9]|rc0[0-9]|ce\.0[0-9]|rc(?:0|[1-9][0-9]*)\.ce\.0[0-9])",
            )
            .unwrap(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Parse a raw tag into a [`VersionId`].
    ///
    /// The prefix and suffix are mandatory when configured (non-empty).
    pub fn parse(&self, tag: &str) -> Result<VersionId, ParseFailure> {
        if tag.is_empty() {
            return Err(ParseFailure::Empty);
        }

        let without_prefix = tag.strip_prefix(self.prefix.as_str()).ok_or_else(|| {
            ParseFailure::MissingPrefix {
                tag: tag.to_string(),
                prefix: self.prefix.clone(),
            }
        })?;
        let core = without_prefix
            .strip_suffix(self.suffix.as_str())
            .ok_or_else(|| ParseFailure::MissingSuffix {
                tag: tag.to_string(),
                suffix: self.suffix.clone(),
            })?;

        let caps = self
            .core_re
            .captures(core)
            .ok_or_else(|| ParseFailure::InvalidVersion(tag.to_string()))?;

        let parts = &caps["parts"];
        if self.misplaced_modifier_re.is_match(&core[parts.len()..]) {
            return Err(ParseFailure::InvalidVersion(tag.to_string()));
        }
        let rest = caps.name("rest").map(|m| m.as_str().to_string());

        let number = |text: &str| {
            text.parse::<u64>()
                .map_err(|_| ParseFailure::ComponentOverflow(tag.to_string()))
        };

        let components = parts
            .split('.')
            .map(number)
            .collect::<Result<Vec<_>, _>>()?;
        let release_candidate = caps
            .name("rc")
            .or_else(|| caps.name("rc_only"))
            .map(|m| number(m.as_str()))
            .transpose()?;
        let community_edition = caps
            .name("ce")
            .map(|m| number(m.as_str()))
            .transpose()?;

        Ok(VersionId::new(
            components,
            release_candidate,
            community_edition,
            rest,
            &self.prefix,
            &self.suffix,
        ))
    }
}

impl Default for VersionParser {
    fn default() -> Self {
        Self::new("", "")
    }
}
