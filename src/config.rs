use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::tags::filter::RegexFilter;
use crate::tags::plan::PlanOptions;
use crate::tags::{SpecificityOrder, TagResolver, VersionParser};

/// Name of the config file looked up in the config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Run configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RunConfig {
    /// Literal text every version tag starts with (e.g. `v`)
    pub prefix: String,
    /// Literal text every version tag ends with (e.g. `-alpine`)
    pub suffix: String,
    /// Only tags matching this regex are considered
    pub filter: Option<String>,
    /// Tags matching this regex are ignored
    pub exclude: Option<String>,
    /// Prefer more specific versions (`1.2.3.4` over `1.2.3`) for the same prefix
    pub inverse_specificity_order: bool,
    /// Regexes removed from the trailing text before grouping
    pub cleanup_patterns: Vec<String>,
    pub only_new_tags: bool,
    pub update_latest: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {field} pattern '{pattern}': {source}")]
    InvalidPattern {
        field: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

impl RunConfig {
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn specificity_order(&self) -> SpecificityOrder {
        SpecificityOrder::from_inverse_flag(self.inverse_specificity_order)
    }

    pub fn plan_options(&self) -> PlanOptions {
        PlanOptions {
            order: self.specificity_order(),
            only_new_tags: self.only_new_tags,
            update_latest: self.update_latest,
        }
    }

    /// Compile the patterns and assemble a resolver for this run.
    pub fn build_resolver(&self) -> Result<TagResolver<RegexFilter>, ConfigError> {
        let include = self
            .filter
            .as_deref()
            .map(|p| compile("filter", p))
            .transpose()?;
        let exclude = self
            .exclude
            .as_deref()
            .map(|p| compile("exclude", p))
            .transpose()?;
        let cleanup_patterns = self
            .cleanup_patterns
            .iter()
            .map(|p| compile("cleanup", p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TagResolver::new(VersionParser::new(&self.prefix, &self.suffix))
            .with_filter(RegexFilter::new(include, exclude))
            .with_order(self.specificity_order())
            .with_cleanup_patterns(cleanup_patterns))
    }
}

fn compile(field: &'static str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        field,
        pattern: pattern.to_string(),
        source,
    })
}

/// Returns the path to the config directory for docker-tag-enhancer.
/// Uses $XDG_CONFIG_HOME/docker-tag-enhancer if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/docker-tag-enhancer,
/// or ./docker-tag-enhancer if neither is available.
pub fn config_dir() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the default config file.
pub fn default_config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("docker-tag-enhancer")
}
