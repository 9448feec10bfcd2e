use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info};

use docker_tag_enhancer::config::{RunConfig, default_config_path};
use docker_tag_enhancer::logging;
use docker_tag_enhancer::tags::plan::{MirrorPlan, plan_mirror, sort_floating_keys};

#[derive(Parser)]
#[command(name = "docker-tag-enhancer")]
#[command(
    version,
    about = "Compute floating version tags (14, 14.10, ...) from concrete image tags"
)]
struct Cli {
    /// File with source tags, one per line (reads stdin when omitted)
    #[arg(short, long)]
    tags: Option<PathBuf>,

    /// File with tags already present at the destination, one per line
    #[arg(long)]
    dest_tags: Option<PathBuf>,

    /// JSON config file (defaults to $XDG_CONFIG_HOME/docker-tag-enhancer/config.json if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Literal prefix every version tag starts with
    #[arg(long)]
    prefix: Option<String>,

    /// Literal suffix every version tag ends with
    #[arg(long)]
    suffix: Option<String>,

    /// Only consider tags matching this regex
    #[arg(short, long)]
    filter: Option<String>,

    /// Ignore tags matching this regex
    #[arg(long)]
    exclude: Option<String>,

    /// Regex removed from the trailing text before grouping (repeatable)
    #[arg(long = "cleanup-pattern")]
    cleanup_patterns: Vec<String>,

    /// Prefer more specific versions for the same prefix (1.2.3.4 over 1.2.3)
    #[arg(long)]
    inverse_specificity_order: bool,

    /// Leave out tags already present at the destination
    #[arg(long)]
    only_new_tags: bool,

    /// Also point `latest` at the newest version
    #[arg(long)]
    update_latest: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => {
                let path = default_config_path();
                if path.is_file() {
                    debug!("Using config {:?}", path);
                    RunConfig::load(&path)?
                } else {
                    RunConfig::default()
                }
            }
        };

        if let Some(prefix) = &self.prefix {
            config.prefix = prefix.clone();
        }
        if let Some(suffix) = &self.suffix {
            config.suffix = suffix.clone();
        }
        if let Some(filter) = &self.filter {
            config.filter = Some(filter.clone());
        }
        if let Some(exclude) = &self.exclude {
            config.exclude = Some(exclude.clone());
        }
        config
            .cleanup_patterns
            .extend(self.cleanup_patterns.iter().cloned());
        config.inverse_specificity_order |= self.inverse_specificity_order;
        config.only_new_tags |= self.only_new_tags;
        config.update_latest |= self.update_latest;

        Ok(config)
    }
}

#[derive(Serialize)]
struct Output<'a> {
    floating: &'a IndexMap<String, String>,
    concrete: Vec<String>,
    plan: &'a MirrorPlan,
}

fn read_tags(path: Option<&Path>) -> anyhow::Result<Vec<String>> {
    let content = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read tags from {:?}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read tags from stdin")?;
            buf
        }
    };

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.verbose, cli.log_json);

    let config = cli.load_config()?;
    let resolver = config.build_resolver()?;

    let source_tags = read_tags(cli.tags.as_deref())?;
    let destination_tags = match cli.dest_tags.as_deref() {
        Some(path) => read_tags(Some(path))?,
        None => Vec::new(),
    };
    info!(
        "Read {} source tags and {} destination tags",
        source_tags.len(),
        destination_tags.len()
    );

    let resolution = resolver
        .resolve(&source_tags)
        .context("Tag resolution failed")?;
    let plan = plan_mirror(
        &resolution,
        resolver.parser(),
        &destination_tags,
        config.plan_options(),
    );

    if cli.json {
        let output = Output {
            floating: &resolution.floating,
            concrete: resolution.concrete_tags(),
            plan: &plan,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("New calculated tags are:");
    for key in sort_floating_keys(&resolution, resolver.parser(), resolver.order()) {
        println!("- {} \t-> {}", key, resolution.floating[key]);
    }
    if let Some(latest) = &plan.latest {
        println!("- latest \t-> {}", latest);
    }
    println!("Copy plan:");
    for task in &plan.tasks {
        println!("- {} -> {}", task.source, task.target);
    }

    Ok(())
}
