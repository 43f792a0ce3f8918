use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use git_tag_bump::analyzer::{ReleaseAnalyzer, ReleaseRequest};
use git_tag_bump::config::{self, Config};
use git_tag_bump::diagnostic::TracingSink;
use git_tag_bump::git::Git2Repository;
use git_tag_bump::ui;

const LOG_ENV: &str = "GIT_TAG_BUMP_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Toml,
}

#[derive(clap::Parser)]
#[command(
    name = "git-tag-bump",
    version,
    about = "Select release tags and build release rules from conventional commits"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short = 'C', long, default_value = ".", help = "Repository to analyze")]
    repo: String,

    #[arg(long = "ref", help = "Git ref being released (defaults to the current branch)")]
    git_ref: Option<String>,

    #[arg(long, default_value = "HEAD", help = "Last revision to include")]
    head: String,

    #[arg(long, help = "Prefix of release tags")]
    tag_prefix: Option<String>,

    #[arg(long, help = "Custom rules as type:release[:section], comma separated")]
    custom_release_rules: Option<String>,

    #[arg(long = "scope", help = "Only keep commits with this scope (repeatable)")]
    scopes: Vec<String>,

    #[arg(long, help = "Prerelease identifier to look for (e.g. beta, rc)")]
    prerelease_identifier: Option<String>,

    #[arg(long, help = "Read every tag instead of the first page")]
    fetch_all_tags: bool,

    #[arg(long, value_enum, default_value = "text", help = "Output format")]
    format: Format,

    #[arg(short, long, help = "Show debug diagnostics")]
    verbose: bool,

    #[arg(short, long, conflicts_with = "verbose", help = "Only show errors")]
    quiet: bool,
}

impl Args {
    /// Command line values take precedence over the configuration file
    fn apply_to(&self, config: &mut Config) {
        if let Some(prefix) = &self.tag_prefix {
            config.tag_prefix = prefix.clone();
        }
        if let Some(rules) = &self.custom_release_rules {
            config.custom_release_rules = Some(rules.clone());
        }
        if !self.scopes.is_empty() {
            config.scopes = self.scopes.clone();
        }
        if let Some(identifier) = &self.prerelease_identifier {
            config.prerelease_identifier = Some(identifier.clone());
        }
        if self.fetch_all_tags {
            config.fetch_all_tags = true;
        }
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_tracing(args.quiet, args.verbose) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    if let Err(e) = run(&args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = config::load_config(args.config.as_deref()).context("Error loading config")?;
    args.apply_to(&mut config);

    let repo = Git2Repository::open(&args.repo)
        .with_context(|| format!("Not in a git repository: {}", args.repo))?;
    let git_ref = match &args.git_ref {
        Some(git_ref) => git_ref.clone(),
        None => repo.head_ref().context("Cannot determine the current branch")?,
    };

    let analyzer = ReleaseAnalyzer::new(config)?;
    let request = ReleaseRequest::new(git_ref, args.head.clone());
    if !args.quiet {
        ui::display_status(&format!("Analyzing {} up to {}", request.git_ref, request.head));
    }
    let plan = analyzer
        .analyze(&repo, &request, &TracingSink)
        .with_context(|| format!("Failed to analyze '{}'", request.git_ref))?;

    match args.format {
        Format::Text => {
            ui::display_plan(&plan);
            ui::display_success(&format!("Analyzed {} commits", plan.commits.len()));
        }
        Format::Toml => {
            let rendered = toml::to_string(&plan).context("Cannot render plan as TOML")?;
            print!("{}", rendered);
        }
    }

    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
