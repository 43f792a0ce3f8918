use crate::error::Result;
use crate::rules::ChangelogRules;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const LOCAL_CONFIG: &str = "./tagbump.toml";
const USER_CONFIG: &str = ".tagbump.toml";

/// Represents the complete configuration for git-tag-bump.
///
/// Contains the tag naming convention, branch roles, custom release rules and
/// the changelog rule table they are merged into.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    #[serde(default)]
    pub fetch_all_tags: bool,

    #[serde(default = "default_release_branches")]
    pub release_branches: String,

    #[serde(default)]
    pub pre_release_branches: String,

    #[serde(default)]
    pub prerelease_identifier: Option<String>,

    #[serde(default)]
    pub custom_release_rules: Option<String>,

    #[serde(default)]
    pub scopes: Vec<String>,

    #[serde(default)]
    pub changelog_rules: ChangelogRules,
}

/// Returns the default tag prefix.
fn default_tag_prefix() -> String {
    "v".to_string()
}

/// Returns the default comma-separated list of release branch patterns.
fn default_release_branches() -> String {
    "master,main".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tag_prefix: default_tag_prefix(),
            fetch_all_tags: false,
            release_branches: default_release_branches(),
            pre_release_branches: String::new(),
            prerelease_identifier: None,
            custom_release_rules: None,
            scopes: Vec::new(),
            changelog_rules: ChangelogRules::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `tagbump.toml` in current directory
/// 3. `.tagbump.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(LOCAL_CONFIG).exists() {
        fs::read_to_string(LOCAL_CONFIG)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            tracing::debug!("No configuration file found, using defaults");
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
