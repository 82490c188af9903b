//! Application configuration
//!
//! Values come from the environment (after `.env` is loaded) and an optional
//! `.gh-pr-dashboard.toml`. Environment values override the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 3001;

/// Default listen address
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

/// Ticketing bridge: a shell command printing one work item as JSON
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct WorkItemsConfig {
    /// Command template, `{id}` is replaced with the work-item id
    pub command: String,

    /// Browser URL template, `{id}` is replaced with the work-item id
    #[serde(default)]
    pub url_template: Option<String>,
}

/// Contents of `.gh-pr-dashboard.toml`
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct FileConfig {
    pub github_token: Option<String>,
    pub repositories: Vec<String>,
    pub team_members: Vec<String>,
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    /// Fall back to `gh auth token` when no token is configured
    pub use_gh_cli: bool,
    pub work_items: Option<WorkItemsConfig>,
}

/// Effective dashboard configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub github_token: Option<String>,
    /// `owner/repo` entries
    pub repositories: Vec<String>,
    /// GitHub logins; empty means no author filter
    pub team_members: Vec<String>,
    pub port: u16,
    pub bind_address: String,
    pub use_gh_cli: bool,
    pub work_items: Option<WorkItemsConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            github_token: None,
            repositories: Vec::new(),
            team_members: Vec::new(),
            port: DEFAULT_PORT,
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            use_gh_cli: false,
            work_items: None,
        }
    }
}

impl AppConfig {
    /// Load the config file (CWD first, then home) and overlay the environment
    ///
    /// Call [`crate::load_dotenv`] first so `.env` values are visible.
    pub fn load() -> Result<Self> {
        let file = match crate::load_config_file() {
            Some(content) => {
                let config: FileConfig =
                    toml::from_str(&content).context("Failed to parse .gh-pr-dashboard.toml")?;
                log::info!("Loaded app config from file");
                config
            }
            None => {
                log::debug!("No config file, using environment only");
                FileConfig::default()
            }
        };

        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Merge a file config with environment lookups; the environment wins
    pub fn from_sources<F>(file: FileConfig, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let github_token = env("GITHUB_TOKEN")
            .or_else(|| env("GH_TOKEN"))
            .or(file.github_token)
            .filter(|t| !t.trim().is_empty());

        let repositories = env("REPOSITORIES")
            .map(|v| split_list(&v))
            .unwrap_or_else(|| clean_list(file.repositories));

        let team_members = env("TEAM_MEMBERS")
            .map(|v| split_list(&v))
            .unwrap_or_else(|| clean_list(file.team_members));

        let port = match env("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value: {:?}", port))?,
            None => file.port.unwrap_or(DEFAULT_PORT),
        };

        let bind_address = env("BIND_ADDRESS")
            .or(file.bind_address)
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let work_items = match env("WORK_ITEM_COMMAND") {
            Some(command) => Some(WorkItemsConfig {
                command,
                url_template: env("WORK_ITEM_URL_TEMPLATE")
                    .or_else(|| file.work_items.as_ref().and_then(|w| w.url_template.clone())),
            }),
            None => file.work_items,
        }
        .filter(|w| !w.command.trim().is_empty());

        Ok(Self {
            github_token,
            repositories,
            team_members,
            port,
            bind_address,
            use_gh_cli: file.use_gh_cli,
            work_items,
        })
    }

    pub fn has_token(&self) -> bool {
        self.github_token.is_some()
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}
