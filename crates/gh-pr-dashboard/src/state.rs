//! Shared handler state

use crate::error::ApiError;
use anyhow::Result;
use gh_client::{GitHubClient, OctocrabClient, ShellWorkItemProvider, TokenResolver, WorkItemProvider};
use gh_pr_config::AppConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Present once a token was resolved
    client: Option<Arc<dyn GitHubClient>>,
    work_items: Option<Arc<dyn WorkItemProvider>>,
}

impl AppState {
    pub fn new(config: AppConfig, client: Option<Arc<dyn GitHubClient>>) -> Self {
        Self {
            config: Arc::new(config),
            client,
            work_items: None,
        }
    }

    pub fn with_work_items(mut self, provider: Arc<dyn WorkItemProvider>) -> Self {
        self.work_items = Some(provider);
        self
    }

    /// Resolve the token and build the GitHub client and ticketing bridge.
    pub async fn from_config(config: AppConfig) -> Result<Self> {
        let token = TokenResolver::new()
            .with_token(config.github_token.clone())
            .with_gh_cli(config.use_gh_cli)
            .resolve()
            .await;

        let client: Option<Arc<dyn GitHubClient>> = match token {
            Some(token) => Some(Arc::new(OctocrabClient::with_token(token)?)),
            None => None,
        };

        let provider = config.work_items.as_ref().map(|w| {
            Arc::new(ShellWorkItemProvider::new(
                w.command.clone(),
                w.url_template.clone(),
            )) as Arc<dyn WorkItemProvider>
        });

        let state = Self::new(config, client);
        Ok(match provider {
            Some(provider) => state.with_work_items(provider),
            None => state,
        })
    }

    pub fn has_token(&self) -> bool {
        self.client.is_some()
    }

    /// The GitHub client, or the "token not configured" error.
    pub fn client(&self) -> Result<&dyn GitHubClient, ApiError> {
        self.client.as_deref().ok_or(ApiError::MissingToken)
    }

    pub fn work_items(&self) -> Option<&dyn WorkItemProvider> {
        self.work_items.as_deref()
    }
}
