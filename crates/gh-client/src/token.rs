//! GitHub token resolution

use anyhow::{Context, Result};
use log::debug;

/// Resolves the GitHub token
///
/// Tries the sources in order:
/// 1. The configured token (environment and `.env` are read by the config layer)
/// 2. `gh auth token` (only when enabled)
#[derive(Debug, Clone, Default)]
pub struct TokenResolver {
    explicit_token: Option<String>,
    use_gh_cli: bool,
}

impl TokenResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefer this token over everything else
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.explicit_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Fall back to `gh auth token`
    pub fn with_gh_cli(mut self, enabled: bool) -> Self {
        self.use_gh_cli = enabled;
        self
    }

    /// Resolve a token, or `None` when no source has one
    pub async fn resolve(&self) -> Option<String> {
        if let Some(ref token) = self.explicit_token {
            debug!("Using configured GitHub token");
            return Some(token.clone());
        }

        if self.use_gh_cli {
            match gh_auth_token().await {
                Ok(Some(token)) => {
                    debug!("Using token from gh CLI");
                    return Some(token);
                }
                Ok(None) => debug!("gh CLI returned no token"),
                Err(e) => debug!("gh CLI token lookup failed: {:#}", e),
            }
        }

        None
    }
}

async fn gh_auth_token() -> Result<Option<String>> {
    let output = tokio::process::Command::new("gh")
        .args(["auth", "token"])
        .output()
        .await
        .context("Failed to run 'gh auth token'")?;

    if !output.status.success() {
        return Ok(None);
    }

    let token = String::from_utf8(output.stdout)
        .context("Invalid UTF-8 in gh auth token output")?
        .trim()
        .to_string();

    Ok((!token.is_empty()).then_some(token))
}
