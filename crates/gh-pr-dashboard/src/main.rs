use anyhow::{Context, Result};
use gh_pr_config::AppConfig;

mod aggregate;
mod error;
mod filter;
mod logger;
mod routes;
mod state;
mod summary;
#[cfg(test)]
mod test_support;

use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // .env first so RUST_LOG and the GitHub settings are visible
    gh_pr_config::load_dotenv();
    logger::init();

    log::info!("Starting gh-pr-dashboard");

    let config = AppConfig::load().context("Failed to load configuration")?;
    let state = AppState::from_config(config)
        .await
        .context("Failed to initialize GitHub client")?;

    let address = format!("{}:{}", state.config.bind_address, state.config.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    log_configuration(&state);

    axum::serve(listener, routes::router(state))
        .await
        .context("Server error")?;

    Ok(())
}

fn log_configuration(state: &AppState) {
    let config = &state.config;
    log::info!("Server running on http://localhost:{}", config.port);
    log::info!("Configuration:");
    log::info!(
        "  - GitHub Token: {}",
        if state.has_token() {
            "✓ Configured"
        } else {
            "✗ Not configured"
        }
    );
    log::info!("  - Repositories: {} configured", config.repositories.len());
    log::info!("  - Team Members: {} configured", config.team_members.len());
    if let Some(work_items) = &config.work_items {
        log::info!("  - Work items: {}", work_items.command);
    }
}
