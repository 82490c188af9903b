//! Configuration for gh-pr-dashboard
//!
//! This crate provides:
//! - `.env` loading
//! - Configuration file lookup (TOML)
//! - Application configuration (AppConfig)

pub mod app_config;
pub mod config_file;

pub use app_config::{split_list, AppConfig, FileConfig, WorkItemsConfig, DEFAULT_BIND_ADDRESS, DEFAULT_PORT};
pub use config_file::{home_config_path, load_config_file, load_dotenv};
