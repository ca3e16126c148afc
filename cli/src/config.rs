//! Command-line and environment configuration.
//!
//! `Args` is what clap parses; `Config` is the validated, immutable form the
//! rest of the binary receives. Credentials are optional at the clap layer so
//! that a missing token or username surfaces as a `ConfigError` with a
//! pointer to the environment variable instead of a usage dump.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use stalker_core::client::DEFAULT_BASE_URL;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GITHUB_TOKEN environment variable (or --token) is required")]
    MissingToken,
    #[error("GITHUB_USERNAME environment variable (or --username) is required")]
    MissingUsername,
    #[error("invalid API URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Which list to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// Accounts you follow that do not follow you.
    NotFollowingBack,
    /// Accounts that follow you that you do not follow.
    Fans,
    /// Accounts that follow each other with you.
    Mutuals,
}

/// List the GitHub accounts you follow that do not follow you back.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Personal access token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Account to audit.
    #[arg(long, short = 'u', env = "GITHUB_USERNAME")]
    pub username: Option<String>,

    /// REST API root, e.g. for GitHub Enterprise.
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Records requested per page.
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub per_page: u32,

    /// Abort when a listing needs more pages than this.
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    #[arg(long, value_enum, default_value = "not-following-back")]
    pub view: View,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub username: String,
    pub api_url: Url,
    pub per_page: u32,
    pub max_pages: Option<u32>,
    pub timeout: Duration,
    pub view: View,
}

impl Args {
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let token = non_empty(self.token).ok_or(ConfigError::MissingToken)?;
        let username = non_empty(self.username).ok_or(ConfigError::MissingUsername)?;
        let api_url = Url::parse(&self.api_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.api_url.clone(),
            reason: e.to_string(),
        })?;
        if api_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.api_url,
                reason: "not a hierarchical URL".to_string(),
            });
        }

        Ok(Config {
            token,
            username,
            api_url,
            per_page: self.per_page,
            max_pages: self.max_pages,
            timeout: Duration::from_secs(self.timeout_secs),
            view: self.view,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
