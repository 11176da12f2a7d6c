// src/config.rs
use std::env;
use std::time::Duration;

use url::Url;

use crate::errors::SyncError;

pub const DEFAULT_STATUS_FILTERS: [&str; 4] = ["active", "current", "under offer", "sold"];

/// Process-wide immutable configuration, built once at startup from the
/// environment. Nothing reads the environment after this.
#[derive(Debug, Clone)]
pub struct Config {
    /// Catalog API root, e.g. `https://publicapi.myatrealty.com/api/v1`.
    pub catalog_base_url: Url,
    /// Static bearer token for the catalog API.
    pub catalog_token: String,
    /// Posts collection endpoint of the destination CMS.
    pub wp_posts_url: Url,
    /// Site root for the CMS's categories and media endpoints.
    pub wp_site_url: Url,
    pub wp_username: String,
    pub wp_password: String,
    /// Listing status filters queried during discovery, in order.
    pub status_filters: Vec<String>,
    /// Pause between consecutive cycles.
    pub sync_interval: Duration,
    /// Minimum gap between two listings' processing within a cycle.
    pub listing_delay: Duration,
    pub max_retries: u32,
    pub initial_retry_delay: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, SyncError> {
        Ok(Self {
            catalog_base_url: required_url("LISTINGS_API_BASE_URL")?,
            catalog_token: required("LISTINGS_API_TOKEN")?,
            wp_posts_url: required_url("WP_API_BASE_URL")?,
            wp_site_url: required_url("WP_SITE_URL")?,
            wp_username: required("WP_USERNAME")?,
            wp_password: required("WP_PASSWORD")?,
            status_filters: status_filters_from_env(),
            sync_interval: Duration::from_secs(u64_or("SYNC_INTERVAL_HOURS", 12)? * 3600),
            listing_delay: Duration::from_millis(u64_or("LISTING_DELAY_MS", 1000)?),
            max_retries: u64_or("FETCH_MAX_RETRIES", 50)? as u32,
            initial_retry_delay: Duration::from_millis(u64_or("FETCH_INITIAL_DELAY_MS", 1000)?),
        })
    }
}

fn required(name: &str) -> Result<String, SyncError> {
    env::var(name).map_err(|_| SyncError::Config(format!("{name} environment variable not set")))
}

fn required_url(name: &str) -> Result<Url, SyncError> {
    let raw = required(name)?;
    Url::parse(&raw).map_err(|e| SyncError::Config(format!("{name} is not a valid url: {e}")))
}

fn u64_or(name: &str, default: u64) -> Result<u64, SyncError> {
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .parse()
            .map_err(|_| SyncError::Config(format!("{name} must be an integer, got {raw:?}"))),
    }
}

fn status_filters_from_env() -> Vec<String> {
    match env::var("STATUS_FILTERS") {
        Ok(raw) => raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Err(_) => DEFAULT_STATUS_FILTERS.iter().map(|s| s.to_string()).collect(),
    }
}
