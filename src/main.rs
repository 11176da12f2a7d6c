use std::process;
use std::thread;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::catalog::CatalogClient;
use crate::config::Config;
use crate::content::Branding;
use crate::errors::SyncError;
use crate::fetch::RetryPolicy;
use crate::pipeline::{run_cycle, CycleConfig};
use crate::wordpress::WpClient;

mod catalog;
mod config;
mod content;
mod domain;
mod errors;
mod fetch;
mod pipeline;
mod wordpress;

#[cfg(test)]
mod tests;

fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = or_die(Config::from_env());

    let retry = RetryPolicy {
        max_retries: cfg.max_retries,
        initial_delay: cfg.initial_retry_delay,
    };
    let catalog = or_die(CatalogClient::new(
        cfg.catalog_base_url.clone(),
        cfg.catalog_token.clone(),
        retry,
    ));
    let wp = or_die(WpClient::new(
        cfg.wp_posts_url.clone(),
        cfg.wp_site_url.clone(),
        &cfg.wp_username,
        &cfg.wp_password,
    ));

    let cycle_cfg = CycleConfig {
        status_filters: cfg.status_filters.clone(),
        listing_delay: cfg.listing_delay,
        branding: Branding::default(),
    };

    // Sequential by construction: a slow cycle delays the next tick instead
    // of overlapping it. The first cycle runs immediately at startup.
    loop {
        info!("Starting sync cycle");
        run_cycle(&catalog, &wp, &cycle_cfg);
        info!(interval_secs = cfg.sync_interval.as_secs(), "Sleeping until next tick");
        thread::sleep(cfg.sync_interval);
    }
}

fn or_die<T>(result: Result<T, SyncError>) -> T {
    result.unwrap_or_else(|e| {
        eprintln!("❌ Startup failed: {e}");
        process::exit(1);
    })
}
