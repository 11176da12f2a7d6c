// src/pipeline.rs
use std::thread;
use std::time::Duration;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::catalog::Catalog;
use crate::content::{build_post_content, Branding};
use crate::domain::NormalizedProperty;
use crate::wordpress::{publish, purge_all, Cms};

/// Per-cycle knobs, split from `Config` so tests can run with zero delay.
#[derive(Debug, Clone)]
pub struct CycleConfig {
    pub status_filters: Vec<String>,
    pub listing_delay: Duration,
    pub branding: Branding,
}

#[derive(Debug, Default, PartialEq)]
pub struct CycleStats {
    pub published: usize,
    pub skipped_no_images: usize,
    pub failed: usize,
}

/// One full purge-then-recreate pass.
///
/// A single listing's failure never aborts the cycle: failed filters and
/// failed listings are logged, counted and skipped, and the cycle reaches
/// everything it can.
pub fn run_cycle(catalog: &impl Catalog, cms: &impl Cms, cfg: &CycleConfig) -> CycleStats {
    let mut stats = CycleStats::default();

    if let Err(e) = purge_all(cms) {
        error!(error = %e, "Failed to purge existing posts");
    }

    for status in &cfg.status_filters {
        let ids = match catalog.listing_ids(status) {
            Ok(ids) => ids,
            Err(e) => {
                warn!(status = %status, error = %e, "Failed to fetch listings for filter");
                continue;
            }
        };
        info!(status = %status, count = ids.len(), "Discovered listings");

        for id in &ids {
            process_listing(catalog, cms, cfg, id, &mut stats);
            // Throttles downstream load between listings, not between filters.
            thread::sleep(cfg.listing_delay);
        }
    }

    info!(
        published = stats.published,
        skipped = stats.skipped_no_images,
        failed = stats.failed,
        "Cycle finished"
    );
    stats
}

fn process_listing(
    catalog: &impl Catalog,
    cms: &impl Cms,
    cfg: &CycleConfig,
    id: &str,
    stats: &mut CycleStats,
) {
    let bundle = match catalog.listing_bundle(id) {
        Ok(bundle) => bundle,
        Err(e) => {
            error!(listing_id = id, error = %e, "Failed to aggregate listing");
            stats.failed += 1;
            return;
        }
    };

    // The inspection cutoff is taken once per listing.
    let today = Utc::now().date_naive();
    let property = NormalizedProperty::assemble(bundle, today);

    if !property.is_publishable() {
        info!(listing_id = id, "Skipping listing with no images");
        stats.skipped_no_images += 1;
        return;
    }

    let content = build_post_content(&property, &cfg.branding);
    match publish(cms, &property, content, id) {
        Ok(post_id) => {
            info!(listing_id = id, post_id, "Post created");
            stats.published += 1;
        }
        Err(e) => {
            error!(listing_id = id, error = %e, "Failed to publish listing");
            stats.failed += 1;
        }
    }
}
