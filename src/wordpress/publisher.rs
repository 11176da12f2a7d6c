// src/wordpress/publisher.rs
use tracing::{info, warn};

use crate::domain::NormalizedProperty;
use crate::errors::SyncError;
use crate::wordpress::client::{Cms, PURGE_PAGE_SIZE};
use crate::wordpress::models::PostPayload;

/// Cycle-wide purge: collect every existing post id first (paging past 100),
/// then delete each exactly once. Per-post failures are logged and skipped;
/// the destination is rebuilt from scratch right after.
pub fn purge_all(cms: &impl Cms) -> Result<usize, SyncError> {
    let mut ids = Vec::new();
    let mut page: u32 = 1;
    loop {
        // WordPress answers a page past the end with 400
        // (rest_post_invalid_page_number) rather than an empty list, so when
        // the collection is an exact multiple of the page size the request
        // after the last full page errors; everything gathered so far is the
        // whole collection.
        let batch = match cms.list_post_ids(page) {
            Ok(batch) => batch,
            Err(e) if page > 1 => {
                warn!(page, error = %e, "Stopping post collection at out-of-range page");
                break;
            }
            Err(e) => return Err(e),
        };
        let last_page = batch.len() < PURGE_PAGE_SIZE;
        ids.extend(batch);
        if last_page {
            break;
        }
        page += 1;
    }

    let total = ids.len();
    let mut deleted = 0;
    for id in ids {
        match cms.delete_post(id) {
            Ok(()) => deleted += 1,
            Err(e) => warn!(post_id = id, error = %e, "Failed to delete post"),
        }
    }
    info!(total, deleted, "Purge finished");
    Ok(deleted)
}

/// Per-listing publish: both categories, then the featured image, then the
/// post itself — sequential, each leg completed before the next starts.
pub fn publish(
    cms: &impl Cms,
    property: &NormalizedProperty,
    content: String,
    listing_id: &str,
) -> Result<u64, SyncError> {
    let sale_category = cms.resolve_category(&property.sale_type)?;
    let status_category = cms.resolve_category(&property.attr_text("status"))?;

    let featured_url = property.image_urls.first().cloned().unwrap_or_default();
    let featured_media = cms.upload_featured_media(&featured_url)?;

    let payload = PostPayload::from_property(
        property,
        content,
        featured_media,
        [sale_category, status_category],
        listing_id,
    );
    cms.create_post(&payload)
}
