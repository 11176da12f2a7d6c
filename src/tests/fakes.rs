// src/tests/fakes.rs
use std::cell::RefCell;
use std::collections::HashMap;

use reqwest::StatusCode;

use crate::catalog::{Catalog, ListingBundle};
use crate::errors::SyncError;
use crate::wordpress::{Cms, PostPayload, PURGE_PAGE_SIZE};

/// Canned catalog: ids per status filter and bundles per listing id.
#[derive(Default)]
pub struct FakeCatalog {
    pub ids_by_status: HashMap<String, Vec<String>>,
    pub bundles: HashMap<String, ListingBundle>,
    pub failing_statuses: Vec<String>,
}

impl Catalog for FakeCatalog {
    fn listing_ids(&self, status: &str) -> Result<Vec<String>, SyncError> {
        if self.failing_statuses.iter().any(|s| s == status) {
            return Err(SyncError::Upstream {
                url: format!("listings?filter[status][]={status}"),
                status: StatusCode::BAD_GATEWAY,
                body: String::new(),
            });
        }
        Ok(self.ids_by_status.get(status).cloned().unwrap_or_default())
    }

    fn listing_bundle(&self, id: &str) -> Result<ListingBundle, SyncError> {
        self.bundles.get(id).cloned().ok_or_else(|| SyncError::Decode {
            url: format!("listings/{id}"),
            detail: "unknown listing".to_string(),
        })
    }
}

/// In-memory CMS recording every call the publisher makes.
#[derive(Default)]
pub struct FakeCms {
    pub existing_posts: Vec<u64>,
    pub failing_deletes: Vec<u64>,
    /// Property ids whose `create_post` is rejected.
    pub failing_property_ids: Vec<String>,
    pub delete_calls: RefCell<Vec<u64>>,
    pub categories: RefCell<HashMap<String, u64>>,
    pub uploads: RefCell<Vec<String>>,
    pub created_posts: RefCell<Vec<PostPayload>>,
}

impl Cms for FakeCms {
    fn list_post_ids(&self, page: u32) -> Result<Vec<u64>, SyncError> {
        let start = (page as usize - 1) * PURGE_PAGE_SIZE;
        // WordPress rejects a page past the end of the collection with 400
        // (rest_post_invalid_page_number) instead of returning an empty list.
        if page > 1 && start >= self.existing_posts.len() {
            return Err(SyncError::Upstream {
                url: format!("posts?per_page={PURGE_PAGE_SIZE}&page={page}"),
                status: StatusCode::BAD_REQUEST,
                body: r#"{"code":"rest_post_invalid_page_number"}"#.to_string(),
            });
        }
        Ok(self
            .existing_posts
            .iter()
            .skip(start)
            .take(PURGE_PAGE_SIZE)
            .copied()
            .collect())
    }

    fn delete_post(&self, id: u64) -> Result<(), SyncError> {
        self.delete_calls.borrow_mut().push(id);
        if self.failing_deletes.contains(&id) {
            return Err(SyncError::Upstream {
                url: format!("posts/{id}"),
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: String::new(),
            });
        }
        Ok(())
    }

    fn resolve_category(&self, label: &str) -> Result<u64, SyncError> {
        let mut categories = self.categories.borrow_mut();
        if let Some(id) = categories.get(label) {
            return Ok(*id);
        }
        let id = 100 + categories.len() as u64;
        categories.insert(label.to_string(), id);
        Ok(id)
    }

    fn upload_featured_media(&self, image_url: &str) -> Result<u64, SyncError> {
        let mut uploads = self.uploads.borrow_mut();
        uploads.push(image_url.to_string());
        Ok(900 + uploads.len() as u64)
    }

    fn create_post(&self, payload: &PostPayload) -> Result<u64, SyncError> {
        if self.failing_property_ids.contains(&payload.acf.property_id) {
            return Err(SyncError::Upstream {
                url: "posts".to_string(),
                status: StatusCode::BAD_REQUEST,
                body: "rejected".to_string(),
            });
        }
        let mut created = self.created_posts.borrow_mut();
        created.push(payload.clone());
        Ok(1000 + created.len() as u64)
    }
}
