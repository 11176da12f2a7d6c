// src/catalog/client.rs
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use url::Url;

use crate::catalog::models::{
    document_links, feature_names, first_item_attributes, inspection_entries,
    large_thumbnail_urls, object_attributes, ListingBundle, ListingPage,
};
use crate::errors::SyncError;
use crate::fetch::{fetch_with_retry, RetryPolicy};

const USER_AGENT: &str = "listing-sync/0.1";

/// The fetching side of the pipeline: discovery plus per-listing aggregation.
pub trait Catalog {
    fn listing_ids(&self, status: &str) -> Result<Vec<String>, SyncError>;
    fn listing_bundle(&self, id: &str) -> Result<ListingBundle, SyncError>;
}

pub struct CatalogClient {
    client: Client,
    base_url: Url,
    token: String,
    retry: RetryPolicy,
}

impl CatalogClient {
    pub fn new(base_url: Url, token: String, retry: RetryPolicy) -> Result<Self, SyncError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(360))
            .build()
            .map_err(|e| SyncError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            token,
            retry,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Retrying GET returning parsed JSON.
    fn fetch_json(&self, path: &str) -> Result<Value, SyncError> {
        let url = self.endpoint(path);
        let resp = fetch_with_retry(&self.client, &url, &self.token, self.retry)?;
        resp.json().map_err(|e| SyncError::Decode {
            url,
            detail: e.to_string(),
        })
    }
}

impl Catalog for CatalogClient {
    /// One GET per status filter. Discovery deliberately uses the plain
    /// (non-retrying) path: a failed filter is skipped by the cycle.
    fn listing_ids(&self, status: &str) -> Result<Vec<String>, SyncError> {
        let url = self.endpoint("listings");
        let resp = self
            .client
            .get(&url)
            .query(&[("filter[status][]", status)])
            .bearer_auth(&self.token)
            .send()
            .map_err(|e| SyncError::Network(format!("{url}: {e}")))?;

        let status_code = resp.status();
        if !status_code.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(SyncError::Upstream {
                url,
                status: status_code,
                body,
            });
        }

        let page: ListingPage = resp.json().map_err(|e| SyncError::Decode {
            url,
            detail: e.to_string(),
        })?;
        Ok(page.data.into_iter().map(|r| r.id).collect())
    }

    /// All eight sub-resources are requested at once and jointly awaited.
    /// If any one of them exhausts its retries, the whole listing fails.
    fn listing_bundle(&self, id: &str) -> Result<ListingBundle, SyncError> {
        let (details, listing, location, ads, features, gallery, inspections, documents) =
            thread::scope(|s| {
                let details = s.spawn(|| self.fetch_json(&format!("property-details/{id}")));
                let listing = s.spawn(|| self.fetch_json(&format!("listings/{id}")));
                let location = s.spawn(|| self.fetch_json(&format!("listings/{id}/property")));
                let ads = s.spawn(|| self.fetch_json(&format!("listings/{id}/advertisements")));
                let features = s.spawn(|| self.fetch_json(&format!("listings/{id}/features")));
                let gallery = s.spawn(|| self.fetch_json(&format!("listings/{id}/images")));
                let inspections = s.spawn(|| self.fetch_json(&format!("listings/{id}/inspections")));
                let documents = s.spawn(|| self.fetch_json(&format!("listings/{id}/documents")));
                (
                    join(details),
                    join(listing),
                    join(location),
                    join(ads),
                    join(features),
                    join(gallery),
                    join(inspections),
                    join(documents),
                )
            });

        Ok(ListingBundle {
            property_details: object_attributes(&details?),
            listing: object_attributes(&listing?),
            location: object_attributes(&location?),
            advertisement: first_item_attributes(&ads?),
            features: feature_names(&features?),
            image_urls: large_thumbnail_urls(&gallery?),
            inspections: inspection_entries(&inspections?),
            documents: document_links(&documents?),
        })
    }
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    handle.join().expect("sub-resource fetch thread panicked")
}
