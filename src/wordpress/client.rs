// src/wordpress/client.rs
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::blocking::{Client, Response};
use reqwest::header::{AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE};
use serde_json::json;
use tracing::error;
use url::Url;

use crate::errors::SyncError;
use crate::wordpress::models::{Category, Created, PostPayload, PostSummary};

const USER_AGENT: &str = "listing-sync/0.1";
pub const PURGE_PAGE_SIZE: usize = 100;

/// Destination side of the pipeline. `WpClient` is the real thing; tests
/// drive the publisher through in-memory implementations.
pub trait Cms {
    /// One page of existing post ids, `PURGE_PAGE_SIZE` at a time, 1-based.
    fn list_post_ids(&self, page: u32) -> Result<Vec<u64>, SyncError>;
    fn delete_post(&self, id: u64) -> Result<(), SyncError>;
    /// Lookup-or-create of a category by slug, returning its id.
    fn resolve_category(&self, label: &str) -> Result<u64, SyncError>;
    /// Downloads the image and re-uploads it to the media store.
    fn upload_featured_media(&self, image_url: &str) -> Result<u64, SyncError>;
    fn create_post(&self, payload: &PostPayload) -> Result<u64, SyncError>;
}

pub struct WpClient {
    client: Client,
    posts_url: String,
    site_url: String,
    auth: String,
}

impl WpClient {
    pub fn new(
        posts_url: Url,
        site_url: Url,
        username: &str,
        password: &str,
    ) -> Result<Self, SyncError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(360))
            .build()
            .map_err(|e| SyncError::Network(e.to_string()))?;

        let token = STANDARD.encode(format!("{username}:{password}"));

        Ok(Self {
            client,
            posts_url: posts_url.as_str().trim_end_matches('/').to_string(),
            site_url: site_url.as_str().trim_end_matches('/').to_string(),
            auth: format!("Basic {token}"),
        })
    }

    fn wp_json(&self, path: &str) -> String {
        format!("{}/wp-json/wp/v2/{}", self.site_url, path)
    }

    fn decode<T: serde::de::DeserializeOwned>(url: &str, resp: Response) -> Result<T, SyncError> {
        resp.json().map_err(|e| SyncError::Decode {
            url: url.to_string(),
            detail: e.to_string(),
        })
    }
}

fn expect_success(url: &str, resp: Response) -> Result<Response, SyncError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        let body = resp.text().unwrap_or_default();
        Err(SyncError::Upstream {
            url: url.to_string(),
            status,
            body,
        })
    }
}

impl Cms for WpClient {
    fn list_post_ids(&self, page: u32) -> Result<Vec<u64>, SyncError> {
        let url = format!("{}?per_page={PURGE_PAGE_SIZE}&page={page}", self.posts_url);
        let resp = self
            .client
            .get(&url)
            .header(AUTHORIZATION, self.auth.as_str())
            .send()
            .map_err(|e| SyncError::Network(format!("{url}: {e}")))?;

        let posts: Vec<PostSummary> = Self::decode(&url, expect_success(&url, resp)?)?;
        Ok(posts.into_iter().map(|p| p.id).collect())
    }

    fn delete_post(&self, id: u64) -> Result<(), SyncError> {
        let url = format!("{}/{id}?force=true", self.posts_url);
        let resp = self
            .client
            .delete(&url)
            .header(AUTHORIZATION, self.auth.as_str())
            .send()
            .map_err(|e| SyncError::Network(format!("{url}: {e}")))?;

        expect_success(&url, resp)?;
        Ok(())
    }

    fn resolve_category(&self, label: &str) -> Result<u64, SyncError> {
        let url = self.wp_json("categories");

        let resp = self
            .client
            .get(&url)
            .query(&[("slug", label)])
            .header(AUTHORIZATION, self.auth.as_str())
            .send()
            .map_err(|e| SyncError::Network(format!("{url}: {e}")))?;
        let existing: Vec<Category> = Self::decode(&url, expect_success(&url, resp)?)?;

        if let Some(category) = existing.first() {
            return Ok(category.id);
        }

        let resp = self
            .client
            .post(&url)
            .header(AUTHORIZATION, self.auth.as_str())
            .json(&json!({ "name": label, "slug": label }))
            .send()
            .map_err(|e| SyncError::Network(format!("{url}: {e}")))?;
        let created: Created = Self::decode(&url, expect_success(&url, resp)?)?;
        Ok(created.id)
    }

    fn upload_featured_media(&self, image_url: &str) -> Result<u64, SyncError> {
        // Download leg: the gallery host, no CMS auth.
        let resp = self
            .client
            .get(image_url)
            .send()
            .map_err(|e| SyncError::Network(format!("{image_url}: {e}")))?;
        let resp = expect_success(image_url, resp)?;

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let extension = content_type
            .parse::<mime::Mime>()
            .map(|m| m.subtype().as_str().to_string())
            .unwrap_or_else(|_| "bin".to_string());
        let bytes = resp
            .bytes()
            .map_err(|e| SyncError::Network(format!("{image_url}: {e}")))?;

        // Upload leg: binary body, content-type passed through.
        let url = self.wp_json("media");
        let resp = self
            .client
            .post(&url)
            .header(AUTHORIZATION, self.auth.as_str())
            .header(CONTENT_TYPE, content_type.as_str())
            .header(
                CONTENT_DISPOSITION,
                format!("attachment; filename=image.{extension}"),
            )
            .body(bytes.to_vec())
            .send()
            .map_err(|e| SyncError::Network(format!("{url}: {e}")))?;

        let created: Created = Self::decode(&url, expect_success(&url, resp)?)?;
        Ok(created.id)
    }

    fn create_post(&self, payload: &PostPayload) -> Result<u64, SyncError> {
        let url = self.posts_url.clone();
        let resp = self
            .client
            .post(&url)
            .header(AUTHORIZATION, self.auth.as_str())
            .json(payload)
            .send()
            .map_err(|e| SyncError::Network(format!("{url}: {e}")))?;

        // A rejected post is the one failure worth the full context: status,
        // response headers and which post was being created.
        let status = resp.status();
        if !status.is_success() {
            let headers = format!("{:?}", resp.headers());
            let body = resp.text().unwrap_or_default();
            error!(
                url = %url,
                status = %status,
                headers = %headers,
                title = %payload.title,
                body = %body,
                "Post creation rejected"
            );
            return Err(SyncError::Upstream { url, status, body });
        }

        let created: Created = Self::decode(&url, resp)?;
        Ok(created.id)
    }
}
