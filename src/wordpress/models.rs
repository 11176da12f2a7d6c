// src/wordpress/models.rs
use serde::{Deserialize, Serialize};

use crate::domain::NormalizedProperty;

#[derive(Debug, Deserialize)]
pub struct PostSummary {
    pub id: u64,
}

#[derive(Debug, Deserialize)]
pub struct Category {
    pub id: u64,
}

/// Creation responses (category, media, post) all carry the new id.
#[derive(Debug, Deserialize)]
pub struct Created {
    pub id: u64,
}

/// The payload of `POST {posts}` — the only thing the destination ever
/// durably stores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostPayload {
    pub title: String,
    pub content: String,
    pub status: String,
    pub featured_media: u64,
    /// Sale-type category followed by status category.
    pub categories: Vec<u64>,
    pub acf: AcfFields,
}

/// Flat custom-field map mirroring select record fields, all stringly typed
/// on the CMS side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcfFields {
    pub img_url_tag: String,
    pub property_id: String,
    pub category: String,
    pub carports: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub displayprice: String,
    pub streetname: String,
    pub suburb: String,
    pub status: String,
    pub saletype: String,
}

impl PostPayload {
    pub fn from_property(
        property: &NormalizedProperty,
        content: String,
        featured_media: u64,
        categories: [u64; 2],
        listing_id: &str,
    ) -> Self {
        let property_id = {
            let id = property.attr_text("id");
            if id.is_empty() {
                listing_id.to_string()
            } else {
                id
            }
        };

        Self {
            title: format!(
                "{} {}",
                property.attr_text("fullAddress"),
                property.attr_text("status")
            ),
            content,
            status: "publish".to_string(),
            featured_media,
            categories: categories.to_vec(),
            acf: AcfFields {
                img_url_tag: property.image_urls.first().cloned().unwrap_or_default(),
                property_id,
                category: property.attr_text("type"),
                carports: property.attr_text("carports"),
                bedrooms: property.attr_text("bedrooms"),
                bathrooms: property.attr_text("bathrooms"),
                displayprice: property.attr_text("displayPrice"),
                streetname: property.attr_text("streetName"),
                suburb: property.attr_text("suburb"),
                status: property.attr_text("status"),
                saletype: property.sale_type.clone(),
            },
        }
    }
}
