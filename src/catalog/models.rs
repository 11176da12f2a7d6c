// src/catalog/models.rs
//
// The catalog speaks JSON:API: single objects arrive as `{data: {attributes}}`,
// collections as `{data: [{attributes, meta}]}`. Payloads are kept as raw
// attribute maps because the set of listing attributes is open-ended; only the
// collection endpoints get typed entries.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// One page of `GET /listings?filter[status][]=...`.
#[derive(Debug, Deserialize)]
pub struct ListingPage {
    #[serde(default)]
    pub data: Vec<ListingRef>,
}

#[derive(Debug, Deserialize)]
pub struct ListingRef {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
}

// Listing ids have been observed as both JSON numbers and strings.
fn id_string<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(de)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "listing id must be a string or number, got {other}"
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLink {
    pub url: String,
}

/// Everything fetched for one listing, JSON:API wrappers already unwrapped.
/// Absent payloads are empty maps/vecs, never nulls.
#[derive(Debug, Clone, Default)]
pub struct ListingBundle {
    pub property_details: Map<String, Value>,
    pub listing: Map<String, Value>,
    pub location: Map<String, Value>,
    pub advertisement: Map<String, Value>,
    pub features: Vec<String>,
    pub image_urls: Vec<String>,
    pub inspections: Vec<Inspection>,
    pub documents: Vec<DocumentLink>,
}

/// `data.attributes` of a single-object endpoint.
pub fn object_attributes(body: &Value) -> Map<String, Value> {
    body.pointer("/data/attributes")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

/// `data[0].attributes` — advertisements arrive as a collection but only the
/// first entry feeds the record.
pub fn first_item_attributes(body: &Value) -> Map<String, Value> {
    body.pointer("/data/0/attributes")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

fn array_data(body: &Value) -> &[Value] {
    body.get("data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

pub fn feature_names(body: &Value) -> Vec<String> {
    array_data(body)
        .iter()
        .filter_map(|item| item.pointer("/attributes/feature").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

pub fn large_thumbnail_urls(body: &Value) -> Vec<String> {
    array_data(body)
        .iter()
        .filter_map(|item| item.pointer("/meta/thumbnails/large").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

pub fn inspection_entries(body: &Value) -> Vec<Inspection> {
    array_data(body)
        .iter()
        .filter_map(|item| item.get("attributes"))
        .filter_map(|attrs| serde_json::from_value(attrs.clone()).ok())
        .collect()
}

pub fn document_links(body: &Value) -> Vec<DocumentLink> {
    array_data(body)
        .iter()
        .filter_map(|item| item.pointer("/attributes/url").and_then(Value::as_str))
        .map(|url| DocumentLink { url: url.to_string() })
        .collect()
}
