// src/domain/property.rs

use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::warn;

use crate::catalog::{DocumentLink, Inspection, ListingBundle};

/// The canonical per-listing record, ready for rendering and publishing.
/// This acts as an anti-corruption layer between the raw JSON:API payloads
/// and the destination CMS: heterogeneous attribute maps are merged into one
/// flat map, and the handful of derived fields the pipeline relies on are
/// pulled out explicitly.
#[derive(Debug, Clone, Default)]
pub struct NormalizedProperty {
    attrs: Map<String, Value>,
    pub sale_type: String,
    pub features: Vec<String>,
    pub inspections: Vec<Inspection>,
    pub image_urls: Vec<String>,
    pub documents: Vec<DocumentLink>,
}

impl NormalizedProperty {
    /// Builds the record from one listing's fetched bundle.
    ///
    /// Merge order is property details, listing, advertisement, location;
    /// later sources override earlier ones on key collision. `sale_type` is
    /// captured from the listing attributes before the merge can shadow it.
    pub fn assemble(bundle: ListingBundle, today: NaiveDate) -> Self {
        let sale_type = bundle
            .listing
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let mut attrs = bundle.property_details;
        attrs.extend(bundle.listing);
        attrs.extend(bundle.advertisement);
        attrs.extend(bundle.location);

        Self {
            attrs,
            sale_type,
            features: bundle.features,
            inspections: upcoming_inspections(bundle.inspections, today),
            image_urls: bundle.image_urls,
            documents: bundle.documents,
        }
    }

    /// The publish-eligibility gate: no gallery images, no post.
    pub fn is_publishable(&self) -> bool {
        !self.image_urls.is_empty()
    }

    /// Attribute rendered as display text; absent and null become "".
    pub fn attr_text(&self, key: &str) -> String {
        match self.attrs.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Attribute for conditionally rendered blocks: `None` when absent,
    /// null, numeric zero or the empty string.
    pub fn attr_present(&self, key: &str) -> Option<String> {
        match self.attrs.get(key)? {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Keeps inspections happening today or later, preserving their order.
/// Dates are expected as `YYYY-MM-DD`; entries that do not parse are dropped.
fn upcoming_inspections(inspections: Vec<Inspection>, today: NaiveDate) -> Vec<Inspection> {
    inspections
        .into_iter()
        .filter(|inspection| match NaiveDate::parse_from_str(&inspection.date, "%Y-%m-%d") {
            Ok(date) => date >= today,
            Err(_) => {
                warn!(date = %inspection.date, "Dropping inspection with unparseable date");
                false
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    fn inspection(date: &str) -> Inspection {
        Inspection {
            date: date.to_string(),
            start_time: "10:00".to_string(),
            end_time: "10:30".to_string(),
            kind: "public".to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
    }

    #[test]
    fn merge_precedence_latest_source_wins() {
        let bundle = ListingBundle {
            property_details: map(json!({ "price": 1, "bedrooms": 3, "suburb": "Kew" })),
            listing: map(json!({ "price": 2, "status": "current" })),
            advertisement: map(json!({ "price": 3, "headline": "Nice house" })),
            location: map(json!({ "price": 4, "suburb": "Richmond" })),
            ..Default::default()
        };

        let prop = NormalizedProperty::assemble(bundle, today());
        assert_eq!(prop.attr_text("price"), "4");
        assert_eq!(prop.attr_text("suburb"), "Richmond");
        // Non-colliding keys survive from every source.
        assert_eq!(prop.attr_text("bedrooms"), "3");
        assert_eq!(prop.attr_text("status"), "current");
        assert_eq!(prop.attr_text("headline"), "Nice house");
    }

    #[test]
    fn sale_type_comes_from_listing_attributes() {
        let bundle = ListingBundle {
            listing: map(json!({ "type": "auction" })),
            // A colliding `type` later in the merge order must not change it.
            location: map(json!({ "type": "house" })),
            ..Default::default()
        };

        let prop = NormalizedProperty::assemble(bundle, today());
        assert_eq!(prop.sale_type, "auction");
        assert_eq!(prop.attr_text("type"), "house");
    }

    #[test]
    fn past_inspections_are_filtered_out_in_order() {
        let bundle = ListingBundle {
            inspections: vec![
                inspection("2026-08-28"),
                inspection("2026-08-29"),
                inspection("2026-09-05"),
                inspection("2026-08-30"),
            ],
            ..Default::default()
        };

        let prop = NormalizedProperty::assemble(bundle, today());
        let dates: Vec<_> = prop.inspections.iter().map(|i| i.date.as_str()).collect();
        // Today is inclusive; order of the survivors is preserved.
        assert_eq!(dates, vec!["2026-08-29", "2026-09-05", "2026-08-30"]);
    }

    #[test]
    fn unparseable_inspection_dates_are_dropped() {
        let bundle = ListingBundle {
            inspections: vec![inspection("next Tuesday"), inspection("2026-12-01")],
            ..Default::default()
        };

        let prop = NormalizedProperty::assemble(bundle, today());
        assert_eq!(prop.inspections.len(), 1);
        assert_eq!(prop.inspections[0].date, "2026-12-01");
    }

    #[test]
    fn eligibility_requires_at_least_one_image() {
        let without = NormalizedProperty::assemble(ListingBundle::default(), today());
        assert!(!without.is_publishable());

        let with = NormalizedProperty::assemble(
            ListingBundle {
                image_urls: vec!["https://img/1-large.jpg".to_string()],
                ..Default::default()
            },
            today(),
        );
        assert!(with.is_publishable());
    }

    #[test]
    fn attr_present_excludes_zero_and_empty() {
        let bundle = ListingBundle {
            listing: map(json!({
                "ensuites": 0,
                "garages": 2,
                "floorAreaUnit": "",
                "landAreaUnit": "sqm",
                "propertyType": null,
            })),
            ..Default::default()
        };

        let prop = NormalizedProperty::assemble(bundle, today());
        assert_eq!(prop.attr_present("ensuites"), None);
        assert_eq!(prop.attr_present("garages"), Some("2".to_string()));
        assert_eq!(prop.attr_present("floorAreaUnit"), None);
        assert_eq!(prop.attr_present("landAreaUnit"), Some("sqm".to_string()));
        assert_eq!(prop.attr_present("propertyType"), None);
        assert_eq!(prop.attr_present("missing"), None);
    }
}
