// src/content/post.rs
use maud::{html, Markup, PreEscaped};

use crate::content::branding::Branding;
use crate::domain::NormalizedProperty;

/// Renders the post body for one property. Pure and deterministic: record in,
/// markup out, no I/O.
pub fn build_post_content(property: &NormalizedProperty, branding: &Branding) -> String {
    // The slider shortcode must reach the CMS verbatim, quotes included.
    let slider = format!(
        "[custom_image_slider urls=\"{}\"]",
        property.image_urls.join(",")
    );

    html! {
        div class="slider-cont" { (PreEscaped(slider)) }
        div class="single-page" {
            div class="content-wrap" {
                div class="address-div" { (property.attr_text("fullAddress")) }
                br;
                div class="price-div" {
                    h4 { "Price: " (property.attr_text("displayPrice")) }
                    div class="amen-div" {
                        div class="single-icon-wrap" {
                            img src=(branding.bed_icon);
                            (property.attr_text("bedrooms"))
                        }
                        div class="vertical-line" {}
                        div class="single-icon-wrap" {
                            img src=(branding.bath_icon);
                            (property.attr_text("bathrooms"))
                        }
                        div class="vertical-line" {}
                        br;
                        div class="single-icon-wrap" {
                            img src=(branding.car_icon);
                            (property.attr_text("carports"))
                        }
                    }
                }
                br;
                h1 { (property.attr_text("headline")) }
                br;
                // Descriptions arrive with their own markup; rendered as-is.
                p { (PreEscaped(property.attr_text("description"))) }
                div class="horizontal-line" {}
                div class="features-wrap" {
                    h4 { "PROPERTY DETAILS" }
                    (details_block(property))
                    br;
                }
                div class="horizontal-line" {}
                div class="features-wrap" {
                    h4 { "PROPERTY FEATURES" }
                    div class="features-col" {
                        @for feature in &property.features {
                            li { (feature) }
                        }
                    }
                }
                br;
                div class="horizontal-line" {}
                br;
                div class="ins-item" {
                    h4 { "INSPECTION TIMES" }
                    @for inspection in &property.inspections {
                        li {
                            "Date: " (inspection.date)
                            ", Start Time: " (inspection.start_time)
                            ", End Time: " (inspection.end_time)
                            ", Type: " (inspection.kind)
                        }
                    }
                }
                br;
                div class="doc-wrap" {
                    br;
                    (PreEscaped(&branding.enquiry_shortcode))
                }
                br;
                div class="horizontal-line" {}
                br;
                // Only the first document gets a download link; listings can
                // carry several but one href holds exactly one URL.
                @if let Some(doc) = property.documents.first() {
                    div class="doc-wrap" {
                        h4 { "STATEMENT OF INFORMATION" }
                        a href=(doc.url) { button { "Download Document" } }
                        br;
                    }
                }
            }
            (contact_blocks(branding))
        }
    }
    .into_string()
}

fn details_block(property: &NormalizedProperty) -> Markup {
    // Area lines need both the value and its unit to be present.
    let floor_area = property
        .attr_present("floorArea")
        .zip(property.attr_present("floorAreaUnit"));
    let land_area = property
        .attr_present("landArea")
        .zip(property.attr_present("landAreaUnit"));

    html! {
        @if let Some(v) = property.attr_present("ensuites") {
            br; "Ensuites: " (v)
        }
        @if let Some((area, unit)) = floor_area {
            br; "Floor Area: " (area) " " (unit)
        }
        @if let Some(v) = property.attr_present("garages") {
            br; "Garages: " (v)
        }
        @if let Some((area, unit)) = land_area {
            br; "Land Area: " (area) " " (unit)
        }
        @if let Some(v) = property.attr_present("type") {
            br; "Property Type: " (v)
        }
    }
}

fn contact_blocks(branding: &Branding) -> Markup {
    html! {
        div class="contact-blocks" {
            @for (idx, agent) in branding.agents.iter().enumerate() {
                div class=(if idx == 0 { "top-block" } else { "bottom-block" }) {
                    div class="contact-det" {
                        img src=(agent.photo_url) alt=(agent.name);
                        h4 { (agent.name) }
                        h6 { (agent.title) }
                        div class="btn-wrap" {
                            a href=(format!("tel:{}", agent.phone)) {
                                div class="btn-dial" {
                                    p { "Call " (agent.phone) }
                                }
                            }
                        }
                        div class="btn-mail" {
                            a { p { "Email" } }
                        }
                    }
                }
            }
            div class="social-icons" {
                @for icon in &branding.social_icons {
                    div class="icon-s" {
                        a href="" { img src=(icon); }
                    }
                }
            }
        }
    }
}
