mod client;
mod models;

pub use client::{Catalog, CatalogClient};
pub use models::{DocumentLink, Inspection, ListingBundle};
