mod client;
mod models;
mod publisher;

pub use client::{Cms, WpClient, PURGE_PAGE_SIZE};
pub use models::PostPayload;
pub use publisher::{publish, purge_all};
