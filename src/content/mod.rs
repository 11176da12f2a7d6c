mod branding;
mod post;

pub use branding::Branding;
pub use post::build_post_content;
