//! External provider clients
//!
//! Thin blocking HTTP clients for the services the tools wrap:
//! - NewsAPI (news search)
//! - OpenAI images (text-to-image generation and download)
//!
//! Each client sits behind a small backend trait so the tool layer can be
//! exercised without network access.

mod error;
mod images;
mod news;

pub use error::ProviderError;
pub use images::{ImageBackend, ImageRequest, OpenAiImageClient};
pub use news::{NewsApiClient, NewsBackend, NewsQuery};
