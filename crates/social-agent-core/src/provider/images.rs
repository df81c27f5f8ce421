//! OpenAI image generation client
//!
//! Generates one image per call and can fetch the resulting URL's bytes.

use super::ProviderError;
use crate::config::ImageConfig;
use serde::Deserialize;
use std::io::Read;

/// Upper bound on a downloaded image
const MAX_IMAGE_BYTES: u64 = 32 * 1024 * 1024;

/// One image generation request, already validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub prompt: String,
    pub size: String,
    pub quality: String,
}

/// Backend for text-to-image generation and for fetching the result
pub trait ImageBackend: Send + Sync {
    /// Generate one image and return its URL
    fn generate(&self, request: &ImageRequest, api_key: &str) -> Result<String, ProviderError>;

    /// Fetch the bytes behind a generated image URL
    fn download(&self, url: &str) -> Result<Vec<u8>, ProviderError>;
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImage {
    url: Option<String>,
}

/// OpenAI `images/generations` backend
pub struct OpenAiImageClient {
    agent: ureq::Agent,
    base_url: String,
    model: String,
}

impl OpenAiImageClient {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            agent: ureq::Agent::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    pub fn from_config(config: &ImageConfig) -> Self {
        Self::new(&config.base_url, &config.model)
    }
}

impl ImageBackend for OpenAiImageClient {
    fn generate(&self, request: &ImageRequest, api_key: &str) -> Result<String, ProviderError> {
        let body = serde_json::json!({
            "model": self.model,
            "prompt": request.prompt,
            "size": request.size,
            "quality": request.quality,
            "n": 1
        });

        let url = format!("{}/images/generations", self.base_url);
        tracing::debug!(model = %self.model, size = %request.size, "requesting image generation");

        let response = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .set("Authorization", &format!("Bearer {}", api_key))
            .send_json(&body)?;

        let parsed: GenerationResponse = response
            .into_json()
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        parsed
            .data
            .into_iter()
            .find_map(|image| image.url)
            .ok_or_else(|| ProviderError::InvalidResponse("No image URL in response".to_string()))
    }

    fn download(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        let response = self.agent.get(url).call()?;
        read_capped(response.into_reader(), MAX_IMAGE_BYTES)
    }
}

/// Read a whole body, failing rather than truncating past `limit` bytes
fn read_capped(reader: impl Read, limit: u64) -> Result<Vec<u8>, ProviderError> {
    let mut bytes = Vec::new();
    reader.take(limit + 1).read_to_end(&mut bytes)?;

    if bytes.len() as u64 > limit {
        return Err(ProviderError::InvalidResponse(format!(
            "Image exceeds {} bytes",
            limit
        )));
    }
    Ok(bytes)
}
