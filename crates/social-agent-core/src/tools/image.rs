//! Image tool
//!
//! Generates one image through an [`ImageBackend`], then tries to save it
//! under the configured output directory. A failed save still reports
//! success, with `local_path: null` and a `download_error`.

use super::args::{Arg, Args};
use super::{Echo, Tool, ToolResult, ToolSpec};
use crate::provider::{ImageBackend, ImageRequest, ProviderError};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;

pub const GENERATE_IMAGE: &str = "generate_image";

pub const VALID_SIZES: [&str; 3] = ["1024x1024", "1792x1024", "1024x1792"];
pub const VALID_QUALITIES: [&str; 2] = ["standard", "hd"];
pub const DEFAULT_SIZE: &str = "1024x1024";
pub const DEFAULT_QUALITY: &str = "standard";

/// Prompt characters considered when naming the saved file
const FILENAME_PROMPT_CHARS: usize = 30;

const INVALID_PROMPT: &str = "Invalid prompt provided. Please provide a valid text description.";
const EMPTY_PROMPT: &str =
    "Empty prompt provided. Please provide a descriptive text for image generation.";
const MISSING_KEY: &str =
    "OpenAI API key not found. Please set OPENAI_API_KEY environment variable.";

/// Success payload of the image tool
#[derive(Debug, Clone, PartialEq, Serialize)]
struct ImageArtifact {
    image_url: String,
    /// Absolute path of the saved file, `null` when saving failed
    local_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    download_error: Option<String>,
}

/// Known categories of generation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GenerationFailure {
    Credential,
    ContentPolicy,
    RateLimit,
    Quota,
}

impl GenerationFailure {
    fn message(&self) -> &'static str {
        match self {
            GenerationFailure::Credential => {
                "Invalid OpenAI API key. Please check your OPENAI_API_KEY environment variable."
            }
            GenerationFailure::ContentPolicy => {
                "The prompt violates OpenAI's content policy. Please try a different description."
            }
            GenerationFailure::RateLimit => "Rate limit exceeded. Please try again in a moment.",
            GenerationFailure::Quota => {
                "OpenAI account quota exceeded. Please check your OpenAI account billing."
            }
        }
    }

    /// Structured provider codes first, then the message text
    fn classify(err: &ProviderError) -> Option<Self> {
        let by_code = match err {
            ProviderError::Api { status: 401, .. } => Some(GenerationFailure::Credential),
            _ => match err.code() {
                Some("invalid_api_key") => Some(GenerationFailure::Credential),
                Some("content_policy_violation") => Some(GenerationFailure::ContentPolicy),
                Some("rate_limit_exceeded") => Some(GenerationFailure::RateLimit),
                Some("insufficient_quota") | Some("billing_hard_limit_reached") => {
                    Some(GenerationFailure::Quota)
                }
                _ => None,
            },
        };

        by_code.or_else(|| Self::classify_text(&err.raw_message()))
    }

    fn classify_text(text: &str) -> Option<Self> {
        let text = text.to_lowercase();
        if text.contains("api key") {
            Some(GenerationFailure::Credential)
        } else if text.contains("content policy") || text.contains("content_policy") {
            Some(GenerationFailure::ContentPolicy)
        } else if text.contains("rate limit") {
            Some(GenerationFailure::RateLimit)
        } else if text.contains("insufficient") && text.contains("quota") {
            Some(GenerationFailure::Quota)
        } else {
            None
        }
    }
}

fn describe_failure(err: &ProviderError) -> String {
    let detail = match GenerationFailure::classify(err) {
        Some(kind) => kind.message().to_string(),
        None => err.raw_message(),
    };
    format!("Image generation failed: {}", detail)
}

/// Filesystem-safe file name for a prompt and a timestamp suffix
pub fn image_filename(prompt: &str, timestamp: &str) -> String {
    let kept: String = prompt
        .chars()
        .take(FILENAME_PROMPT_CHARS)
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '_')
        .collect();
    let stem = kept.trim_end().replace(' ', "_").to_lowercase();
    let stem = if stem.is_empty() { "image" } else { stem.as_str() };
    format!("{}_{}.png", stem, timestamp)
}

/// `generate_image` tool
pub struct ImageTool {
    backend: Arc<dyn ImageBackend>,
    api_key: Option<String>,
    output_dir: PathBuf,
}

impl ImageTool {
    pub fn new(
        backend: Arc<dyn ImageBackend>,
        api_key: Option<String>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            backend,
            api_key,
            output_dir: output_dir.into(),
        }
    }

    /// Generate an image for `prompt` and try to save it locally
    pub fn generate_image(&self, prompt: &str, size: &str, quality: &str) -> ToolResult {
        let preview: String = prompt.chars().take(50).collect();
        tracing::info!(tool = GENERATE_IMAGE, prompt = %preview, size, quality, "tool called");

        let echo = Echo::new()
            .with("prompt", prompt)
            .with("size", size)
            .with("quality", quality);

        if prompt.is_empty() {
            return ToolResult::error(echo, INVALID_PROMPT);
        }
        if prompt.trim().is_empty() {
            return ToolResult::error(echo, EMPTY_PROMPT);
        }
        if !VALID_SIZES.iter().any(|s| *s == size) {
            return ToolResult::error(
                echo,
                format!(
                    "Invalid size '{}'. Valid options: {}",
                    size,
                    VALID_SIZES.join(", ")
                ),
            );
        }
        if !VALID_QUALITIES.iter().any(|q| *q == quality) {
            return ToolResult::error(
                echo,
                format!(
                    "Invalid quality '{}'. Valid options: {}",
                    quality,
                    VALID_QUALITIES.join(", ")
                ),
            );
        }
        let Some(api_key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            return ToolResult::error(echo, MISSING_KEY);
        };

        let request = ImageRequest {
            prompt: prompt.to_string(),
            size: size.to_string(),
            quality: quality.to_string(),
        };

        let image_url = match self.backend.generate(&request, api_key) {
            Ok(url) => url,
            Err(err) => {
                tracing::warn!(tool = GENERATE_IMAGE, error = %err, "image generation failed");
                return ToolResult::error(echo, describe_failure(&err));
            }
        };

        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        let filename = image_filename(prompt, &timestamp);

        let artifact = match self.save(&image_url, &filename) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "image saved");
                ImageArtifact {
                    image_url,
                    local_path: Some(path.display().to_string()),
                    download_error: None,
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to save generated image locally");
                ImageArtifact {
                    image_url,
                    local_path: None,
                    download_error: Some(err),
                }
            }
        };

        ToolResult::success(echo, &artifact)
    }

    /// Download `url` into the output directory
    fn save(&self, url: &str, filename: &str) -> Result<PathBuf, String> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| e.to_string())?;
        let bytes = self.backend.download(url).map_err(|e| e.to_string())?;
        let path = self.output_dir.join(filename);
        std::fs::write(&path, bytes).map_err(|e| e.to_string())?;
        std::path::absolute(&path).map_err(|e| e.to_string())
    }
}

impl Tool for ImageTool {
    fn name(&self) -> &str {
        GENERATE_IMAGE
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec::new(
            GENERATE_IMAGE,
            "Generates an image from a text description and saves it locally. Returns \
             the image URL and the local file path.",
            json!({
                "type": "object",
                "properties": {
                    "prompt": {
                        "type": "string",
                        "description": "A detailed description of the image, e.g. \"A sunset over mountains with purple clouds\"."
                    },
                    "size": {
                        "type": "string",
                        "enum": VALID_SIZES,
                        "description": "Image size. Defaults to 1024x1024."
                    },
                    "quality": {
                        "type": "string",
                        "enum": VALID_QUALITIES,
                        "description": "Image quality. Defaults to standard."
                    }
                },
                "required": ["prompt"]
            }),
        )
    }

    fn invoke(&self, args: &Value) -> ToolResult {
        let args = Args::new(args);
        let echo = || {
            Echo::new()
                .with("prompt", args.raw("prompt"))
                .with("size", args.raw_or("size", DEFAULT_SIZE))
                .with("quality", args.raw_or("quality", DEFAULT_QUALITY))
        };

        let Arg::Present(prompt) = args.str("prompt") else {
            return ToolResult::error(echo(), INVALID_PROMPT);
        };
        let Some(size) = args.str("size").or_default(DEFAULT_SIZE) else {
            return ToolResult::error(
                echo(),
                format!(
                    "Invalid size '{}'. Valid options: {}",
                    args.raw("size"),
                    VALID_SIZES.join(", ")
                ),
            );
        };
        let Some(quality) = args.str("quality").or_default(DEFAULT_QUALITY) else {
            return ToolResult::error(
                echo(),
                format!(
                    "Invalid quality '{}'. Valid options: {}",
                    args.raw("quality"),
                    VALID_QUALITIES.join(", ")
                ),
            );
        };

        self.generate_image(prompt, size, quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    struct StubBackend {
        generated: Result<String, ProviderError>,
        downloaded: Result<Vec<u8>, ProviderError>,
        requests: Mutex<Vec<ImageRequest>>,
    }

    impl StubBackend {
        fn new(
            generated: Result<String, ProviderError>,
            downloaded: Result<Vec<u8>, ProviderError>,
        ) -> Arc<Self> {
            Arc::new(Self {
                generated,
                downloaded,
                requests: Mutex::new(Vec::new()),
            })
        }

        fn working() -> Arc<Self> {
            Self::new(
                Ok("https://images.example.com/cat.png".to_string()),
                Ok(vec![0x89, b'P', b'N', b'G']),
            )
        }
    }

    impl ImageBackend for StubBackend {
        fn generate(
            &self,
            request: &ImageRequest,
            _api_key: &str,
        ) -> Result<String, ProviderError> {
            self.requests.lock().push(request.clone());
            self.generated.clone()
        }

        fn download(&self, _url: &str) -> Result<Vec<u8>, ProviderError> {
            self.downloaded.clone()
        }
    }

    fn tool(backend: Arc<StubBackend>, dir: &TempDir) -> ImageTool {
        ImageTool::new(backend, Some("sk-test".to_string()), dir.path().join("out"))
    }

    fn api_error(status: u16, code: Option<&str>, message: &str) -> ProviderError {
        ProviderError::Api {
            status,
            code: code.map(str::to_string),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_success_saves_file() {
        let dir = TempDir::new().unwrap();
        let result = tool(StubBackend::working(), &dir).generate_image(
            "A cat on a mat!",
            "1024x1024",
            "hd",
        );

        assert!(result.is_success());
        assert_eq!(
            result.get_str("image_url"),
            Some("https://images.example.com/cat.png")
        );
        assert_eq!(result.get_str("quality"), Some("hd"));
        assert!(result.get("download_error").is_none());

        let path = PathBuf::from(result.get_str("local_path").unwrap());
        assert!(path.is_absolute());
        assert_eq!(std::fs::read(&path).unwrap(), vec![0x89, b'P', b'N', b'G']);
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("a_cat_on_a_mat_"));
        assert!(name.ends_with(".png"));
    }

    #[test]
    fn test_download_failure_is_partial_success() {
        let dir = TempDir::new().unwrap();
        let backend = StubBackend::new(
            Ok("https://images.example.com/cat.png".to_string()),
            Err(ProviderError::Connection("connection reset".into())),
        );
        let result = tool(backend, &dir).generate_image("cat", "1024x1024", "standard");

        assert!(result.is_success());
        assert_eq!(result.get("local_path"), Some(&Value::Null));
        assert_eq!(
            result.get_str("download_error"),
            Some("Connection error: connection reset")
        );
        assert!(result.get_str("image_url").is_some());
        assert_eq!(result.error_message(), None);
    }

    #[test]
    fn test_oversized_download_is_partial_success() {
        let dir = TempDir::new().unwrap();
        let backend = StubBackend::new(
            Ok("https://images.example.com/huge.png".to_string()),
            Err(ProviderError::InvalidResponse("Image exceeds 33554432 bytes".into())),
        );
        let result = tool(backend, &dir).generate_image("cat", "1024x1024", "standard");

        assert!(result.is_success());
        assert_eq!(result.get("local_path"), Some(&Value::Null));
        assert_eq!(
            result.get_str("download_error"),
            Some("Invalid response: Image exceeds 33554432 bytes")
        );
        assert_eq!(std::fs::read_dir(dir.path().join("out")).unwrap().count(), 0);
    }

    #[test]
    fn test_unwritable_output_dir_is_partial_success() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();

        let tool = ImageTool::new(StubBackend::working(), Some("sk".into()), blocker.join("out"));
        let result = tool.generate_image("cat", "1024x1024", "standard");
        assert!(result.is_success());
        assert_eq!(result.get("local_path"), Some(&Value::Null));
        assert!(result.get_str("download_error").is_some());
    }

    #[test]
    fn test_validation_gates() {
        let dir = TempDir::new().unwrap();
        let backend = StubBackend::working();
        let tool = tool(backend.clone(), &dir);

        let empty = tool.generate_image("", "1024x1024", "standard");
        assert_eq!(empty.error_message(), Some(INVALID_PROMPT));

        let blank = tool.generate_image("   ", "1024x1024", "standard");
        assert_eq!(blank.error_message(), Some(EMPTY_PROMPT));

        let size = tool.generate_image("cat", "9999x9999", "standard");
        assert_eq!(
            size.error_message(),
            Some("Invalid size '9999x9999'. Valid options: 1024x1024, 1792x1024, 1024x1792")
        );
        assert_eq!(size.get_str("size"), Some("9999x9999"));

        let quality = tool.generate_image("cat", "1024x1024", "ultra");
        assert_eq!(
            quality.error_message(),
            Some("Invalid quality 'ultra'. Valid options: standard, hd")
        );

        assert!(backend.requests.lock().is_empty());
    }

    #[test]
    fn test_missing_key() {
        let dir = TempDir::new().unwrap();
        let backend = StubBackend::working();
        let tool = ImageTool::new(backend.clone(), None, dir.path());
        let result = tool.generate_image("cat", "1024x1024", "standard");
        assert_eq!(result.error_message(), Some(MISSING_KEY));
        assert!(backend.requests.lock().is_empty());
    }

    #[test]
    fn test_rate_limit_text_maps_to_category() {
        let dir = TempDir::new().unwrap();
        let backend = StubBackend::new(
            Err(api_error(429, None, "Rate limit reached for images per minute")),
            Ok(Vec::new()),
        );
        let result = tool(backend, &dir).generate_image("cat", "1024x1024", "standard");
        assert_eq!(
            result.error_message(),
            Some("Image generation failed: Rate limit exceeded. Please try again in a moment.")
        );
    }

    #[test]
    fn test_structured_codes_win_over_text() {
        let quota = api_error(429, Some("insufficient_quota"), "You exceeded your current plan");
        assert_eq!(
            GenerationFailure::classify(&quota),
            Some(GenerationFailure::Quota)
        );

        let policy = api_error(400, Some("content_policy_violation"), "rejected");
        assert_eq!(
            GenerationFailure::classify(&policy),
            Some(GenerationFailure::ContentPolicy)
        );

        let unauthorized = api_error(401, None, "Incorrect key provided");
        assert_eq!(
            GenerationFailure::classify(&unauthorized),
            Some(GenerationFailure::Credential)
        );
    }

    #[test]
    fn test_text_fallback_order() {
        assert_eq!(
            GenerationFailure::classify_text("Incorrect API key provided"),
            Some(GenerationFailure::Credential)
        );
        assert_eq!(
            GenerationFailure::classify_text("Your request was rejected by our content policy"),
            Some(GenerationFailure::ContentPolicy)
        );
        assert_eq!(
            GenerationFailure::classify_text("Insufficient funds: quota exhausted"),
            Some(GenerationFailure::Quota)
        );
        assert_eq!(GenerationFailure::classify_text("boom"), None);
    }

    #[test]
    fn test_unclassified_failure_keeps_raw_text() {
        let dir = TempDir::new().unwrap();
        let backend = StubBackend::new(
            Err(api_error(500, None, "The server had an error")),
            Ok(Vec::new()),
        );
        let result = tool(backend, &dir).generate_image("cat", "1024x1024", "standard");
        assert_eq!(
            result.error_message(),
            Some("Image generation failed: The server had an error")
        );
    }

    #[test]
    fn test_image_filename() {
        assert_eq!(
            image_filename("A futuristic city with flying cars", "20240119_143022"),
            "a_futuristic_city_with_flying_20240119_143022.png"
        );
        assert_eq!(image_filename("!!!", "t"), "image_t.png");
        assert_eq!(image_filename("under_score  ", "t"), "under_score_t.png");
    }

    #[test]
    fn test_invoke_defaults_and_types() {
        let dir = TempDir::new().unwrap();
        let backend = StubBackend::working();
        let tool = tool(backend.clone(), &dir);

        let result = tool.invoke(&json!({"prompt": "a lake"}));
        assert!(result.is_success());
        assert_eq!(result.get_str("size"), Some(DEFAULT_SIZE));
        assert_eq!(result.get_str("quality"), Some(DEFAULT_QUALITY));
        assert_eq!(backend.requests.lock()[0].size, DEFAULT_SIZE);

        let result = tool.invoke(&json!({"prompt": 7}));
        assert_eq!(result.error_message(), Some(INVALID_PROMPT));
        assert_eq!(result.get("prompt"), Some(&json!(7)));

        let result = tool.invoke(&json!({"prompt": "a lake", "size": 1024}));
        assert!(result.error_message().unwrap().starts_with("Invalid size '1024'"));
    }

    #[test]
    fn test_repeat_calls_have_same_shape() {
        let dir = TempDir::new().unwrap();
        let tool = tool(StubBackend::working(), &dir);
        let a = tool.generate_image("cat", "1024x1024", "standard");
        let b = tool.generate_image("cat", "1024x1024", "standard");
        let keys_a: Vec<&str> = a.keys().collect();
        let keys_b: Vec<&str> = b.keys().collect();
        assert_eq!(keys_a, keys_b);
    }
}
