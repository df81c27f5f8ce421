//! Provider error types

use std::fmt;

/// Error type for outbound provider calls (news search, image generation,
/// chat completions)
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Network/connection error (DNS, refused, reset)
    Connection(String),

    /// Request timeout
    Timeout,

    /// The provider answered with a failure status
    Api {
        status: u16,
        /// Structured error code when the provider sent one
        code: Option<String>,
        message: String,
    },

    /// The provider answered but the body could not be understood
    InvalidResponse(String),

    /// Internal error
    Internal(String),
}

impl ProviderError {
    /// Timeouts and connection failures, as opposed to provider answers
    pub fn is_transport(&self) -> bool {
        matches!(self, ProviderError::Connection(_) | ProviderError::Timeout)
    }

    /// Structured error code, if the provider sent one
    pub fn code(&self) -> Option<&str> {
        match self {
            ProviderError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// The provider's own message text, without our prefix
    pub fn raw_message(&self) -> String {
        match self {
            ProviderError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Connection(msg) => write!(f, "Connection error: {}", msg),
            ProviderError::Timeout => write!(f, "Request timed out"),
            ProviderError::Api {
                status, message, ..
            } => write!(f, "API error ({}): {}", status, message),
            ProviderError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            ProviderError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

impl From<ureq::Error> for ProviderError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => {
                let body = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());
                let (code, message) = parse_error_body(&body);
                ProviderError::Api {
                    status,
                    code,
                    message,
                }
            }
            ureq::Error::Transport(transport) => {
                let text = transport.to_string();
                if text.to_lowercase().contains("timed out") {
                    ProviderError::Timeout
                } else {
                    ProviderError::Connection(text)
                }
            }
        }
    }
}

impl From<std::io::Error> for ProviderError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;

        match err.kind() {
            ErrorKind::TimedOut => ProviderError::Timeout,
            // the peer went away while the body was being read
            ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::BrokenPipe
            | ErrorKind::UnexpectedEof
            | ErrorKind::NotConnected => ProviderError::Connection(err.to_string()),
            _ => ProviderError::Internal(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::InvalidResponse(format!("JSON error: {}", err))
    }
}

/// Pull `(code, message)` out of a provider error body.
///
/// Understands the OpenAI shape (`{"error": {"message", "code"}}`) and the
/// NewsAPI shape (`{"status": "error", "code", "message"}`). Anything else is
/// returned verbatim as the message.
fn parse_error_body(body: &str) -> (Option<String>, String) {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return (None, body.trim().to_string());
    };

    let source = json.get("error").filter(|e| e.is_object()).unwrap_or(&json);

    let message = source
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string());

    let code = source
        .get("code")
        .and_then(|c| c.as_str())
        .or_else(|| source.get("type").and_then(|t| t.as_str()))
        .map(str::to_string);

    (code, message)
}
