use serde::Deserialize;

pub const FALLBACK_CONTENT_TYPE: &str = "image/png";

/// Raw image bytes returned by the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl GeneratedImage {
    pub fn new(bytes: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            bytes,
            content_type,
        }
    }

    pub fn mime(&self) -> &str {
        self.content_type
            .as_deref()
            .filter(|ct| !ct.is_empty())
            .unwrap_or(FALLBACK_CONTENT_TYPE)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Body of a non-success response: `{ "error": string }`.
#[derive(Debug, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl ServiceErrorBody {
    pub fn message(&self) -> Option<&str> {
        self.error
            .as_ref()
            .and_then(|value| value.as_str())
            .filter(|msg| !msg.is_empty())
    }
}

/// Outcome of one generation request, decided by the response status.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResult {
    Image(GeneratedImage),
    Failed { status: u16, error: Option<String> },
}
