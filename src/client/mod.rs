pub mod generation_client;
pub mod transport;

use crate::error::Result;
use async_trait::async_trait;

pub use generation_client::GenerationClient;
pub use transport::ReqwestTransport;

/// A fully read HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: None,
            body: body.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one JSON POST and reads the whole response body.
///
/// Futures are not `Send`: the browser fetch backend lives on the main thread.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<HttpResponse>;
}
