use super::{HttpResponse, HttpTransport};
use crate::error::{GenerateError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<HttpResponse> {
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| GenerateError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(String::from);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GenerateError::Parsing(e.to_string()))?;

        log::debug!("Response {} ({} bytes)", status, bytes.len());

        Ok(HttpResponse {
            status,
            content_type,
            body: bytes.to_vec(),
        })
    }
}
