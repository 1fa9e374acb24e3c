use super::{HttpResponse, HttpTransport};
use crate::{
    error::{GenerateError, Result},
    models::{FormInput, GeneratedImage, GenerationResult, ServiceErrorBody},
};
use std::rc::Rc;

#[derive(Clone)]
pub struct GenerationClient {
    transport: Rc<dyn HttpTransport>,
    endpoint: String,
    fallback_message: String,
}

impl GenerationClient {
    pub fn new(
        transport: Rc<dyn HttpTransport>,
        endpoint: impl Into<String>,
        fallback_message: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            fallback_message: fallback_message.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts `input` once and classifies the response by status.
    pub async fn send(&self, input: &FormInput) -> Result<GenerationResult> {
        let payload = serde_json::to_value(input)
            .map_err(|e| GenerateError::Transport(e.to_string()))?;

        log::info!(
            "Requesting generation from {} ({} fields)",
            self.endpoint,
            input.len()
        );

        let response = self.transport.post_json(&self.endpoint, &payload).await?;
        Ok(Self::classify(response))
    }

    /// Like [`send`](Self::send), but a failed status becomes `GenerateError::Service`.
    pub async fn generate(&self, input: &FormInput) -> Result<GeneratedImage> {
        match self.send(input).await? {
            GenerationResult::Image(image) => Ok(image),
            GenerationResult::Failed { status, error } => {
                let message = error.unwrap_or_else(|| self.fallback_message.clone());
                log::warn!("Generation failed with status {}: {}", status, message);
                Err(GenerateError::Service { status, message })
            }
        }
    }

    fn classify(response: HttpResponse) -> GenerationResult {
        if response.is_success() {
            return GenerationResult::Image(GeneratedImage::new(
                response.body,
                response.content_type,
            ));
        }

        let error = match serde_json::from_slice::<ServiceErrorBody>(&response.body) {
            Ok(body) => body.message().map(String::from),
            Err(e) => {
                log::warn!("Error response body is not JSON: {}", e);
                None
            }
        };

        GenerationResult::Failed {
            status: response.status,
            error,
        }
    }
}
