use super::image::GeneratedImage;
use std::rc::Rc;

/// Object URL pointing at in-memory image data.
///
/// Only meaningful for the current page session. Whoever holds the handle in
/// a `RenderState::Success` (or a pending save) must release it through the
/// `BlobStore` that minted it.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageHandle {
    url: String,
    image: Rc<GeneratedImage>,
}

impl ImageHandle {
    pub fn new(url: impl Into<String>, image: Rc<GeneratedImage>) -> Self {
        Self {
            url: url.into(),
            image,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn image(&self) -> &Rc<GeneratedImage> {
        &self.image
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RenderState {
    #[default]
    Idle,
    Loading,
    Success(ImageHandle),
    Error(String),
}

impl RenderState {
    pub fn name(&self) -> &'static str {
        match self {
            RenderState::Idle => "idle",
            RenderState::Loading => "loading",
            RenderState::Success(_) => "success",
            RenderState::Error(_) => "error",
        }
    }

    pub fn handle(&self) -> Option<&ImageHandle> {
        match self {
            RenderState::Success(handle) => Some(handle),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RenderState::Error(message) => Some(message),
            _ => None,
        }
    }
}
