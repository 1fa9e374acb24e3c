//! Browser controller for a single image generation form.
//!
//! The controller reads `#generateForm`, posts its trimmed fields as JSON to
//! the generation endpoint and renders the returned image, with print and
//! save actions, into `#responseContainer`. All browser access sits behind the
//! traits in [`host`] and [`client`], so the state machine in [`controller`]
//! runs anywhere; the [`web`] module supplies the `web-sys` implementations.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod host;
pub mod logger;
pub mod models;
pub mod placeholder;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{GenerationClient, HttpResponse, HttpTransport, ReqwestTransport};
pub use config::{ControllerConfig, Messages};
pub use controller::{Controller, SubmitOutcome};
pub use error::{GenerateError, Result};
pub use models::{FormInput, GeneratedImage, GenerationResult, ImageHandle, RenderState};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let messages = web::document_language()
        .map(|lang| Messages::for_language(&lang))
        .unwrap_or_default();
    let config = ControllerConfig::new().with_messages(messages);

    if let Err(e) = logger::init_with_config(config.logger.clone()) {
        web_sys::console::warn_1(&e.into());
    }

    log::info!("Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    web::run(config);
}
