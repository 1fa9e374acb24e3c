use super::host_error;
use crate::{
    error::Result,
    host::BlobStore,
    models::{GeneratedImage, ImageHandle},
};
use gloo::timers::callback::Timeout;
use std::rc::Rc;
use std::time::Duration;
use web_sys::{Blob, BlobPropertyBag, Url};

/// Object URLs over `Blob`s built from the response bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserBlobStore;

impl BrowserBlobStore {
    fn revoke(url: &str) {
        if let Err(e) = Url::revoke_object_url(url) {
            log::warn!("Failed to revoke {}: {:?}", url, e);
        }
    }
}

impl BlobStore for BrowserBlobStore {
    fn create(&self, image: Rc<GeneratedImage>) -> Result<ImageHandle> {
        let array = js_sys::Uint8Array::from(image.bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array);

        let options = BlobPropertyBag::new();
        options.set_type(image.mime());

        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| host_error("create blob", e))?;
        let url =
            Url::create_object_url_with_blob(&blob).map_err(|e| host_error("create object URL", e))?;

        log::debug!("Created {} for {} bytes", url, image.len());
        Ok(ImageHandle::new(url, image))
    }

    fn release(&self, handle: &ImageHandle) {
        log::debug!("Releasing {}", handle.url());
        Self::revoke(handle.url());
    }

    fn release_after(&self, handle: ImageHandle, delay: Duration) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, move || {
            log::debug!("Releasing {} after {}ms", handle.url(), millis);
            Self::revoke(handle.url());
        })
        .forget();
    }
}
