use super::host_error;
use crate::{
    error::{GenerateError, Result},
    host::{Exporter, PrintPage},
    models::ImageHandle,
};
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlAnchorElement, HtmlImageElement, Window};

const PRINT_BODY_STYLE: &str =
    "margin: 0; display: flex; justify-content: center; align-items: center; min-height: 100vh;";
const PRINT_IMAGE_STYLE: &str = "max-width: 100%; height: auto;";

/// Runs `on_load` or `on_error`, whichever event the image fires first, then
/// detaches both listeners.
pub(crate) fn on_image_settled(
    image: &HtmlImageElement,
    on_load: impl FnOnce() + 'static,
    on_error: impl FnOnce() + 'static,
) {
    let listeners: Rc<RefCell<Vec<EventListener>>> = Rc::default();

    let settled = listeners.clone();
    let load = EventListener::once(image, "load", move |_| {
        detach_later(&settled);
        on_load();
    });
    let settled = listeners.clone();
    let error = EventListener::once(image, "error", move |_| {
        detach_later(&settled);
        on_error();
    });
    listeners.borrow_mut().extend([load, error]);
}

// A listener cannot be dropped from inside its own callback.
fn detach_later(listeners: &Rc<RefCell<Vec<EventListener>>>) {
    let pending = std::mem::take(&mut *listeners.borrow_mut());
    Timeout::new(0, move || drop(pending)).forget();
}

pub struct BrowserExporter {
    window: Window,
    document: Document,
}

impl BrowserExporter {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }
}

impl Exporter for BrowserExporter {
    fn print(&self, handle: &ImageHandle, page: &PrintPage<'_>) -> Result<()> {
        let popup = self
            .window
            .open_with_url_and_target("", "_blank")
            .map_err(|e| host_error("open print window", e))?
            .ok_or(GenerateError::PrintBlocked)?;
        let doc = popup.document().ok_or(GenerateError::PrintBlocked)?;

        doc.set_title(page.title);
        let body = doc
            .body()
            .ok_or_else(|| GenerateError::Host("print window has no body".into()))?;
        body.set_attribute("style", PRINT_BODY_STYLE)
            .map_err(|e| host_error("style print body", e))?;

        let image: HtmlImageElement = doc
            .create_element("img")
            .map_err(|e| host_error("create print image", e))?
            .dyn_into()
            .map_err(|e| host_error("print image cast", e.into()))?;
        image
            .set_attribute("style", PRINT_IMAGE_STYLE)
            .map_err(|e| host_error("style print image", e))?;
        image.set_alt(page.alt);

        // Print once the image has decoded, otherwise the page comes out blank.
        // The handle may also be revoked before the popup loads it.
        let (loaded, failed) = (popup.clone(), popup.clone());
        let url = handle.url().to_string();
        on_image_settled(
            &image,
            move || {
                let _ = loaded.focus();
                if let Err(e) = loaded.print() {
                    log::warn!("print() failed: {:?}", e);
                }
            },
            move || {
                log::warn!("Print image {} failed to load", url);
                if let Err(e) = failed.close() {
                    log::debug!("close() failed: {:?}", e);
                }
            },
        );

        image.set_src(handle.url());
        body.append_child(&image)
            .map_err(|e| host_error("append print image", e))?;
        Ok(())
    }

    fn download(&self, handle: &ImageHandle, filename: &str) -> Result<()> {
        let anchor: HtmlAnchorElement = self
            .document
            .create_element("a")
            .map_err(|e| host_error("create anchor", e))?
            .dyn_into()
            .map_err(|e| host_error("anchor cast", e.into()))?;
        anchor.set_href(handle.url());
        anchor.set_download(filename);

        let body = self
            .document
            .body()
            .ok_or_else(|| GenerateError::Host("document has no body".into()))?;
        body.append_child(&anchor)
            .map_err(|e| host_error("append anchor", e))?;
        anchor.click();
        anchor.remove();
        Ok(())
    }
}
