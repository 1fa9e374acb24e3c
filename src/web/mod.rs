//! Browser bindings: `web-sys` implementations of the host traits and the
//! event wiring that feeds the controller.

mod blobs;
mod events;
mod export;
mod region;

pub use blobs::BrowserBlobStore;
pub use events::read_form;
pub use export::BrowserExporter;
pub use region::DomRegion;

use crate::{
    client::ReqwestTransport,
    config::{resolve_endpoint, ControllerConfig},
    controller::Controller,
    error::{GenerateError, Result},
};
use gloo::events::EventListener;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, HtmlFormElement};

#[cfg(test)]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

thread_local! {
    static MOUNTED: RefCell<Option<App>> = const { RefCell::new(None) };
}

pub(crate) fn host_error(context: &str, value: JsValue) -> GenerateError {
    let detail = value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value));
    GenerateError::Host(format!("{}: {}", context, detail))
}

/// A mounted controller together with the DOM listeners that drive it.
pub struct App {
    controller: Rc<Controller>,
    _listeners: Vec<EventListener>,
}

impl App {
    pub fn controller(&self) -> &Rc<Controller> {
        &self.controller
    }
}

/// `lang` attribute of the root element, if any.
pub fn document_language() -> Option<String> {
    web_sys::window()?
        .document()?
        .document_element()?
        .get_attribute("lang")
}

/// Builds the controller against the current document and wires its events.
pub fn mount(config: ControllerConfig) -> Result<App> {
    let window = web_sys::window().ok_or_else(|| GenerateError::Host("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| GenerateError::Host("no document".into()))?;

    let page_url = window
        .location()
        .href()
        .map_err(|e| host_error("page url", e))?;
    let endpoint = resolve_endpoint(&page_url, &config.endpoint)?;
    let config = config.with_endpoint(endpoint);

    let form: HtmlFormElement = document
        .get_element_by_id(&config.form_id)
        .ok_or_else(|| GenerateError::Host(format!("no #{} element", config.form_id)))?
        .dyn_into()
        .map_err(|e| host_error("form cast", e.into()))?;
    let container: HtmlElement = document
        .get_element_by_id(&config.region_id)
        .ok_or_else(|| GenerateError::Host(format!("no #{} element", config.region_id)))?
        .dyn_into()
        .map_err(|e| host_error("region cast", e.into()))?;

    let controller = Rc::new(Controller::new(
        config,
        Rc::new(ReqwestTransport::new()),
        Rc::new(DomRegion::new(document.clone(), container.clone())),
        Rc::new(BrowserBlobStore),
        Rc::new(BrowserExporter::new(window.clone(), document.clone())),
    ));

    let mut listeners = vec![
        events::on_submit(&form, controller.clone()),
        events::on_export_click(&container, controller.clone()),
    ];
    listeners.extend(events::placeholder_listeners(
        &document,
        &controller.config().text_input_selector,
    )?);
    if controller.config().suppress_context_menu {
        listeners.push(events::suppress_context_menu(&window));
    }

    log::info!(
        "Mounted on #{} posting to {}",
        controller.config().form_id,
        controller.config().endpoint
    );

    Ok(App {
        controller,
        _listeners: listeners,
    })
}

/// Mounts once the document has parsed and keeps the app alive for the page's lifetime.
pub fn run(config: ControllerConfig) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("No document to mount on");
        return;
    };

    if still_parsing(&document) {
        EventListener::once(&document, "DOMContentLoaded", move |_| mount_and_keep(config))
            .forget();
    } else {
        mount_and_keep(config);
    }
}

/// `document.readyState` is a plain string: "loading", "interactive" or "complete".
fn still_parsing(document: &Document) -> bool {
    document.ready_state() == "loading"
}

fn mount_and_keep(config: ControllerConfig) {
    match mount(config) {
        Ok(app) => MOUNTED.with(|slot| *slot.borrow_mut() = Some(app)),
        Err(err) => log::error!("Failed to mount: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_parsed_document_mounts_immediately() {
        let document = web_sys::window().unwrap().document().unwrap();
        let state = document.ready_state();
        assert!(state == "interactive" || state == "complete", "{}", state);
        assert!(!still_parsing(&document));
    }

    #[wasm_bindgen_test]
    fn test_mount_reports_missing_form() {
        let config = ControllerConfig::new().with_element_ids("noSuchForm", "noSuchRegion");
        let err = mount(config).err().unwrap();
        assert_eq!(err, GenerateError::Host("no #noSuchForm element".into()));
    }
}
