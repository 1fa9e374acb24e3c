use super::host_error;
use crate::{
    controller::Controller,
    error::{GenerateError, Result},
    host::ExportAction,
    placeholder::{self, PlaceholderTarget},
};
use gloo::events::{EventListener, EventListenerOptions};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, EventTarget, FormData, HtmlFormElement, HtmlInputElement};

/// Text entries of `form` in document order. File entries are skipped.
pub fn read_form(form: &HtmlFormElement) -> Result<Vec<(String, String)>> {
    let data = FormData::new_with_form(form).map_err(|e| host_error("read form", e))?;
    let entries = js_sys::try_iter(&data)
        .map_err(|e| host_error("iterate form", e))?
        .ok_or_else(|| GenerateError::Host("FormData is not iterable".into()))?;

    let mut fields = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| host_error("form entry", e))?;
        let pair = js_sys::Array::from(&entry);
        if let (Some(key), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
            fields.push((key, value));
        }
    }
    Ok(fields)
}

pub fn on_submit(form: &HtmlFormElement, controller: Rc<Controller>) -> EventListener {
    let target = form.clone();
    EventListener::new_with_options(
        form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            let fields = match read_form(&target) {
                Ok(fields) => fields,
                Err(err) => {
                    log::error!("Could not read the form: {}", err);
                    return;
                }
            };
            let controller = controller.clone();
            spawn_local(async move {
                controller.submit(fields).await;
            });
        },
    )
}

/// The export action of the nearest `data-action` ancestor of a click target.
pub(crate) fn action_for(target: Option<EventTarget>) -> Option<ExportAction> {
    target
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|element| element.closest("[data-action]").ok().flatten())
        .and_then(|element| element.get_attribute("data-action"))
        .and_then(|value| ExportAction::from_attribute(&value))
}

/// Delegated click handling for the `data-action` buttons inside the region.
pub fn on_export_click(region: &EventTarget, controller: Rc<Controller>) -> EventListener {
    EventListener::new(region, "click", move |event| {
        if let Some(action) = action_for(event.target()) {
            if let Err(err) = controller.handle_action(action) {
                log::warn!("{} action failed: {}", action.as_attribute(), err);
            }
        }
    })
}

struct InputPlaceholder<'a>(&'a HtmlInputElement);

impl PlaceholderTarget for InputPlaceholder<'_> {
    fn placeholder(&self) -> String {
        self.0.placeholder()
    }

    fn set_placeholder(&self, text: &str) {
        self.0.set_placeholder(text);
    }

    fn stashed_placeholder(&self) -> Option<String> {
        self.0.dataset().get("placeholder")
    }

    fn stash_placeholder(&self, text: &str) {
        if let Err(e) = self.0.dataset().set("placeholder", text) {
            log::debug!("Could not stash placeholder: {:?}", e);
        }
    }
}

pub fn placeholder_listeners(document: &Document, selector: &str) -> Result<Vec<EventListener>> {
    let inputs = document
        .query_selector_all(selector)
        .map_err(|e| host_error("query text inputs", e))?;

    let mut listeners = Vec::new();
    for index in 0..inputs.length() {
        let Some(input) = inputs
            .item(index)
            .and_then(|node| node.dyn_into::<HtmlInputElement>().ok())
        else {
            continue;
        };

        let focused = input.clone();
        listeners.push(EventListener::new(&input, "focus", move |_| {
            placeholder::on_focus(&InputPlaceholder(&focused));
        }));
        let blurred = input.clone();
        listeners.push(EventListener::new(&input, "blur", move |_| {
            placeholder::on_blur(&InputPlaceholder(&blurred));
        }));
    }

    log::debug!("Watching placeholders on {} inputs", inputs.length());
    Ok(listeners)
}

pub fn suppress_context_menu(target: &EventTarget) -> EventListener {
    EventListener::new_with_options(
        target,
        "contextmenu",
        EventListenerOptions::enable_prevent_default(),
        |event| event.prevent_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        host::{DisplayRegion, ImageView},
        models::FormInput,
        web::DomRegion,
    };
    use wasm_bindgen_test::*;
    use web_sys::HtmlElement;

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn input(document: &Document, kind: &str, name: &str, value: &str) -> HtmlInputElement {
        let input: HtmlInputElement = document.create_element("input").unwrap().dyn_into().unwrap();
        input.set_type(kind);
        input.set_name(name);
        if !value.is_empty() {
            input.set_value(value);
        }
        input
    }

    #[wasm_bindgen_test]
    fn test_read_form_keeps_order_and_skips_files() {
        let document = document();
        let form: HtmlFormElement = document.create_element("form").unwrap().dyn_into().unwrap();
        form.append_child(&input(&document, "text", "name", "  Jane ")).unwrap();
        form.append_child(&input(&document, "file", "attachment", "")).unwrap();
        form.append_child(&input(&document, "text", "address", "1 Main St\t")).unwrap();

        let fields = read_form(&form).unwrap();
        assert_eq!(
            fields,
            vec![
                ("name".to_string(), "  Jane ".to_string()),
                ("address".to_string(), "1 Main St\t".to_string()),
            ]
        );

        let input = FormInput::collect(fields);
        assert_eq!(input.get("name"), Some("Jane"));
        assert_eq!(input.get("address"), Some("1 Main St"));
    }

    #[wasm_bindgen_test]
    fn test_clicks_inside_buttons_resolve_to_their_action() {
        let document = document();
        let container: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
        let region = DomRegion::new(document.clone(), container.clone());
        region.show_image(&ImageView {
            src: "blob:test/1",
            alt: "generated",
            print_label: "Print",
            save_label: "Save",
        });

        let save = container.query_selector("[data-action=\"save\"]").unwrap().unwrap();
        let label = document.create_element("span").unwrap();
        save.append_child(&label).unwrap();
        assert_eq!(action_for(Some(label.into())), Some(ExportAction::Save));

        let print = container.query_selector("[data-action=\"print\"]").unwrap().unwrap();
        assert_eq!(action_for(Some(print.into())), Some(ExportAction::Print));

        let image = container.query_selector("img").unwrap().unwrap();
        assert_eq!(action_for(Some(image.into())), None);
        assert_eq!(action_for(None), None);
    }
}
