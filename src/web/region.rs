use super::host_error;
use crate::{
    error::Result,
    host::{classes, DisplayRegion, ExportAction, ImageView},
};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlImageElement, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition,
};

/// `#responseContainer`, rebuilt from scratch on every render.
///
/// Dynamic text only ever goes through `set_text_content` and attribute
/// setters, so server-supplied messages cannot inject markup.
pub struct DomRegion {
    document: Document,
    container: HtmlElement,
}

impl DomRegion {
    pub fn new(document: Document, container: HtmlElement) -> Self {
        Self {
            document,
            container,
        }
    }

    fn element(&self, tag: &str, class: &str) -> Result<Element> {
        let element = self
            .document
            .create_element(tag)
            .map_err(|e| host_error("create element", e))?;
        if !class.is_empty() {
            element.set_class_name(class);
        }
        Ok(element)
    }

    fn text_box(&self, class: &str, text: &str) -> Result<Element> {
        let element = self.element("div", class)?;
        element.set_text_content(Some(text));
        Ok(element)
    }

    fn button(&self, action: ExportAction, class: &str, label: &str) -> Result<Element> {
        let button: HtmlButtonElement = self
            .element("button", class)?
            .dyn_into()
            .map_err(|e| host_error("button cast", e.into()))?;
        button.set_type("button");
        button
            .set_attribute("data-action", action.as_attribute())
            .map_err(|e| host_error("set data-action", e))?;
        button.set_text_content(Some(label));
        Ok(button.into())
    }

    fn image_result(&self, view: &ImageView<'_>) -> Result<Element> {
        let result = self.element("div", classes::IMAGE_RESULT)?;

        let image: HtmlImageElement = self
            .element("img", "")?
            .dyn_into()
            .map_err(|e| host_error("image cast", e.into()))?;
        image.set_src(view.src);
        image.set_alt(view.alt);
        image.set_draggable(false);

        let actions = self.element("div", classes::IMAGE_ACTIONS)?;
        actions
            .append_child(&self.button(ExportAction::Print, classes::PRINT_BUTTON, view.print_label)?)
            .map_err(|e| host_error("append print button", e))?;
        actions
            .append_child(&self.button(ExportAction::Save, classes::SAVE_BUTTON, view.save_label)?)
            .map_err(|e| host_error("append save button", e))?;

        result
            .append_child(&image)
            .map_err(|e| host_error("append image", e))?;
        result
            .append_child(&actions)
            .map_err(|e| host_error("append actions", e))?;
        Ok(result)
    }

    fn replace_with(&self, content: Result<Element>) {
        self.clear();
        let appended = content.and_then(|node| {
            self.container
                .append_child(&node)
                .map(|_| ())
                .map_err(|e| host_error("append to region", e))
        });
        if let Err(err) = appended {
            log::error!("Failed to render display region: {}", err);
        }
    }
}

impl DisplayRegion for DomRegion {
    fn clear(&self) {
        self.container.set_text_content(None);
    }

    fn show_status(&self, text: &str) {
        self.replace_with(self.text_box(classes::LOADING, text));
    }

    fn show_error(&self, text: &str) {
        self.replace_with(self.text_box(classes::ERROR, text));
    }

    fn show_image(&self, view: &ImageView<'_>) {
        self.replace_with(self.image_result(view));
    }

    fn reveal(&self) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::End);
        self.container
            .scroll_into_view_with_scroll_into_view_options(&options);
    }
}
