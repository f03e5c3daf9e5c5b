use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::dom::Node;

impl Node for Element {
    fn add_class(&self, name: &str) {
        if let Err(e) = self.class_list().add_1(name) {
            log::warn!("Failed to add class {}: {:?}", name, e);
        }
    }

    fn remove_class(&self, name: &str) {
        if let Err(e) = self.class_list().remove_1(name) {
            log::warn!("Failed to remove class {}: {:?}", name, e);
        }
    }

    fn has_class(&self, name: &str) -> bool {
        self.class_list().contains(name)
    }

    fn set_class_name(&self, value: &str) {
        Element::set_class_name(self, value);
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Some(el) = self.dyn_ref::<HtmlElement>() {
            if let Err(e) = el.style().set_property(property, value) {
                log::warn!("Failed to set {}: {:?}", property, e);
            }
        }
    }

    fn style(&self, property: &str) -> String {
        self.dyn_ref::<HtmlElement>()
            .and_then(|el| el.style().get_property_value(property).ok())
            .unwrap_or_default()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn value(&self) -> Option<String> {
        if let Some(select) = self.dyn_ref::<HtmlSelectElement>() {
            Some(select.value())
        } else if let Some(input) = self.dyn_ref::<HtmlInputElement>() {
            Some(input.value())
        } else {
            self.dyn_ref::<HtmlTextAreaElement>().map(|area| area.value())
        }
    }

    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }

    fn set_inner_html(&self, html: &str) {
        Element::set_inner_html(self, html);
    }

    fn contains(&self, other: &Self) -> bool {
        let other: &web_sys::Node = other;
        web_sys::Node::contains(self, Some(other))
    }

    fn is_same(&self, other: &Self) -> bool {
        let other: &web_sys::Node = other;
        self.is_same_node(Some(other))
    }

    fn query(&self, selector: &str) -> Option<Self> {
        self.query_selector(selector).ok().flatten()
    }
}
