use async_trait::async_trait;
use wasm_bindgen::JsCast;
use web_sys::{Document, FormData, HtmlButtonElement, HtmlDocument, HtmlFormElement};

use crate::components::contact_form::{ContactTransport, FormControls};
use crate::error::UiError;
use crate::utils::api::Api;

pub struct DomForm {
    form: HtmlFormElement,
    submit: Option<HtmlButtonElement>,
}

impl DomForm {
    pub fn new(form: HtmlFormElement) -> Self {
        let submit = form
            .query_selector(r#"button[type="submit"]"#)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
        if submit.is_none() {
            log::warn!("Contact form has no submit button");
        }
        Self { form, submit }
    }
}

impl FormControls for DomForm {
    fn fields(&self) -> Vec<(String, String)> {
        let data = match FormData::new_with_form(&self.form) {
            Ok(data) => data,
            Err(e) => {
                log::error!("Failed to read contact form: {:?}", e);
                return Vec::new();
            }
        };
        let Ok(Some(entries)) = js_sys::try_iter(&data) else {
            return Vec::new();
        };
        entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let pair = js_sys::Array::from(&entry);
                // File inputs yield non-string values; they are not sent.
                Some((pair.get(0).as_string()?, pair.get(1).as_string()?))
            })
            .collect()
    }

    fn reset(&self) {
        self.form.reset();
    }

    fn submit_label(&self) -> String {
        self.submit
            .as_ref()
            .and_then(|b| b.text_content())
            .unwrap_or_default()
    }

    fn set_submit_label(&self, label: &str) {
        if let Some(button) = &self.submit {
            button.set_text_content(Some(label));
        }
    }

    fn set_submit_enabled(&self, enabled: bool) {
        if let Some(button) = &self.submit {
            button.set_disabled(!enabled);
        }
    }
}

/// Sends contact submissions through [`Api`].
pub struct FetchTransport;

#[async_trait(?Send)]
impl ContactTransport for FetchTransport {
    async fn post_json(
        &self,
        url: &str,
        csrf: Option<(&str, &str)>,
        body: String,
    ) -> Result<String, UiError> {
        let mut request = Api::post(url).header("Content-Type", "application/json");
        if let Some((header, token)) = csrf {
            request = request.header(header, token);
        }
        let response = request
            .body(body)
            .send()
            .await
            .map_err(|e| UiError::Transport(e.to_string()))?;

        if !response.ok() {
            log::warn!("Contact endpoint answered {}", response.status());
        }
        response
            .text()
            .await
            .map_err(|e| UiError::Transport(e.to_string()))
    }
}

/// `document.cookie`, or an empty string when it cannot be read.
pub fn document_cookies(document: &Document) -> String {
    document
        .dyn_ref::<HtmlDocument>()
        .and_then(|doc| doc.cookie().ok())
        .unwrap_or_default()
}
