use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::components::notification::Notifier;
use crate::dom::Node;
use crate::error::UiError;
use crate::utils::cookie::get_cookie;

pub const PENDING_LABEL: &str = "Sending...";
pub const INVALID_MESSAGE: &str = "Please correct the errors in the form.";
pub const FAILURE_MESSAGE: &str = "Something went wrong.";
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Message sent.";

/// Flat field name to value mapping. Later duplicates win.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ContactPayload(BTreeMap<String, String>);

impl ContactPayload {
    pub fn from_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self(fields.into_iter().collect())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Sent { message: String },
    Invalid { errors: Value },
    Failed,
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Reads the server's reply. Non-JSON bodies are an error; JSON without a
/// recognised shape is [`SubmissionOutcome::Failed`].
pub fn classify_response(body: &str) -> Result<SubmissionOutcome, UiError> {
    let reply: Value = serde_json::from_str(body)?;
    let Value::Object(fields) = reply else {
        return Ok(SubmissionOutcome::Failed);
    };

    if fields.get("success").map(truthy).unwrap_or(false) {
        let message = match fields.get("message") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => DEFAULT_SUCCESS_MESSAGE.to_string(),
            Some(other) => other.to_string(),
        };
        return Ok(SubmissionOutcome::Sent { message });
    }

    match fields.get("errors") {
        Some(errors) if truthy(errors) => Ok(SubmissionOutcome::Invalid {
            errors: errors.clone(),
        }),
        _ => Ok(SubmissionOutcome::Failed),
    }
}

/// Form state the controller reads and mutates.
pub trait FormControls {
    /// Named successful controls, in document order.
    fn fields(&self) -> Vec<(String, String)>;
    fn reset(&self);
    fn submit_label(&self) -> String;
    fn set_submit_label(&self, label: &str);
    fn set_submit_enabled(&self, enabled: bool);
}

#[async_trait(?Send)]
pub trait ContactTransport {
    /// POSTs a JSON body and returns the raw response text.
    async fn post_json(
        &self,
        url: &str,
        csrf: Option<(&str, &str)>,
        body: String,
    ) -> Result<String, UiError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactSettings {
    pub endpoint: String,
    pub csrf_cookie: String,
    pub csrf_header: String,
    pub toast_duration_ms: u32,
}

/// Restores the submit button however the submission ends, once no other
/// submission is still in flight.
struct PendingSubmit<'a, F: FormControls> {
    form: &'a F,
    idle_label: &'a str,
    in_flight: &'a Cell<usize>,
}

impl<'a, F: FormControls> PendingSubmit<'a, F> {
    fn begin(form: &'a F, idle_label: &'a str, in_flight: &'a Cell<usize>) -> Self {
        in_flight.set(in_flight.get() + 1);
        form.set_submit_label(PENDING_LABEL);
        form.set_submit_enabled(false);
        Self {
            form,
            idle_label,
            in_flight,
        }
    }
}

impl<F: FormControls> Drop for PendingSubmit<'_, F> {
    fn drop(&mut self) {
        let remaining = self.in_flight.get().saturating_sub(1);
        self.in_flight.set(remaining);
        if remaining == 0 {
            self.form.set_submit_label(self.idle_label);
            self.form.set_submit_enabled(true);
        }
    }
}

pub struct ContactForm<F: FormControls, N: Node> {
    form: F,
    transport: Rc<dyn ContactTransport>,
    notifier: Notifier<N>,
    cookies: Rc<dyn Fn() -> String>,
    settings: ContactSettings,
    /// Button label as rendered, read before any submission touches it.
    idle_label: String,
    in_flight: Cell<usize>,
    decision: Option<Rc<DecisionFields<N>>>,
}

impl<F: FormControls, N: Node> ContactForm<F, N> {
    pub fn new(
        form: F,
        transport: Rc<dyn ContactTransport>,
        notifier: Notifier<N>,
        cookies: Rc<dyn Fn() -> String>,
        settings: ContactSettings,
    ) -> Self {
        let idle_label = form.submit_label();
        Self {
            form,
            transport,
            notifier,
            cookies,
            settings,
            idle_label,
            in_flight: Cell::new(0),
            decision: None,
        }
    }

    /// Re-syncs the decision-maker fields after a successful send resets the form.
    pub fn with_decision_fields(mut self, decision: Rc<DecisionFields<N>>) -> Self {
        self.decision = Some(decision);
        self
    }

    /// Sends the form once and reports the result through the toast.
    /// Overlapping submissions are not serialized.
    pub async fn submit(&self) -> SubmissionOutcome {
        let _pending = PendingSubmit::begin(&self.form, &self.idle_label, &self.in_flight);

        let payload = ContactPayload::from_fields(self.form.fields());
        log::debug!("Sending {} contact fields", payload.len());

        let outcome = match self.send(&payload).await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("Contact submission failed: {}", e);
                SubmissionOutcome::Failed
            }
        };

        let duration = self.settings.toast_duration_ms;
        match &outcome {
            SubmissionOutcome::Sent { message } => {
                self.notifier.success(message.clone(), duration);
                self.form.reset();
                // reset() fires no change event
                if let Some(decision) = &self.decision {
                    decision.sync();
                }
            }
            SubmissionOutcome::Invalid { errors } => {
                log::debug!("Form errors: {}", errors);
                self.notifier.error(INVALID_MESSAGE, duration);
            }
            SubmissionOutcome::Failed => {
                self.notifier.error(FAILURE_MESSAGE, duration);
            }
        }
        outcome
    }

    async fn send(&self, payload: &ContactPayload) -> Result<SubmissionOutcome, UiError> {
        let body = serde_json::to_string(payload).map_err(|e| UiError::Transport(e.to_string()))?;
        let token = get_cookie(&(self.cookies)(), &self.settings.csrf_cookie);
        let csrf = token
            .as_deref()
            .map(|value| (self.settings.csrf_header.as_str(), value));

        let reply = self
            .transport
            .post_json(&self.settings.endpoint, csrf, body)
            .await?;
        classify_response(&reply)
    }
}

/// Shows the extra decision-maker fields only when the answer is "no".
pub struct DecisionFields<N: Node> {
    select: N,
    fields: N,
}

impl<N: Node> DecisionFields<N> {
    pub fn new(select: N, fields: N) -> Self {
        Self { select, fields }
    }

    pub fn sync(&self) {
        if self.select.value().as_deref() == Some("no") {
            self.fields.remove_class("hidden");
        } else {
            self.fields.add_class("hidden");
        }
    }
}
