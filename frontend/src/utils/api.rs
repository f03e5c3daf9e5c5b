use gloo_net::http::{Request, Response};
use gloo_net::Error as GlooError;
use web_sys::RequestCredentials;

/// Thin builder over `gloo_net` for same-origin calls back to the site.
pub struct Api;

pub struct RequestWrapper {
    request: Request,
    path: String,
    method: String,
}

impl RequestWrapper {
    fn new(path: &str, method: &str) -> Self {
        let request = match method {
            "POST" => Request::post(path),
            _ => Request::get(path),
        }
        .credentials(RequestCredentials::SameOrigin);

        Self {
            request,
            path: path.to_string(),
            method: method.to_string(),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.request = self.request.header(name, value);
        self
    }

    /// Raw body, already serialized by the caller.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.request = self.request.body(body.into());
        self
    }

    /// Sends once. No retries: a failed call is reported to the caller as-is.
    pub async fn send(self) -> Result<Response, GlooError> {
        log::debug!("{} {}", self.method, self.path);
        self.request.send().await
    }
}

impl Api {
    pub fn post(path: &str) -> RequestWrapper {
        RequestWrapper::new(path, "POST")
    }
}
