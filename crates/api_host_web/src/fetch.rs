//! Browser fetch bridge shared by the web API adapters.
//!
//! WASM/JS interop lives in the `imp` module; the non-WASM shim keeps the
//! crate compiling on native targets, where every request fails with a
//! transport error.

use api_host::ApiError;
use serde::de::DeserializeOwned;

#[cfg(target_arch = "wasm32")]
mod imp {
    use api_host::ApiError;
    use serde::de::DeserializeOwned;
    use serde::Deserialize;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, Response};

    #[derive(Deserialize)]
    struct ErrorEnvelope {
        #[serde(default)]
        error: String,
    }

    fn js_error_to_string(err: JsValue) -> String {
        if let Some(text) = err.as_string() {
            return text;
        }
        if let Ok(message) = js_sys::Reflect::get(&err, &JsValue::from_str("message")) {
            if let Some(text) = message.as_string() {
                return text;
            }
        }
        format!("{err:?}")
    }

    fn transport(err: JsValue) -> ApiError {
        ApiError::Transport(js_error_to_string(err))
    }

    async fn perform(method: &str, url: &str, body: Option<&str>) -> Result<Response, ApiError> {
        let init = RequestInit::new();
        init.set_method(method);
        if let Some(body) = body {
            init.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(url, &init).map_err(transport)?;
        request
            .headers()
            .set("Accept", "application/json")
            .map_err(transport)?;
        if body.is_some() {
            request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(transport)?;
        }

        let window = web_sys::window()
            .ok_or_else(|| ApiError::Transport("no window in this context".to_string()))?;
        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(transport)?;
        response
            .dyn_into::<Response>()
            .map_err(|_| ApiError::Transport("fetch resolved to a non-response".to_string()))
    }

    async fn read_text(response: &Response) -> Result<String, ApiError> {
        let promise = response.text().map_err(transport)?;
        let value = JsFuture::from(promise).await.map_err(transport)?;
        Ok(value.as_string().unwrap_or_default())
    }

    fn status_error(response: &Response, body: String) -> ApiError {
        // Prefer the JSON `{ error }` message the routes emit; fall back to
        // the raw body, then the status text.
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .map(|envelope| envelope.error)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                if body.is_empty() {
                    response.status_text()
                } else {
                    body
                }
            });
        ApiError::Status {
            status: response.status(),
            message,
        }
    }

    pub async fn request_json<T: DeserializeOwned>(
        method: &str,
        url: &str,
        body: Option<String>,
    ) -> Result<T, ApiError> {
        let response = perform(method, url, body.as_deref()).await?;
        let text = read_text(&response).await?;
        if !response.ok() {
            return Err(status_error(&response, text));
        }
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn request_unit(method: &str, url: &str) -> Result<(), ApiError> {
        let response = perform(method, url, None).await?;
        if !response.ok() {
            let text = read_text(&response).await?;
            return Err(status_error(&response, text));
        }
        Ok(())
    }

    pub fn encode_component(raw: &str) -> String {
        js_sys::encode_uri_component(raw).into()
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use api_host::ApiError;
    use serde::de::DeserializeOwned;

    fn unsupported() -> ApiError {
        ApiError::Transport("browser fetch is unavailable off the wasm target".to_string())
    }

    pub async fn request_json<T: DeserializeOwned>(
        _method: &str,
        _url: &str,
        _body: Option<String>,
    ) -> Result<T, ApiError> {
        Err(unsupported())
    }

    pub async fn request_unit(_method: &str, _url: &str) -> Result<(), ApiError> {
        Err(unsupported())
    }

    pub fn encode_component(raw: &str) -> String {
        raw.to_string()
    }
}

/// Issues a request and decodes the 2xx JSON body into `T`.
pub(crate) async fn request_json<T: DeserializeOwned>(
    method: &str,
    url: &str,
    body: Option<String>,
) -> Result<T, ApiError> {
    imp::request_json(method, url, body).await
}

/// Issues a request and discards the 2xx body.
pub(crate) async fn request_unit(method: &str, url: &str) -> Result<(), ApiError> {
    imp::request_unit(method, url).await
}

/// URI-component-encodes a query value.
pub(crate) fn encode_component(raw: &str) -> String {
    imp::encode_component(raw)
}
