//! Background removal over `fetch`.

use luvima_core::remote::{is_success_status, FORM_FIELD, FORM_FILE_NAME};
use luvima_core::{BackgroundRemover, RemoveBgError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, Response};

use crate::download::bytes_to_blob;

/// Posts the image as multipart form data to an HTTP endpoint.
pub struct FetchRemover {
    endpoint: String,
}

impl FetchRemover {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl BackgroundRemover for FetchRemover {
    async fn remove_background(&self, png: Vec<u8>) -> Result<Vec<u8>, RemoveBgError> {
        log::debug!("POST {} ({} bytes)", self.endpoint, png.len());

        let window =
            web_sys::window().ok_or_else(|| RemoveBgError::Network("no global window".into()))?;

        let blob = bytes_to_blob(&png, "image/png").map_err(network_error)?;
        let form = FormData::new().map_err(network_error)?;
        form.append_with_blob_and_filename(FORM_FIELD, &blob, FORM_FILE_NAME)
            .map_err(network_error)?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&form);
        let request = Request::new_with_str_and_init(&self.endpoint, &init).map_err(network_error)?;

        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(network_error)?
            .dyn_into()
            .map_err(network_error)?;

        if !is_success_status(response.status()) {
            return Err(RemoveBgError::Status(response.status()));
        }

        let buffer = JsFuture::from(response.array_buffer().map_err(network_error)?)
            .await
            .map_err(network_error)?;

        Ok(js_sys::Uint8Array::new(&buffer).to_vec())
    }
}

/// Turn a rejected JS value into a readable network error.
fn network_error(value: JsValue) -> RemoveBgError {
    let message = match value.dyn_ref::<js_sys::Error>() {
        Some(error) => String::from(error.message()),
        None => value.as_string().unwrap_or_else(|| format!("{value:?}")),
    };
    RemoveBgError::Network(message)
}
