//! Browser transport backed by `gloo-net` (`fetch`).

use async_trait::async_trait;
use gloo_net::http::Request;

use super::http::{FilePart, HttpMethod, HttpTransport, OutgoingRequest, RawResponse, RequestBody, TransportError};

#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

fn js_error(err: wasm_bindgen::JsValue) -> TransportError {
    TransportError::Request(format!("{err:?}"))
}

fn multipart_form(part: &FilePart) -> Result<web_sys::FormData, TransportError> {
    let form = web_sys::FormData::new().map_err(js_error)?;
    let bytes = js_sys::Uint8Array::from(part.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let blob = web_sys::Blob::new_with_u8_array_sequence(&parts).map_err(js_error)?;
    form.append_with_blob_and_filename(&part.field, &blob, &part.file_name)
        .map_err(js_error)?;
    Ok(form)
}

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
            HttpMethod::Put => Request::put(&request.url),
            HttpMethod::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let outgoing = match &request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(value) => builder.body(value.to_string()),
            RequestBody::Multipart(part) => builder.body(multipart_form(part)?),
        }
        .map_err(|e| TransportError::Request(e.to_string()))?;

        let response = outgoing
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;
        Ok(RawResponse { status, body })
    }
}
