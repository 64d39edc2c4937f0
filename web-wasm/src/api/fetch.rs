//! fetch APIによるリソースサービス
//!
//! 添付ファイルは FormData + Blob、それ以外は JSON で送る。

use std::marker::PhantomData;

use lifeline_admin_common::envelope::{decode_ack, decode_list, decode_record, rejection};
use lifeline_admin_common::payload::MultipartForm;
use lifeline_admin_common::service::{endpoint, require_id};
use lifeline_admin_common::{Error, Payload, Resource, ResourceService, Result};
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestCache, RequestInit, RequestMode, Response};

/// 送信する本文
enum Body {
    Empty,
    Json(String),
    Form(FormData),
}

pub struct FetchService<R> {
    api_root: String,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for FetchService<R> {
    fn clone(&self) -> Self {
        Self {
            api_root: self.api_root.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> FetchService<R> {
    pub fn new(api_root: impl Into<String>) -> Self {
        Self {
            api_root: api_root.into(),
            _resource: PhantomData,
        }
    }

    fn url(&self, id: Option<&str>) -> String {
        endpoint::<R>(&self.api_root, id)
    }

    /// 送信して本文を返す（2xx以外はエラー）
    async fn send(&self, method: &str, url: &str, body: Body, no_store: bool) -> Result<String> {
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);
        if no_store {
            opts.set_cache(RequestCache::NoStore);
        }
        let is_json = matches!(body, Body::Json(_));
        match &body {
            Body::Empty => {}
            Body::Json(text) => opts.set_body(&JsValue::from_str(text)),
            Body::Form(form) => opts.set_body(form),
        }

        let request = Request::new_with_str_and_init(url, &opts).map_err(transport)?;
        let headers = request.headers();
        headers.set("Accept", "application/json").map_err(transport)?;
        if is_json {
            headers
                .set("Content-Type", "application/json")
                .map_err(transport)?;
        }

        let window = web_sys::window()
            .ok_or_else(|| Error::Transport("window is not available".into()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(transport)?;
        let resp: Response = resp_value.dyn_into().map_err(transport)?;

        let text = JsFuture::from(resp.text().map_err(transport)?)
            .await
            .map_err(transport)?
            .as_string()
            .unwrap_or_default();

        if !resp.ok() {
            let error = rejection::<R>(resp.status(), &resp.status_text(), &text);
            web_sys::console::warn_1(&format!("{} {}: {}", method, url, error).into());
            return Err(error);
        }
        Ok(text)
    }

    fn body(payload: Payload) -> Result<Body> {
        match payload {
            Payload::Json(map) => Ok(Body::Json(serde_json::to_string(&map)?)),
            Payload::Multipart(form) => Ok(Body::Form(form_data(form)?)),
        }
    }
}

/// JSの例外を通信エラーに
fn transport(value: JsValue) -> Error {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| "unknown error".to_string());
    Error::Transport(message)
}

/// FormData の組み立て
fn form_data(form: MultipartForm) -> Result<FormData> {
    let data = FormData::new().map_err(transport)?;
    for (name, value) in &form.fields {
        data.append_with_str(name, value).map_err(transport)?;
    }

    if let Some(file) = form.file {
        let attachment = file.attachment;
        let bytes = js_sys::Uint8Array::from(attachment.bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&bytes);

        let options = BlobPropertyBag::new();
        options.set_type(&attachment.mime_type);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(transport)?;
        data.append_with_blob_and_filename(&file.name, &blob, &attachment.file_name)
            .map_err(transport)?;
    }

    Ok(data)
}

impl<R: Resource> ResourceService<R> for FetchService<R> {
    async fn list(&self) -> Result<Vec<R>> {
        let body = self.send("GET", &self.url(None), Body::Empty, true).await?;
        Ok(decode_list(&body))
    }

    async fn get(&self, id: &str) -> Result<R> {
        let id = require_id::<R>(id)?;
        let body = self.send("GET", &self.url(Some(id)), Body::Empty, false).await?;
        decode_record(&body)
    }

    async fn create(&self, payload: Payload) -> Result<Value> {
        let body = self
            .send("POST", &self.url(None), Self::body(payload)?, false)
            .await?;
        decode_ack(&body)
    }

    async fn update(&self, id: &str, payload: Payload) -> Result<Value> {
        let id = require_id::<R>(id)?;
        let body = self
            .send("PUT", &self.url(Some(id)), Self::body(payload)?, false)
            .await?;
        decode_ack(&body)
    }

    async fn delete(&self, id: &str) -> Result<Value> {
        let id = require_id::<R>(id)?;
        let body = self
            .send("DELETE", &self.url(Some(id)), Body::Empty, false)
            .await?;
        decode_ack(&body)
    }
}
