//! reqwestによるリソースサービス
//!
//! `{api_root}/{path}` に対して1回だけリクエストを送る。
//! リトライ・タイムアウトは行わない。

use std::marker::PhantomData;

use lifeline_admin_common::envelope::{decode_ack, decode_list, decode_record, rejection};
use lifeline_admin_common::payload::MultipartForm;
use lifeline_admin_common::service::{endpoint, require_id};
use lifeline_admin_common::{Error, Payload, Resource, ResourceService, Result};
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde_json::Value;

pub struct HttpService<R> {
    client: reqwest::Client,
    api_root: String,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> HttpService<R> {
    pub fn new(api_root: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_root)
    }

    /// 既存のクライアントを共有（コネクションプール）
    pub fn with_client(client: reqwest::Client, api_root: impl Into<String>) -> Self {
        Self {
            client,
            api_root: api_root.into(),
            _resource: PhantomData,
        }
    }

    pub fn url(&self, id: Option<&str>) -> String {
        endpoint::<R>(&self.api_root, id)
    }

    /// 送信して本文を返す（2xx以外はエラー）
    async fn send(&self, request: RequestBuilder) -> Result<String> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        tracing::debug!(resource = %R::KIND, url = %response.url(), status = status.as_u16(), "Response");

        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        if !status.is_success() {
            let error = rejection::<R>(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
                &body,
            );
            tracing::warn!(resource = %R::KIND, status = status.as_u16(), error = %error, "Request rejected");
            return Err(error);
        }

        Ok(body)
    }

    fn with_payload(request: RequestBuilder, payload: Payload) -> Result<RequestBuilder> {
        match payload {
            Payload::Json(body) => Ok(request.json(&body)),
            Payload::Multipart(form) => Ok(request.multipart(multipart_form(form)?)),
        }
    }
}

/// multipart/form-data の組み立て
fn multipart_form(form: MultipartForm) -> Result<Form> {
    let mut multipart = Form::new();
    for (name, value) in form.fields {
        multipart = multipart.text(name, value);
    }

    if let Some(file) = form.file {
        let attachment = file.attachment;
        let part = Part::bytes(attachment.bytes)
            .file_name(attachment.file_name)
            .mime_str(&attachment.mime_type)
            .map_err(|_| Error::invalid(format!("Unsupported file type: {}", attachment.mime_type)))?;
        multipart = multipart.part(file.name, part);
    }

    Ok(multipart)
}

impl<R: Resource> ResourceService<R> for HttpService<R> {
    async fn list(&self) -> Result<Vec<R>> {
        let url = self.url(None);
        tracing::debug!(resource = %R::KIND, %url, "GET");
        let request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-cache");
        let body = self.send(request).await?;
        Ok(decode_list(&body))
    }

    async fn get(&self, id: &str) -> Result<R> {
        let id = require_id::<R>(id)?;
        let url = self.url(Some(id));
        tracing::debug!(resource = %R::KIND, %url, "GET");
        let request = self.client.get(&url).header(ACCEPT, "application/json");
        let body = self.send(request).await?;
        decode_record(&body)
    }

    async fn create(&self, payload: Payload) -> Result<Value> {
        let url = self.url(None);
        tracing::debug!(resource = %R::KIND, %url, multipart = payload.is_multipart(), "POST");
        let request = Self::with_payload(self.client.post(&url), payload)?;
        let body = self.send(request).await?;
        decode_ack(&body)
    }

    async fn update(&self, id: &str, payload: Payload) -> Result<Value> {
        let id = require_id::<R>(id)?;
        let url = self.url(Some(id));
        tracing::debug!(resource = %R::KIND, %url, multipart = payload.is_multipart(), "PUT");
        let request = Self::with_payload(self.client.put(&url), payload)?;
        let body = self.send(request).await?;
        decode_ack(&body)
    }

    async fn delete(&self, id: &str) -> Result<Value> {
        let id = require_id::<R>(id)?;
        let url = self.url(Some(id));
        tracing::debug!(resource = %R::KIND, %url, "DELETE");
        let body = self.send(self.client.delete(&url)).await?;
        decode_ack(&body)
    }
}
