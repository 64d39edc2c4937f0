//! バックエンド選択
//!
//! `--backend http` は実際のAPI、`--backend memory` はプロセス内ストア。

use std::sync::Arc;

use clap::ValueEnum;
use lifeline_admin_common::{
    InMemoryStore, MemoryStores, Payload, Resource, ResourceService, Result,
};
use serde_json::Value;

use crate::http::HttpService;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    #[default]
    Http,
    Memory,
}

/// 選択済みのバックエンド
#[derive(Clone)]
pub struct Backend {
    kind: BackendKind,
    client: reqwest::Client,
    api_root: String,
    stores: MemoryStores,
}

impl Backend {
    pub fn new(kind: BackendKind, api_root: impl Into<String>) -> Self {
        Self {
            kind,
            client: reqwest::Client::new(),
            api_root: api_root.into(),
            stores: MemoryStores::new(),
        }
    }

    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub fn service<R: Resource>(&self) -> AnyService<R> {
        match self.kind {
            BackendKind::Http => {
                AnyService::Http(HttpService::with_client(self.client.clone(), &self.api_root))
            }
            BackendKind::Memory => AnyService::Memory(self.stores.store::<R>()),
        }
    }
}

/// 実行時に選ぶサービス
pub enum AnyService<R> {
    Http(HttpService<R>),
    Memory(Arc<InMemoryStore<R>>),
}

impl<R: Resource> ResourceService<R> for AnyService<R> {
    async fn list(&self) -> Result<Vec<R>> {
        match self {
            AnyService::Http(s) => s.list().await,
            AnyService::Memory(s) => s.list().await,
        }
    }

    async fn get(&self, id: &str) -> Result<R> {
        match self {
            AnyService::Http(s) => s.get(id).await,
            AnyService::Memory(s) => s.get(id).await,
        }
    }

    async fn create(&self, payload: Payload) -> Result<Value> {
        match self {
            AnyService::Http(s) => s.create(payload).await,
            AnyService::Memory(s) => s.create(payload).await,
        }
    }

    async fn update(&self, id: &str, payload: Payload) -> Result<Value> {
        match self {
            AnyService::Http(s) => s.update(id, payload).await,
            AnyService::Memory(s) => s.update(id, payload).await,
        }
    }

    async fn delete(&self, id: &str) -> Result<Value> {
        match self {
            AnyService::Http(s) => s.delete(id).await,
            AnyService::Memory(s) => s.delete(id).await,
        }
    }
}
