//! リソースサービスの抽象
//!
//! HTTP（reqwest / fetch）とインメモリストアが同じ契約を実装し、
//! ページ側はどの実装かを意識しない。

use std::rc::Rc;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::payload::Payload;
use crate::resource::Resource;

/// 1エンティティ分のCRUD
///
/// WASMではFutureが `Send` にならないため、`Send` 境界は付けない。
#[allow(async_fn_in_trait)]
pub trait ResourceService<R: Resource> {
    /// 一覧（空のコレクションは失敗ではない）
    async fn list(&self) -> Result<Vec<R>>;

    async fn get(&self, id: &str) -> Result<R>;

    /// 作成（応答の形は保証されない）
    async fn create(&self, payload: Payload) -> Result<Value>;

    async fn update(&self, id: &str, payload: Payload) -> Result<Value>;

    /// 削除（空の応答は `null`）
    async fn delete(&self, id: &str) -> Result<Value>;
}

impl<R: Resource, S: ResourceService<R>> ResourceService<R> for &S {
    async fn list(&self) -> Result<Vec<R>> {
        (**self).list().await
    }

    async fn get(&self, id: &str) -> Result<R> {
        (**self).get(id).await
    }

    async fn create(&self, payload: Payload) -> Result<Value> {
        (**self).create(payload).await
    }

    async fn update(&self, id: &str, payload: Payload) -> Result<Value> {
        (**self).update(id, payload).await
    }

    async fn delete(&self, id: &str) -> Result<Value> {
        (**self).delete(id).await
    }
}

impl<R: Resource, S: ResourceService<R>> ResourceService<R> for Rc<S> {
    async fn list(&self) -> Result<Vec<R>> {
        self.as_ref().list().await
    }

    async fn get(&self, id: &str) -> Result<R> {
        self.as_ref().get(id).await
    }

    async fn create(&self, payload: Payload) -> Result<Value> {
        self.as_ref().create(payload).await
    }

    async fn update(&self, id: &str, payload: Payload) -> Result<Value> {
        self.as_ref().update(id, payload).await
    }

    async fn delete(&self, id: &str) -> Result<Value> {
        self.as_ref().delete(id).await
    }
}

impl<R: Resource, S: ResourceService<R>> ResourceService<R> for Arc<S> {
    async fn list(&self) -> Result<Vec<R>> {
        self.as_ref().list().await
    }

    async fn get(&self, id: &str) -> Result<R> {
        self.as_ref().get(id).await
    }

    async fn create(&self, payload: Payload) -> Result<Value> {
        self.as_ref().create(payload).await
    }

    async fn update(&self, id: &str, payload: Payload) -> Result<Value> {
        self.as_ref().update(id, payload).await
    }

    async fn delete(&self, id: &str) -> Result<Value> {
        self.as_ref().delete(id).await
    }
}

/// 空（空白のみ含む）のIDは通信前に拒否
pub fn require_id<R: Resource>(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(Error::invalid(R::KIND.id_required_message()));
    }
    Ok(id)
}

/// 既定のバックエンド
pub const DEFAULT_API_ROOT: &str = "https://life-line-be.onrender.com/api";

/// `{api_root}/{path}` または `{api_root}/{path}/{id}`
pub fn endpoint<R: Resource>(api_root: &str, id: Option<&str>) -> String {
    let base = format!("{}/{}", api_root.trim_end_matches('/'), R::KIND.path());
    match id {
        Some(id) => format!("{}/{}", base, id),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GalleryPhoto, PersonDetail};

    #[test]
    fn test_require_id() {
        assert_eq!(require_id::<GalleryPhoto>(" g1 ").unwrap(), "g1");
        let err = require_id::<GalleryPhoto>("  ").unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(err.to_string(), "Gallery id is required");
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            endpoint::<PersonDetail>("https://api.example.com/api/", None),
            "https://api.example.com/api/personal-detail"
        );
        assert_eq!(
            endpoint::<GalleryPhoto>("http://127.0.0.1:9000", Some("g1")),
            "http://127.0.0.1:9000/gallery/g1"
        );
    }
}
