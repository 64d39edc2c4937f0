//! インメモリストア
//!
//! バックエンドなしで動かすための `ResourceService` 実装。
//! 状態は明示的なオブジェクトとして持ち、`reset()` で初期化できる。

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::payload::Payload;
use crate::resource::Resource;
use crate::service::{require_id, ResourceService};

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Debug, Default)]
struct State {
    records: Vec<Map<String, Value>>,
    next_id: u64,
}

pub struct InMemoryStore<R> {
    state: Mutex<State>,
    calls: AtomicUsize,
    clock: Clock,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Default for InMemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> InMemoryStore<R> {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// 時刻を固定したい場合（テスト）
    pub fn with_clock(clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        Self {
            state: Mutex::new(State {
                records: Vec::new(),
                next_id: 1,
            }),
            calls: AtomicUsize::new(0),
            clock: Box::new(clock),
            _resource: PhantomData,
        }
    }

    /// 初期データを投入（IDがなければ採番）
    pub fn seed(&self, records: impl IntoIterator<Item = R>) -> Result<()> {
        let mut state = self.lock();
        for record in records {
            let Value::Object(mut object) = serde_json::to_value(&record)? else {
                return Err(Error::MalformedResponse(format!(
                    "{} did not serialize to an object",
                    R::KIND.noun()
                )));
            };
            if !object.contains_key("id") {
                let id = state.allocate_id();
                object.insert("id".to_string(), Value::String(id));
            }
            state.records.push(object);
        }
        Ok(())
    }

    /// 空の初期状態に戻す
    pub fn reset(&self) {
        *self.lock() = State {
            records: Vec::new(),
            next_id: 1,
        };
        self.calls.store(0, Ordering::SeqCst);
    }

    /// 検証を通過して実行された呼び出しの回数
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn timestamp(&self) -> Value {
        Value::String((self.clock)().to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    fn url_field() -> Option<&'static str> {
        R::schema().attachment.map(|spec| spec.url_field)
    }

    fn not_found() -> Error {
        Error::rejection(404, R::KIND.not_found_message())
    }
}

/// リソース型ごとのストアをまとめて持つ
///
/// 同じ型には常に同じストアを返すので、画面や呼び出しをまたいで記録が残る。
/// クローンは同じ中身を共有する。
#[derive(Clone, Default)]
pub struct MemoryStores {
    stores: Arc<Mutex<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>>,
}

impl MemoryStores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store<R: Resource>(&self) -> Arc<InMemoryStore<R>> {
        let shared = self
            .stores
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(TypeId::of::<R>())
            .or_insert_with(|| Arc::new(InMemoryStore::<R>::new()))
            .clone();

        match shared.downcast::<InMemoryStore<R>>() {
            Ok(store) => store,
            Err(_) => {
                tracing::warn!(resource = %R::KIND, "Store registry type mismatch");
                Arc::new(InMemoryStore::new())
            }
        }
    }
}

impl State {
    fn allocate_id(&mut self) -> String {
        let id = self.next_id;
        self.next_id += 1;
        id.to_string()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.get("id").and_then(Value::as_str) == Some(id))
    }
}

impl<R: Resource> ResourceService<R> for InMemoryStore<R> {
    async fn list(&self) -> Result<Vec<R>> {
        self.record_call();
        let records = self.lock().records.clone();
        records
            .into_iter()
            .map(|object| R::decode(Value::Object(object)))
            .collect()
    }

    async fn get(&self, id: &str) -> Result<R> {
        let id = require_id::<R>(id)?;
        self.record_call();
        let state = self.lock();
        let index = state.position(id).ok_or_else(Self::not_found)?;
        R::decode(Value::Object(state.records[index].clone()))
    }

    async fn create(&self, payload: Payload) -> Result<Value> {
        self.record_call();
        let mut object = payload.to_object(Self::url_field());
        let now = self.timestamp();

        let mut state = self.lock();
        let id = state.allocate_id();
        object.insert("id".to_string(), Value::String(id.clone()));
        object.insert("createdAt".to_string(), now.clone());
        object.insert("updatedAt".to_string(), now);
        state.records.push(object.clone());

        tracing::debug!(resource = %R::KIND, id = %id, "Created in-memory record");
        Ok(Value::Object(object))
    }

    async fn update(&self, id: &str, payload: Payload) -> Result<Value> {
        let id = require_id::<R>(id)?;
        self.record_call();
        let changes = payload.to_object(Self::url_field());
        let now = self.timestamp();

        let mut state = self.lock();
        let index = state.position(id).ok_or_else(Self::not_found)?;
        let record = &mut state.records[index];
        // URLが送られなければ既存の画像を維持
        for (key, value) in changes {
            if key == "id" {
                continue;
            }
            record.insert(key, value);
        }
        record.insert("updatedAt".to_string(), now);
        Ok(Value::Object(record.clone()))
    }

    async fn delete(&self, id: &str) -> Result<Value> {
        let id = require_id::<R>(id)?;
        self.record_call();
        let mut state = self.lock();
        let index = state.position(id).ok_or_else(Self::not_found)?;
        Ok(Value::Object(state.records.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use futures::executor::block_on;

    use crate::draft::{Attachment, Draft};
    use crate::payload::{build, Mode};
    use crate::types::{Category, SlideImage};

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()
    }

    fn category_payload(name: &str) -> Payload {
        build(
            Category::schema(),
            &Draft::new().with("categoryname", name),
            Mode::Create,
        )
    }

    #[test]
    fn test_empty_list() {
        let store = InMemoryStore::<Category>::new();
        let records = block_on(store.list()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_create_then_list() {
        let store = InMemoryStore::<Category>::with_clock(fixed_clock);
        let created = block_on(store.create(category_payload("Banners"))).unwrap();
        assert_eq!(created["id"], "1");
        assert_eq!(created["createdAt"], "2026-03-01T09:30:00.000Z");

        let records = block_on(store.list()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label(), "Banners");
    }

    #[test]
    fn test_create_is_not_idempotent() {
        let store = InMemoryStore::<Category>::new();
        block_on(store.create(category_payload("Same"))).unwrap();
        block_on(store.create(category_payload("Same"))).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_empty_id_is_rejected_without_call() {
        let store = InMemoryStore::<Category>::new();
        let err = block_on(store.delete("")).unwrap_err();
        assert!(err.is_invalid_argument());
        let err = block_on(store.get(" ")).unwrap_err();
        assert_eq!(err.to_string(), "Category id is required");
        assert_eq!(store.call_count(), 0);
    }

    #[test]
    fn test_delete_twice_is_rejected() {
        let store = InMemoryStore::<Category>::new();
        block_on(store.create(category_payload("Gone"))).unwrap();
        block_on(store.delete("1")).unwrap();

        let err = block_on(store.delete("1")).unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Category not found");
    }

    #[test]
    fn test_file_is_stored_as_data_url_and_kept_on_update() {
        let store = InMemoryStore::<SlideImage>::new();
        let mut draft = Draft::new();
        draft.attach(Attachment::new("s.png", "image/png", vec![1, 2, 3]));
        block_on(store.create(build(SlideImage::schema(), &draft, Mode::Create))).unwrap();

        let stored = block_on(store.get("1")).unwrap();
        assert!(stored.image_url.starts_with("data:image/png;base64,"));

        // 新しいファイルも既存URLもない更新
        block_on(store.update("1", Payload::Json(Map::new()))).unwrap();
        let kept = block_on(store.get("1")).unwrap();
        assert_eq!(kept.image_url, stored.image_url);
    }

    #[test]
    fn test_seed_and_reset() {
        let store = InMemoryStore::<Category>::new();
        store
            .seed(vec![
                Category {
                    categoryname: "A".into(),
                    ..Default::default()
                },
                Category {
                    id: Some("fixed".into()),
                    categoryname: "B".into(),
                    ..Default::default()
                },
            ])
            .unwrap();
        assert_eq!(block_on(store.get("fixed")).unwrap().label(), "B");
        assert_eq!(block_on(store.get("1")).unwrap().label(), "A");

        store.reset();
        assert!(store.is_empty());
        assert_eq!(store.call_count(), 0);
        let created = block_on(store.create(category_payload("C"))).unwrap();
        assert_eq!(created["id"], "1");
    }

    #[test]
    fn test_registry_shares_store_per_type() {
        let stores = MemoryStores::new();
        block_on(stores.store::<Category>().create(category_payload("Kept"))).unwrap();

        let again = stores.clone().store::<Category>();
        assert_eq!(again.len(), 1);
        assert_eq!(block_on(again.get("1")).unwrap().label(), "Kept");
        assert!(stores.store::<SlideImage>().is_empty());
    }
}
