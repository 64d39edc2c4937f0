//! リソース定義トレイト
//!
//! エンティティごとの差分（パス、フォーム、表示、正規化）を
//! このトレイトの実装に閉じ込め、ページとサービスは共通化する。

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::draft::Draft;
use crate::error::{Error, Result};
use crate::kind::ResourceKind;
use crate::schema::ResourceSchema;
use crate::types::Category;

/// 一覧表示で他リソースを参照するための文脈
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelContext<'a> {
    pub categories: &'a [Category],
}

pub trait Resource: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    const KIND: ResourceKind;

    /// 編集ダイアログを提供するか
    const EDITABLE: bool = true;

    /// 一覧表示にカテゴリ一覧が必要か
    const NEEDS_CATEGORIES: bool = false;

    fn schema() -> &'static ResourceSchema;

    fn id(&self) -> Option<&str>;

    /// 一覧・選択肢に表示する名前
    fn label(&self) -> String;

    /// 編集ダイアログの初期値
    fn to_draft(&self) -> Draft;

    /// 一覧の列見出し
    fn columns() -> &'static [&'static str];

    /// 一覧の1行（`columns()` と同じ順）
    fn row(&self, ctx: &LabelContext<'_>) -> Vec<String>;

    /// リソース固有の正規化（別名フィールドの統合など）
    fn normalize(_object: &mut Map<String, Value>) {}

    /// 特定ステータスの定型メッセージ
    fn status_message(_status: u16) -> Option<&'static str> {
        None
    }

    /// JSON値からレコードへ
    ///
    /// `_id` → `id`、数値ID → 文字列の正規化を行った後、
    /// リソース固有の `normalize` を適用する。
    /// null は未設定、数値・真偽値は文字列として扱う。
    fn decode(value: Value) -> Result<Self> {
        let Value::Object(mut object) = value else {
            return Err(Error::MalformedResponse(format!(
                "expected a {} object",
                Self::KIND.noun()
            )));
        };
        normalize_id(&mut object);
        Self::normalize(&mut object);
        coerce_scalars(&mut object);
        Ok(serde_json::from_value(Value::Object(object))?)
    }
}

fn coerce_scalars(object: &mut Map<String, Value>) {
    object.retain(|_, value| !value.is_null());
    for value in object.values_mut() {
        match value {
            Value::Number(n) => *value = Value::String(n.to_string()),
            Value::Bool(b) => *value = Value::String(b.to_string()),
            _ => {}
        }
    }
}

/// `id` / `_id` の揺れを `id`（文字列）に統一
pub fn normalize_id(object: &mut Map<String, Value>) {
    let id = match object.remove("id") {
        Some(Value::Null) | None => object.remove("_id"),
        Some(id) => {
            object.remove("_id");
            Some(id)
        }
    };

    let id = match id {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(other) => {
            tracing::debug!(id = %other, "Ignoring non-scalar record id");
            None
        }
        None => None,
    };

    if let Some(id) = id {
        object.insert("id".to_string(), Value::String(id));
    }
}

/// 最初に見つかった空でない文字列値
pub(crate) fn first_string(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .filter_map(Value::as_str)
        .find(|s| !s.trim().is_empty())
        .map(str::to_string)
}
