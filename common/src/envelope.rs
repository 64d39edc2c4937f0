//! レスポンス本文の解釈
//!
//! バックエンドは `[...]` と `{ "data": [...] }` の両方を返すため、
//! 境界で一度だけ展開する。HTTP実装（reqwest / fetch）から共通で使う。

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::resource::Resource;

/// 一覧レスポンスの形
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListBody {
    RawList(Vec<Value>),
    Envelope { data: Vec<Value> },
    Other(Value),
}

impl ListBody {
    pub fn into_items(self) -> Vec<Value> {
        match self {
            ListBody::RawList(items) | ListBody::Envelope { data: items } => items,
            ListBody::Other(other) => {
                tracing::warn!(body = %other, "Unexpected list response shape");
                Vec::new()
            }
        }
    }
}

/// 一覧本文をレコード列へ
///
/// 解釈できない本文は空の一覧として扱う。個々の要素が読めない場合は読み飛ばす。
pub fn decode_list<R: Resource>(body: &str) -> Vec<R> {
    if body.trim().is_empty() {
        return Vec::new();
    }

    let parsed: ListBody = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(resource = %R::KIND, error = %e, "List response is not JSON");
            return Vec::new();
        }
    };

    parsed
        .into_items()
        .into_iter()
        .filter_map(|item| match R::decode(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(resource = %R::KIND, error = %e, "Skipping unreadable record");
                None
            }
        })
        .collect()
}

/// 単一レコードの本文（`{ data: {...} }` または生のオブジェクト）
pub fn decode_record<R: Resource>(body: &str) -> Result<R> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| Error::MalformedResponse(format!("{}: {}", R::KIND.noun(), e)))?;
    R::decode(unwrap_data(value))
}

/// 作成・更新・削除の応答
///
/// 形は保証されないので値のまま返す。空の本文は `null`。
pub fn decode_ack(body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    let value: Value =
        serde_json::from_str(body).map_err(|e| Error::MalformedResponse(e.to_string()))?;
    Ok(unwrap_data(value))
}

fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut object) if object.contains_key("data") => {
            object.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// 2xx以外の応答をエラーに変換
///
/// 1. JSON本文の `message`
/// 2. JSONだが `message` なし → "Unable to process ... request"
/// 3. JSONでない → ステータステキスト、なければ "HTTP {status} Error"
///
/// リソース固有の定型メッセージがあればそれを優先する。
pub fn rejection<R: Resource>(status: u16, status_text: &str, body: &str) -> Error {
    let message = match serde_json::from_str::<Value>(body) {
        Ok(value) => value
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| R::KIND.fallback_error_message()),
        Err(_) if !status_text.trim().is_empty() => status_text.to_string(),
        Err(_) => format!("HTTP {} Error", status),
    };

    let message = R::status_message(status)
        .map(str::to_string)
        .unwrap_or(message);

    Error::rejection(status, message)
}
